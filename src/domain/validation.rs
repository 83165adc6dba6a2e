use serde::{Deserialize, Serialize};

/// A single rejected field in a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Implemented by request payloads that must be checked before any handler
/// logic runs. Reports every violated field, not just the first.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldViolation>>;
}

/// Collects violations for one payload and turns them into a `Validate` result.
#[derive(Debug, Default)]
pub struct Violations(Vec<FieldViolation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.0.push(FieldViolation::new(field, message));
        }
    }

    pub fn into_result(self) -> Result<(), Vec<FieldViolation>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}

const EMAIL_MAX_LENGTH: usize = 254;

/// Basic structural email check: one `@`, a non-empty local part and a dotted
/// domain made of alphanumerics, dots and hyphens.
pub fn is_email(value: &str) -> bool {
    if value.len() > EMAIL_MAX_LENGTH {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return false;
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    !(domain.starts_with(['.', '-'])
        || domain.ends_with(['.', '-'])
        || domain.contains(".."))
}

/// Inclusive character-count range check.
pub fn has_length(value: &str, min: usize, max: usize) -> bool {
    let count = value.chars().count();
    (min..=max).contains(&count)
}
