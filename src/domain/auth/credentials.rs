use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldViolation, Validate, Violations, has_length, is_email};

pub const PASSWORD_MIN_LENGTH: usize = 5;
pub const PASSWORD_MAX_LENGTH: usize = 40;

/// Registration payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let email = self.email.trim();
        let mut violations = Violations::new();

        violations.check(!email.is_empty(), "email", "email should not be empty");
        violations.check(is_email(email), "email", "email must be an email");
        violations.check(
            !self.password.is_empty(),
            "password",
            "password should not be empty",
        );
        violations.check(
            has_length(&self.password, PASSWORD_MIN_LENGTH, PASSWORD_MAX_LENGTH),
            "password",
            "password must be longer than or equal to 5 and shorter than or equal to 40 characters",
        );

        violations.into_result()
    }
}

/// Email/password pair checked by the credential guard on login and logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
