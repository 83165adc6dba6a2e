use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::books::authors::Author;
use crate::domain::ids::{AuthorId, BookId};
use crate::domain::validation::{FieldViolation, Validate, Violations};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub isbn: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<i32>,
    pub year_published: Option<i32>,
    pub author_id: AuthorId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A book with its author attached, as returned by catalog reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookWithAuthor {
    #[serde(flatten)]
    pub book: Book,
    pub author: Author,
    pub like_count: i64,
}

/// Every book field except the id and timestamps. Used for both create and
/// full-replacement update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub page_count: Option<i32>,
    #[serde(default)]
    pub year_published: Option<i32>,
    pub author_id: AuthorId,
}

impl NewBook {
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.isbn = normalize_optional_field(self.isbn);
        self.description = normalize_optional_field(self.description);
        self.page_count = self.page_count.filter(|&p| p > 0);
        self
    }
}

impl Validate for NewBook {
    fn validate(&self) -> Result<(), Vec<FieldViolation>> {
        let mut violations = Violations::new();
        violations.check(
            !self.title.trim().is_empty(),
            "title",
            "title should not be empty",
        );
        violations.into_result()
    }
}

fn normalize_optional_field(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
