use thiserror::Error;

/// Storage-level failure classification shared by every repository.
///
/// `NotFound` covers both a missing target row and a missing related row
/// (a foreign key that points nowhere); `Conflict` is a unique constraint
/// violation. Everything else is `Unexpected`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unexpected repository error: {0}")]
    Unexpected(String),
}

impl RepositoryError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

/// Failures surfaced by catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Title is already taken")]
    DuplicateTitle,
    #[error("{0}")]
    ReferenceNotFound(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

pub const AUTHOR_MISSING: &str = "Author doesn't exist";
pub const BOOK_OR_USER_MISSING: &str = "Book or user don't exist";

/// Failures surfaced by registration and credential checks.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("Email is already taken")]
    EmailTaken,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
