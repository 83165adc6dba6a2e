pub mod auth;
pub mod books;

pub use auth::{sessions, users};
pub use books::{authors, books as book_repos, likes};

use crate::domain::RepositoryError;

/// Classify a failed write: unique violations become `Conflict`, foreign keys
/// pointing at missing rows become `NotFound`, anything else is unexpected.
pub(crate) fn write_error(err: sqlx::Error, conflict_message: &str) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return RepositoryError::conflict(conflict_message);
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::NotFound;
        }
    }
    RepositoryError::unexpected(err.to_string())
}

pub(crate) fn read_error(err: sqlx::Error) -> RepositoryError {
    RepositoryError::unexpected(err.to_string())
}
