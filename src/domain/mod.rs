pub mod auth;
pub mod books;
pub mod errors;
pub mod ids;
pub mod repositories;
pub mod validation;

// Re-exports
pub use auth::{credentials, sessions, users};
pub use books::books as book_items;
pub use books::{authors, likes};
pub use errors::{AuthError, CatalogError, RepositoryError};
