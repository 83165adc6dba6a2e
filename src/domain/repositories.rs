use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::authors::{Author, NewAuthor};
use crate::domain::book_items::{Book, BookWithAuthor, NewBook};
use crate::domain::ids::{BookId, SessionId, UserId};
use crate::domain::likes::Like;
use crate::domain::sessions::{NewSession, Session};
use crate::domain::users::{NewUser, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError>;
    async fn get(&self, id: UserId) -> Result<User, RepositoryError>;
    async fn get_by_email(&self, email: &str) -> Result<User, RepositoryError>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn insert(&self, session: NewSession) -> Result<Session, RepositoryError>;
    async fn get_by_token_hash(&self, token_hash: &str) -> Result<Session, RepositoryError>;
    async fn delete(&self, id: SessionId) -> Result<(), RepositoryError>;
    async fn delete_expired(&self) -> Result<u64, RepositoryError>;
}

#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn insert(&self, author: NewAuthor) -> Result<Author, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Author>, RepositoryError>;
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn insert(&self, book: NewBook) -> Result<Book, RepositoryError>;
    async fn get(&self, id: BookId) -> Result<Book, RepositoryError>;
    /// Returns `Ok(None)` when no book has this id.
    async fn find_with_author(
        &self,
        id: BookId,
    ) -> Result<Option<BookWithAuthor>, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<BookWithAuthor>, RepositoryError>;
    /// Replaces every descriptive field. `NotFound` when the book or the
    /// referenced author does not exist.
    async fn update(&self, id: BookId, book: NewBook) -> Result<Book, RepositoryError>;
    async fn delete(&self, id: BookId) -> Result<Book, RepositoryError>;
}

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Records that `user_id` likes `book_id`. Liking twice keeps the
    /// original record. `NotFound` when either side does not exist.
    async fn insert(&self, book_id: BookId, user_id: UserId) -> Result<Like, RepositoryError>;
}
