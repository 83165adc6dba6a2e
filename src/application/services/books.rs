use std::sync::Arc;

use tracing::info;

use crate::domain::authors::Author;
use crate::domain::book_items::{Book, BookWithAuthor, NewBook};
use crate::domain::errors::{AUTHOR_MISSING, BOOK_OR_USER_MISSING};
use crate::domain::ids::{BookId, UserId};
use crate::domain::repositories::{AuthorRepository, BookRepository, LikeRepository};
use crate::domain::{CatalogError, RepositoryError};

/// Catalog operations. Storage conflicts and missing references are
/// translated into `CatalogError` here, once per operation.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookRepository>,
    authors: Arc<dyn AuthorRepository>,
    likes: Arc<dyn LikeRepository>,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        authors: Arc<dyn AuthorRepository>,
        likes: Arc<dyn LikeRepository>,
    ) -> Self {
        Self {
            books,
            authors,
            likes,
        }
    }

    pub async fn get_all(&self) -> Result<Vec<BookWithAuthor>, CatalogError> {
        Ok(self.books.list_all().await?)
    }

    pub async fn get_by_id(&self, id: BookId) -> Result<Option<BookWithAuthor>, CatalogError> {
        Ok(self.books.find_with_author(id).await?)
    }

    pub async fn create(&self, new_book: NewBook) -> Result<Book, CatalogError> {
        let book = self
            .books
            .insert(new_book.normalize())
            .await
            .map_err(|err| translate(err, AUTHOR_MISSING))?;

        info!(book_id = %book.id, title = %book.title, "book created");
        Ok(book)
    }

    pub async fn update_by_id(&self, id: BookId, book: NewBook) -> Result<Book, CatalogError> {
        let book = self
            .books
            .update(id, book.normalize())
            .await
            .map_err(|err| translate(err, AUTHOR_MISSING))?;

        info!(book_id = %book.id, "book updated");
        Ok(book)
    }

    /// Record a like and return the liked book.
    pub async fn like(&self, book_id: BookId, user_id: UserId) -> Result<Book, CatalogError> {
        self.likes
            .insert(book_id, user_id)
            .await
            .map_err(translate_like)?;

        let book = self.books.get(book_id).await.map_err(translate_like)?;

        info!(book_id = %book.id, user_id = %user_id, "book liked");
        Ok(book)
    }

    /// Missing books surface as `RepositoryError::NotFound`.
    pub async fn delete_by_id(&self, id: BookId) -> Result<Book, CatalogError> {
        let book = self.books.delete(id).await?;
        info!(book_id = %book.id, "book deleted");
        Ok(book)
    }

    pub async fn list_authors(&self) -> Result<Vec<Author>, CatalogError> {
        Ok(self.authors.list_all().await?)
    }
}

fn translate(err: RepositoryError, missing: &'static str) -> CatalogError {
    match err {
        RepositoryError::Conflict(_) => CatalogError::DuplicateTitle,
        RepositoryError::NotFound => CatalogError::ReferenceNotFound(missing),
        other => CatalogError::Repository(other),
    }
}

/// Likes only have a missing-reference case; conflicts and everything else
/// pass through untouched.
fn translate_like(err: RepositoryError) -> CatalogError {
    match err {
        RepositoryError::NotFound => CatalogError::ReferenceNotFound(BOOK_OR_USER_MISSING),
        other => CatalogError::Repository(other),
    }
}
