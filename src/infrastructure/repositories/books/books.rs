use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

use crate::domain::RepositoryError;
use crate::domain::authors::Author;
use crate::domain::book_items::{Book, BookWithAuthor, NewBook};
use crate::domain::ids::{AuthorId, BookId};
use crate::domain::repositories::BookRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::{read_error, write_error};

const TITLE_TAKEN: &str = "A book with this title already exists";

const BOOK_COLUMNS: &str =
    "id, title, isbn, description, page_count, year_published, author_id, created_at, updated_at";

const BOOK_WITH_AUTHOR_SELECT: &str = r"SELECT b.id, b.title, b.isbn, b.description, b.page_count, b.year_published, b.author_id, b.created_at, b.updated_at,
              a.name AS author_name, a.created_at AS author_created_at,
              (SELECT COUNT(*) FROM book_likes bl WHERE bl.book_id = b.id) AS like_count
              FROM books b
              JOIN authors a ON a.id = b.author_id";

#[derive(Clone)]
pub struct SqlBookRepository {
    pool: DatabasePool,
}

impl SqlBookRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_book(record: BookRecord) -> Book {
        Book {
            id: BookId::from(record.id),
            title: record.title,
            isbn: record.isbn,
            description: record.description,
            page_count: record.page_count,
            year_published: record.year_published,
            author_id: AuthorId::from(record.author_id),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    fn into_book_with_author(record: BookWithAuthorRecord) -> BookWithAuthor {
        let author = Author {
            id: AuthorId::from(record.author_id),
            name: record.author_name,
            created_at: record.author_created_at,
        };

        BookWithAuthor {
            book: Book {
                id: BookId::from(record.id),
                title: record.title,
                isbn: record.isbn,
                description: record.description,
                page_count: record.page_count,
                year_published: record.year_published,
                author_id: author.id,
                created_at: record.created_at,
                updated_at: record.updated_at,
            },
            author,
            like_count: record.like_count,
        }
    }
}

#[async_trait]
impl BookRepository for SqlBookRepository {
    async fn insert(&self, new_book: NewBook) -> Result<Book, RepositoryError> {
        let now = Utc::now();

        let record = query_as::<_, BookRecord>(&format!(
            r"INSERT INTO books (title, isbn, description, page_count, year_published, author_id, created_at, updated_at)
              VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              RETURNING {BOOK_COLUMNS}"
        ))
        .bind(&new_book.title)
        .bind(new_book.isbn.as_deref())
        .bind(new_book.description.as_deref())
        .bind(new_book.page_count)
        .bind(new_book.year_published)
        .bind(i64::from(new_book.author_id))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| write_error(err, TITLE_TAKEN))?;

        Ok(Self::into_book(record))
    }

    async fn get(&self, id: BookId) -> Result<Book, RepositoryError> {
        let record =
            query_as::<_, BookRecord>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"))
                .bind(i64::from(id))
                .fetch_optional(&self.pool)
                .await
                .map_err(read_error)?
                .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_book(record))
    }

    async fn find_with_author(
        &self,
        id: BookId,
    ) -> Result<Option<BookWithAuthor>, RepositoryError> {
        let record = query_as::<_, BookWithAuthorRecord>(&format!(
            "{BOOK_WITH_AUTHOR_SELECT} WHERE b.id = ?"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(record.map(Self::into_book_with_author))
    }

    async fn list_all(&self) -> Result<Vec<BookWithAuthor>, RepositoryError> {
        let records = query_as::<_, BookWithAuthorRecord>(&format!(
            "{BOOK_WITH_AUTHOR_SELECT} ORDER BY b.id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(records
            .into_iter()
            .map(Self::into_book_with_author)
            .collect())
    }

    async fn update(&self, id: BookId, book: NewBook) -> Result<Book, RepositoryError> {
        let record = query_as::<_, BookRecord>(&format!(
            r"UPDATE books
              SET title = ?, isbn = ?, description = ?, page_count = ?, year_published = ?, author_id = ?, updated_at = ?
              WHERE id = ?
              RETURNING {BOOK_COLUMNS}"
        ))
        .bind(&book.title)
        .bind(book.isbn.as_deref())
        .bind(book.description.as_deref())
        .bind(book.page_count)
        .bind(book.year_published)
        .bind(i64::from(book.author_id))
        .bind(Utc::now())
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| write_error(err, TITLE_TAKEN))?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_book(record))
    }

    async fn delete(&self, id: BookId) -> Result<Book, RepositoryError> {
        let record = query_as::<_, BookRecord>(&format!(
            "DELETE FROM books WHERE id = ? RETURNING {BOOK_COLUMNS}"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_book(record))
    }
}

#[derive(sqlx::FromRow)]
struct BookRecord {
    id: i64,
    title: String,
    isbn: Option<String>,
    description: Option<String>,
    page_count: Option<i32>,
    year_published: Option<i32>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BookWithAuthorRecord {
    id: i64,
    title: String,
    isbn: Option<String>,
    description: Option<String>,
    page_count: Option<i32>,
    year_published: Option<i32>,
    author_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: String,
    author_created_at: DateTime<Utc>,
    like_count: i64,
}
