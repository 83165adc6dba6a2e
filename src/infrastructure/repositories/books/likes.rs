use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::ids::{BookId, UserId};
use crate::domain::likes::Like;
use crate::domain::repositories::LikeRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::{read_error, write_error};

#[derive(Clone)]
pub struct SqlLikeRepository {
    pool: DatabasePool,
}

impl SqlLikeRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for SqlLikeRepository {
    async fn insert(&self, book_id: BookId, user_id: UserId) -> Result<Like, RepositoryError> {
        // The upsert clause only absorbs the primary-key conflict; foreign key
        // failures still surface.
        query(
            "INSERT INTO book_likes (book_id, user_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT (book_id, user_id) DO NOTHING",
        )
        .bind(i64::from(book_id))
        .bind(i64::from(user_id))
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|err| write_error(err, "like already recorded"))?;

        let record = query_as::<_, LikeRecord>(
            "SELECT book_id, user_id, created_at FROM book_likes WHERE book_id = ? AND user_id = ?",
        )
        .bind(i64::from(book_id))
        .bind(i64::from(user_id))
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Like {
            book_id: BookId::from(record.book_id),
            user_id: UserId::from(record.user_id),
            created_at: record.created_at,
        })
    }

}

#[derive(sqlx::FromRow)]
struct LikeRecord {
    book_id: i64,
    user_id: i64,
    created_at: DateTime<Utc>,
}
