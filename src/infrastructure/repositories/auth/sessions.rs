use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::ids::{SessionId, UserId};
use crate::domain::repositories::SessionRepository;
use crate::domain::sessions::{NewSession, Session};
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::{read_error, write_error};

#[derive(Clone)]
pub struct SqlSessionRepository {
    pool: DatabasePool,
}

impl SqlSessionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: SessionRecord) -> Session {
        Session {
            id: SessionId::from(record.id),
            user_id: UserId::from(record.user_id),
            token_hash: record.token_hash,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}

#[async_trait]
impl SessionRepository for SqlSessionRepository {
    async fn insert(&self, session: NewSession) -> Result<Session, RepositoryError> {
        let record = query_as::<_, SessionRecord>(
            "INSERT INTO sessions (user_id, token_hash, created_at, expires_at) VALUES (?, ?, ?, ?) \
             RETURNING id, user_id, token_hash, created_at, expires_at",
        )
        .bind(i64::from(session.user_id))
        .bind(&session.token_hash)
        .bind(session.created_at)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| write_error(err, "session token collision"))?;

        Ok(Self::into_domain(record))
    }

    async fn get_by_token_hash(&self, token_hash: &str) -> Result<Session, RepositoryError> {
        let record = query_as::<_, SessionRecord>(
            "SELECT id, user_id, token_hash, created_at, expires_at FROM sessions WHERE token_hash = ?",
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_domain(record))
    }

    async fn delete(&self, id: SessionId) -> Result<(), RepositoryError> {
        let result = query("DELETE FROM sessions WHERE id = ?")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(read_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete_expired(&self) -> Result<u64, RepositoryError> {
        let result = query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(result.rows_affected())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRecord {
    id: i64,
    user_id: i64,
    token_hash: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}
