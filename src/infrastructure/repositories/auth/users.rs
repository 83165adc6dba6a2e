use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

use crate::domain::RepositoryError;
use crate::domain::ids::UserId;
use crate::domain::repositories::UserRepository;
use crate::domain::users::{NewUser, User, normalize_email};
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::{read_error, write_error};

#[derive(Clone)]
pub struct SqlUserRepository {
    pool: DatabasePool,
}

impl SqlUserRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: UserRecord) -> User {
        User {
            id: UserId::from(record.id),
            email: record.email,
            password_hash: record.password_hash,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqlUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepositoryError> {
        let record = query_as::<_, UserRecord>(
            "INSERT INTO users (email, password_hash, created_at) VALUES (?, ?, ?) \
             RETURNING id, email, password_hash, created_at",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| write_error(err, "Email is already taken"))?;

        Ok(Self::into_domain(record))
    }

    async fn get(&self, id: UserId) -> Result<User, RepositoryError> {
        let record = query_as::<_, UserRecord>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_domain(record))
    }

    async fn get_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        let record = query_as::<_, UserRecord>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(normalize_email(email))
        .fetch_optional(&self.pool)
        .await
        .map_err(read_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(Self::into_domain(record))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}
