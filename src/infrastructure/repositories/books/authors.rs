use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::query_as;

use crate::domain::RepositoryError;
use crate::domain::authors::{Author, NewAuthor};
use crate::domain::ids::AuthorId;
use crate::domain::repositories::AuthorRepository;
use crate::infrastructure::database::DatabasePool;
use crate::infrastructure::repositories::{read_error, write_error};

#[derive(Clone)]
pub struct SqlAuthorRepository {
    pool: DatabasePool,
}

impl SqlAuthorRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: AuthorRecord) -> Author {
        Author {
            id: AuthorId::from(record.id),
            name: record.name,
            created_at: record.created_at,
        }
    }
}

#[async_trait]
impl AuthorRepository for SqlAuthorRepository {
    async fn insert(&self, new_author: NewAuthor) -> Result<Author, RepositoryError> {
        let new_author = new_author.normalize();

        let record = query_as::<_, AuthorRecord>(
            "INSERT INTO authors (name, created_at) VALUES (?, ?) \
             RETURNING id, name, created_at",
        )
        .bind(&new_author.name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|err| write_error(err, "An author with this name already exists"))?;

        Ok(Self::into_domain(record))
    }

    async fn list_all(&self) -> Result<Vec<Author>, RepositoryError> {
        let records = query_as::<_, AuthorRecord>(
            "SELECT id, name, created_at FROM authors ORDER BY LOWER(name) ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(read_error)?;

        Ok(records.into_iter().map(Self::into_domain).collect())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AuthorRecord {
    id: i64,
    name: String,
    created_at: DateTime<Utc>,
}
