use std::sync::Arc;

use chrono::Duration;

use crate::application::services::{AuthService, BookService};
use crate::domain::repositories::{
    AuthorRepository, BookRepository, LikeRepository, SessionRepository, UserRepository,
};
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::authors::SqlAuthorRepository;
use crate::infrastructure::repositories::book_repos::SqlBookRepository;
use crate::infrastructure::repositories::likes::SqlLikeRepository;
use crate::infrastructure::repositories::sessions::SqlSessionRepository;
use crate::infrastructure::repositories::users::SqlUserRepository;

/// Settings that differ between production and tests. Repositories and
/// services are built from the database pool.
pub struct AppStateConfig {
    pub insecure_cookies: bool,
    pub session_ttl: Duration,
}

impl Default for AppStateConfig {
    fn default() -> Self {
        Self {
            insecure_cookies: false,
            session_ttl: Duration::hours(24),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub session_repo: Arc<dyn SessionRepository>,
    pub author_repo: Arc<dyn AuthorRepository>,
    pub auth_service: AuthService,
    pub book_service: BookService,
    pub insecure_cookies: bool,
}

impl AppState {
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let pool = database.clone_pool();

        let user_repo: Arc<dyn UserRepository> = Arc::new(SqlUserRepository::new(pool.clone()));
        let session_repo: Arc<dyn SessionRepository> =
            Arc::new(SqlSessionRepository::new(pool.clone()));
        let author_repo: Arc<dyn AuthorRepository> =
            Arc::new(SqlAuthorRepository::new(pool.clone()));
        let book_repo: Arc<dyn BookRepository> = Arc::new(SqlBookRepository::new(pool.clone()));
        let like_repo: Arc<dyn LikeRepository> = Arc::new(SqlLikeRepository::new(pool));

        let auth_service = AuthService::new(
            Arc::clone(&user_repo),
            Arc::clone(&session_repo),
            config.session_ttl,
        );
        let book_service = BookService::new(
            book_repo,
            Arc::clone(&author_repo),
            like_repo,
        );

        Self {
            user_repo,
            session_repo,
            author_repo,
            auth_service,
            book_service,
            insecure_cookies: config.insecure_cookies,
        }
    }
}
