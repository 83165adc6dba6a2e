use std::sync::Arc;

use bookclub::application::routes::app_router;
use bookclub::application::state::{AppState, AppStateConfig};
use bookclub::domain::authors::{Author, NewAuthor};
use bookclub::domain::book_items::Book;
use bookclub::domain::ids::{AuthorId, UserId};
use bookclub::domain::repositories::{AuthorRepository, SessionRepository, UserRepository};
use bookclub::infrastructure::database::{Database, DatabasePool};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;

pub const TEST_EMAIL: &str = "reader@example.com";
pub const TEST_PASSWORD: &str = "hunter22";

pub struct TestApp {
    pub address: String,
    #[allow(dead_code)]
    pub pool: DatabasePool,
    #[allow(dead_code)]
    pub state: AppState,
    pub author_repo: Arc<dyn AuthorRepository>,
    #[allow(dead_code)]
    pub user_repo: Arc<dyn UserRepository>,
    #[allow(dead_code)]
    pub session_repo: Arc<dyn SessionRepository>,
    /// Raw `auth` cookie value for the logged-in test user, when there is one.
    pub session_token: Option<String>,
    #[allow(dead_code)]
    pub user_id: Option<UserId>,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Attach the test user's session cookie to `request`.
    pub fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .session_token
            .as_ref()
            .expect("spawn_app_with_auth required");
        request.header("Cookie", format!("auth={token}"))
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

pub async fn spawn_app() -> TestApp {
    let database = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    let state = AppState::from_database(
        &database,
        AppStateConfig {
            insecure_cookies: true,
            ..AppStateConfig::default()
        },
    );

    let author_repo = state.author_repo.clone();
    let user_repo = state.user_repo.clone();
    let session_repo = state.session_repo.clone();

    let app = app_router(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{}", local_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
        )
        .await
        .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        pool: database.clone_pool(),
        state,
        author_repo,
        user_repo,
        session_repo,
        session_token: None,
        user_id: None,
        server_handle,
    }
}

/// Spawn the app, then register and log in the default test user.
pub async fn spawn_app_with_auth() -> TestApp {
    let mut app = spawn_app().await;

    let response = register(&app, TEST_EMAIL, TEST_PASSWORD).await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let user: serde_json::Value = response.json().await.expect("invalid user body");

    let response = login(&app, TEST_EMAIL, TEST_PASSWORD).await;
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    app.session_token = Some(session_cookie(&response).expect("login did not set a cookie"));
    app.user_id = user["id"].as_i64().map(UserId::new);
    app
}

pub async fn register(app: &TestApp, email: &str, password: &str) -> Response {
    Client::new()
        .post(app.url("/auth/register"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send register request")
}

pub async fn login(app: &TestApp, email: &str, password: &str) -> Response {
    Client::new()
        .post(app.url("/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request")
}

/// Raw `Set-Cookie` header for the `auth` cookie, if the response carries one.
pub fn auth_set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("auth="))
        .map(str::to_string)
}

/// Value of the `auth` cookie set by `response`, ignoring removals.
pub fn session_cookie(response: &Response) -> Option<String> {
    let header = auth_set_cookie(response)?;
    let pair = header.split(';').next()?;
    let value = pair.trim_start_matches("auth=");
    (!value.is_empty()).then(|| value.to_string())
}

pub async fn create_author(app: &TestApp, name: &str) -> Author {
    app.author_repo
        .insert(NewAuthor {
            name: name.to_string(),
        })
        .await
        .expect("Failed to create author")
}

pub async fn create_book_response(app: &TestApp, title: &str, author_id: AuthorId) -> Response {
    app.authed(Client::new().post(app.url("/books")))
        .json(&json!({
            "title": title,
            "author_id": author_id,
            "year_published": 1969,
        }))
        .send()
        .await
        .expect("Failed to send create book request")
}

pub async fn create_book(app: &TestApp, title: &str, author_id: AuthorId) -> Book {
    let response = create_book_response(app, title, author_id).await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    response.json().await.expect("invalid book body")
}

pub async fn count_rows(app: &TestApp, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(&app.pool)
        .await
        .expect("Failed to count rows")
}
