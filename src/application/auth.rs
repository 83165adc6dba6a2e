use axum::body::{Body, to_bytes};
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tower_cookies::Cookies;
use tracing::{Span, warn};

use crate::application::errors::{ApiError, AppError};
use crate::application::state::AppState;
use crate::domain::AuthError;
use crate::domain::credentials::Credentials;
use crate::domain::users::User;

pub const SESSION_COOKIE_NAME: &str = "auth";

/// Login and logout bodies are tiny; anything larger is rejected as unauthorized.
const CREDENTIALS_BODY_LIMIT: usize = 16 * 1024;

/// The user behind a valid, unexpired `auth` session cookie.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|(status, message)| {
                warn!(%status, error = message, "cookie manager unavailable");
                AppError::Unauthorized
            })?;

        let token = cookies
            .get(SESSION_COOKIE_NAME)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::Unauthorized)?;

        let user = state
            .auth_service
            .resolve_session(&token)
            .await
            .map_err(|err| match err {
                AuthError::InvalidCredentials => AppError::Unauthorized,
                other => {
                    warn!(error = %other, "session lookup failed");
                    AppError::from(other)
                }
            })?;

        Span::current().record("user.id", tracing::field::display(&user.id));
        Ok(Self { user })
    }
}

/// The user whose email and password were verified by [`require_credentials`].
#[derive(Debug, Clone)]
pub struct CredentialUser(pub User);

/// Guard for login and logout: reads `{ email, password }` from the body and
/// rejects with 401 before the handler runs unless they match a stored user.
/// The buffered body is handed on unchanged.
pub async fn require_credentials(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = request.into_parts();

    let bytes = to_bytes(body, CREDENTIALS_BODY_LIMIT)
        .await
        .map_err(|_| AppError::Unauthorized)?;
    let credentials: Credentials =
        serde_json::from_slice(&bytes).map_err(|_| AppError::Unauthorized)?;

    let user = state
        .auth_service
        .authenticate(&credentials)
        .await
        .map_err(|err| {
            if matches!(err, AuthError::InvalidCredentials) {
                warn!("credential check failed");
            }
            ApiError::from(err)
        })?;

    Span::current().record("user.id", tracing::field::display(&user.id));

    let mut request = Request::from_parts(parts, Body::from(bytes));
    request.extensions_mut().insert(CredentialUser(user));
    Ok(next.run(request).await)
}
