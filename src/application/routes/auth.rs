use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Extension, Json, middleware};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::info;

use super::support::{SUCCESS, ValidatedJson};
use crate::application::auth::{CredentialUser, SESSION_COOKIE_NAME, require_credentials};
use crate::application::errors::ApiError;
use crate::application::state::AppState;
use crate::domain::credentials::RegisterRequest;

pub(super) fn router(state: AppState) -> axum::Router<AppState> {
    let guarded = axum::Router::new()
        .route("/login", post(login))
        .route("/logout", delete(logout))
        .route_layer(middleware::from_fn_with_state(state, require_credentials));

    axum::Router::new()
        .route("/register", post(register))
        .merge(guarded)
}

#[tracing::instrument(skip(state, payload))]
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> Result<Response, ApiError> {
    let user = state.auth_service.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)).into_response())
}

#[tracing::instrument(skip(state, cookies, user))]
async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(user): Extension<CredentialUser>,
) -> Result<Response, ApiError> {
    let token = state.auth_service.create_session(&user.0).await?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .secure(!state.insecure_cookies)
        .build();
    cookies.add(cookie);

    info!(user_id = %user.0.id, "user logged in");
    Ok(Json(SUCCESS).into_response())
}

#[tracing::instrument(skip(state, cookies, user))]
async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
    Extension(user): Extension<CredentialUser>,
) -> Result<Response, ApiError> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE_NAME) {
        let ended = state
            .auth_service
            .end_session(cookie.value(), user.0.id)
            .await?;
        if !ended {
            info!("logout cookie named no session of this user");
        }
    }

    cookies.remove(Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build());

    info!(user_id = %user.0.id, "user logged out");
    Ok(Json(SUCCESS).into_response())
}
