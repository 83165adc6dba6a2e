use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

use super::support::ValidatedJson;
use crate::application::auth::AuthenticatedUser;
use crate::application::errors::ApiError;
use crate::application::state::AppState;
use crate::domain::book_items::{Book, BookWithAuthor, NewBook};
use crate::domain::ids::BookId;

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/{id}/like", post(like_book))
}

#[tracing::instrument(skip(state))]
async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<BookWithAuthor>>, ApiError> {
    let books = state.book_service.get_all().await?;
    Ok(Json(books))
}

/// Unknown ids answer `200 null` rather than 404.
#[tracing::instrument(skip(state))]
async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<BookId>,
) -> Result<Json<Option<BookWithAuthor>>, ApiError> {
    let book = state.book_service.get_by_id(id).await?;
    Ok(Json(book))
}

#[tracing::instrument(skip(state, _auth_user, payload))]
async fn create_book(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    ValidatedJson(payload): ValidatedJson<NewBook>,
) -> Result<Response, ApiError> {
    let book = state.book_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(book)).into_response())
}

#[tracing::instrument(skip(state, _auth_user, payload))]
async fn update_book(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<BookId>,
    ValidatedJson(payload): ValidatedJson<NewBook>,
) -> Result<Json<Book>, ApiError> {
    let book = state.book_service.update_by_id(id, payload).await?;
    Ok(Json(book))
}

#[tracing::instrument(skip(state, auth_user))]
async fn like_book(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<BookId>,
) -> Result<Json<Book>, ApiError> {
    let book = state.book_service.like(id, auth_user.user.id).await?;
    Ok(Json(book))
}

#[tracing::instrument(skip(state, _auth_user))]
async fn delete_book(
    State(state): State<AppState>,
    _auth_user: AuthenticatedUser,
    Path(id): Path<BookId>,
) -> Result<Json<Book>, ApiError> {
    let book = state.book_service.delete_by_id(id).await?;
    Ok(Json(book))
}
