use axum::Json;
use axum::extract::State;
use axum::routing::get;

use crate::application::errors::ApiError;
use crate::application::state::AppState;
use crate::domain::authors::Author;

pub(super) fn router() -> axum::Router<AppState> {
    axum::Router::new().route("/authors", get(list_authors))
}

#[tracing::instrument(skip(state))]
async fn list_authors(State(state): State<AppState>) -> Result<Json<Vec<Author>>, ApiError> {
    let authors = state.book_service.list_authors().await?;
    Ok(Json(authors))
}
