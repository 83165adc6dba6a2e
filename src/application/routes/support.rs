use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::application::errors::{ApiError, AppError};
use crate::domain::validation::Validate;

/// JSON body that has been deserialized and then checked with [`Validate`].
///
/// Malformed JSON and failed checks both reject with a 400 validation error
/// before the handler runs.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rejection| AppError::validation("body", rejection.body_text()))?;

        value.validate().map_err(AppError::Validation)?;
        Ok(Self(value))
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub const SUCCESS: MessageResponse = MessageResponse { message: "success" };
