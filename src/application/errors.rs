use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::validation::FieldViolation;
use crate::domain::{AuthError, CatalogError, RepositoryError};

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: Vec::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("{0}")]
    Conflict(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    /// A validation failure on a single field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldViolation::new(field, message)])
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ErrorResponse {
        match self {
            Self::Validation(errors) => ErrorResponse {
                message: "validation failed".to_string(),
                errors,
            },
            Self::Unexpected(_) => ErrorResponse::new("internal server error"),
            other => ErrorResponse::new(other.to_string()),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound,
            RepositoryError::Conflict(message) => Self::Conflict(message),
            RepositoryError::Unexpected(message) => Self::Unexpected(message),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::DuplicateTitle => Self::Conflict(err.to_string()),
            CatalogError::ReferenceNotFound(message) => Self::BadRequest(message.to_string()),
            CatalogError::Repository(inner) => Self::from(inner),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized,
            AuthError::EmailTaken => Self::Conflict(err.to_string()),
            AuthError::Hashing(message) => Self::Unexpected(message),
            AuthError::Repository(inner) => Self::from(inner),
        }
    }
}

/// Response-side wrapper returned by handlers.
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

macro_rules! api_error_from {
    ($($source:ty),+) => {
        $(
            impl From<$source> for ApiError {
                fn from(err: $source) -> Self {
                    Self(AppError::from(err))
                }
            }
        )+
    };
}

api_error_from!(RepositoryError, CatalogError, AuthError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();

        if status.is_server_error() {
            error!(error = %self.0, %status, "request failed");
        } else if matches!(self.0, AppError::Unauthorized) {
            tracing::debug!(%status, "request rejected");
        } else {
            warn!(error = %self.0, %status, "request rejected");
        }

        (status, Json(self.0.into_body())).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError(self).into_response()
    }
}
