use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use todo_shared::{ErrorBody, ValidationError};
use uuid::Uuid;

use crate::store::StoreError;

/// Failure of a task operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Task {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// HTTP face of a failed request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn task_not_found() -> Self {
        Self::NotFound("Task not found".to_owned())
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Validation(error) => {
                tracing::debug!(%error, "Rejected invalid task payload");
                Self::BadRequest(error.to_string())
            }
            ServiceError::NotFound(id) => {
                tracing::debug!(%id, "Task not found");
                Self::task_not_found()
            }
            ServiceError::Storage(error) => {
                tracing::error!(%error, "Storage operation failed");
                Self::Internal(error.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "Rejected request body");
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::NotFound(message) => ErrorBody::message(message),
            Self::BadRequest(error) | Self::Internal(error) => ErrorBody::error(error),
        };
        (status, Json(body)).into_response()
    }
}
