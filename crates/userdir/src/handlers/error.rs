//! Uniform error normalization.
//!
//! Every failure a handler can hit becomes an [`ApiError`], and every
//! `ApiError` becomes a response at the dispatch boundary; nothing
//! propagates further out.

use lambda_http::http::{Method, StatusCode};
use lambda_http::{Body, Response};
use serde_json::json;
use thiserror::Error;

use userdir_core::storage::{RepositoryError, UpdatePatchError};

use crate::response::json_response;

/// Application error, carrying the caller-facing message as its display
/// form.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing or not decodable as a JSON object.
    #[error("Invalid JSON format in request body.")]
    MalformedBody(#[source] serde_json::Error),

    #[error("Update payload is empty.")]
    EmptyPayload(#[source] UpdatePatchError),

    /// Item-level path with nothing after `/users/`.
    #[error("User ID is missing in the path.")]
    MissingUserId,

    #[error("User not found.")]
    UserNotFound,

    #[error("Method {method} on resource {path} not found.")]
    RouteNotFound { method: Method, path: String },

    /// Any storage-layer failure, with the backend's classification
    /// embedded in the message.
    #[error("Failed to execute database operation: {0}")]
    Storage(RepositoryError),
}

impl From<UpdatePatchError> for ApiError {
    fn from(err: UpdatePatchError) -> Self {
        Self::EmptyPayload(err)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { .. } => Self::UserNotFound,
            other => Self::Storage(other),
        }
    }
}

impl ApiError {
    /// Maps each error kind to its status code. Pure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::EmptyPayload(_) | ApiError::MissingUserId => {
                StatusCode::BAD_REQUEST
            }
            ApiError::UserNotFound | ApiError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs the failure and converts it into a normalized response.
    pub fn into_response(self) -> Response<Body> {
        match &self {
            ApiError::Storage(err) => {
                tracing::error!(error = %err, "database operation failed");
            }
            other => {
                tracing::warn!(status = %other.status_code(), message = %other, "request rejected");
            }
        }

        json_response(self.status_code(), &json!({ "message": self.to_string() }))
    }
}
