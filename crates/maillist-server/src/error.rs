// ABOUTME: Error type for the JSON API and its mapping onto HTTP status codes.
// ABOUTME: Every failure is answered with the {"Err": "<message>"} envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use maillist_core::ValidationError;
use maillist_store::StoreError;
use thiserror::Error;

use crate::api::body::{ErrorBody, json_response};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("malformed JSON body: {0}")]
    MalformedBody(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(e) if e.is_conflict() => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("storage failure: {}", self);
        } else {
            tracing::debug!("rejected request: {}", self);
        }
        json_response(
            status,
            &ErrorBody {
                err: self.to_string(),
            },
        )
    }
}
