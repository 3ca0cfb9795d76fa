//! HTTP error mapping.
//!
//! Every failure leaves the API as `{"message": "..."}` with one of three
//! statuses: 400 for rejected input, 404 for unknown ids, 500 for store
//! failures. Store causes are logged, never returned to the caller.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tanrai_core::ValidationError;
use tanrai_store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::handlers::MessageResponse;

/// Errors returned by the todo handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body was not a JSON object of the expected shape.
    #[error("{0}")]
    InvalidBody(String),

    /// No todo with the requested id.
    #[error("Todo not found")]
    NotFound,

    /// The store failed; `message` is what the caller sees.
    #[error("{message}")]
    Store {
        /// Per-operation message such as `"Failed to add todo"`.
        message: &'static str,
        /// Underlying cause, logged only.
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Adapter for `map_err` that tags a store failure with `message`.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Store { message, source }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store { message, source } = &self {
            error!(error = %source, "{message}");
        }
        let status = self.status();
        let body = MessageResponse::new(self.to_string());
        (status, Json(body)).into_response()
    }
}
