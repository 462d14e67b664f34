use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::domain::store::StoreError;
use crate::domain::todo::TodoId;

/// Every failure a handler can produce, with the exact client-facing
/// message as the `Display` form. Validation variants are raised before
/// any store call is made.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No data provided")]
    NoData,
    #[error("Invalid request data")]
    InvalidBody,
    #[error("Title is required and cannot be empty")]
    TitleRequired,
    #[error("Title cannot be empty")]
    TitleEmpty,
    #[error("Completed must be a boolean value")]
    CompletedNotBoolean,
    #[error("Todo with id {0} not found")]
    NotFound(TodoId),
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
    /// Unparseable request body; rendered as a bare error page.
    #[error("Bad request")]
    BadRequest,
    /// No matching route (including non-integer path ids).
    #[error("Resource not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn store(context: &'static str, source: StoreError) -> Self {
        Self::Store { context, source }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NoData
            | Self::InvalidBody
            | Self::TitleRequired
            | Self::TitleEmpty
            | Self::CompletedNotBoolean
            | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Store { context, ref source } = self {
            tracing::error!(error = %source, context, "store operation failed");
        }
        let body = match self {
            // Generic pages carry no `success` field.
            Self::BadRequest | Self::RouteNotFound => json!({ "error": self.to_string() }),
            _ => json!({ "success": false, "error": self.to_string() }),
        };
        (self.status(), Json(body)).into_response()
    }
}
