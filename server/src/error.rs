//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fxstrength_common::StrengthError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The strength snapshot could not be produced.
    #[error("Error generating strength data: {0}")]
    Generation(#[from] StrengthError),
}

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        error!(error = %detail, "Request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { detail })).into_response()
    }
}
