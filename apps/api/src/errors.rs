use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::genai::GenAiError;
use crate::ingest::pdf::ExtractionError;
use crate::vector_store::StoreError;

/// Message returned to callers for every server-side failure.
pub const FAILURE_MESSAGE: &str = "Failed to process request.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Embedding error: {0}")]
    Embedding(GenAiError),

    #[error("Generation error: {0}")]
    Generation(GenAiError),

    #[error("Vector store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Validation(msg) = &self {
            tracing::warn!("Rejected request: {msg}");
            return (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response();
        }

        match &self {
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            other => tracing::error!("{other}"),
        }

        let body = Json(json!({
            "message": FAILURE_MESSAGE,
            "error": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
