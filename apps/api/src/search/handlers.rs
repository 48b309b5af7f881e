//! Axum route handlers for the Search API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::search::retrieval::{run_search, SearchResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
}

/// Unwraps the JSON body, treating parse failures and a blank query as client errors.
pub fn require_query(payload: Result<Json<SearchRequest>, JsonRejection>) -> Result<String, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    request
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| AppError::Validation("No query provided.".to_string()))
}

pub async fn search(state: &AppState, query: String) -> Result<Json<SearchResponse>, AppError> {
    info!("Searching resumes for '{query}'");
    Ok(Json(run_search(state, &query).await?))
}

/// POST /api/search
pub async fn handle_search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = require_query(payload)?;
    search(&state, query).await
}
