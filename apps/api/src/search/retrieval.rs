//! Retrieval — embed the query, take the store's top matches, normalize them for display.

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

/// Number of matches requested from the store. Not user-adjustable.
pub const TOP_K: usize = 5;

#[derive(Debug, Serialize)]
pub struct Feedback {
    pub feedback: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeMatch {
    #[serde(rename = "resumeText")]
    pub resume_text: ResumeRecord,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub feedback: Feedback,
    pub resumes: Vec<ResumeMatch>,
}

/// The feedback line is a fixed template around the query, not a model-written critique.
pub fn feedback_message(query: &str) -> String {
    format!("Based on your query for '{query}', here are the most relevant resumes.")
}

/// Returns at most `TOP_K` resumes in the store's ranking order. No re-ranking or dedup.
pub async fn search_resumes(state: &AppState, query: &str) -> Result<Vec<ResumeMatch>, AppError> {
    let embedding = state
        .embedder
        .embed(query)
        .await
        .map_err(AppError::Embedding)?;

    let matches = state.vector_store.query(&embedding, TOP_K).await?;
    info!("Query matched {} resume(s)", matches.len());
    for m in &matches {
        debug!("match id={} score={:.4}", m.id, m.score);
    }

    Ok(matches
        .iter()
        .take(TOP_K)
        .map(|m| ResumeMatch {
            resume_text: ResumeRecord::from_metadata(m.metadata.as_ref()),
        })
        .collect())
}

pub async fn run_search(state: &AppState, query: &str) -> Result<SearchResponse, AppError> {
    let resumes = search_resumes(state, query).await?;
    Ok(SearchResponse {
        feedback: Feedback {
            feedback: feedback_message(query),
        },
        resumes,
    })
}
