//! Vector store capability and the Pinecone-backed implementation.
//!
//! The store is the only system of record: SkillScan keeps no local index or cache.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod pinecone;

pub use pinecone::PineconeClient;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("index '{index}' has dimension {actual}, embeddings have {expected}")]
    Dimension {
        index: String,
        expected: usize,
        actual: usize,
    },
}

/// A vector plus its metadata, keyed by id. Upserts replace any entry with the same id.
#[derive(Debug, Clone, Serialize)]
pub struct StoredVector {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: Map<String, Value>,
}

/// A nearest-neighbour hit, in the order the store ranked it.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryMatch {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Carried in `AppState` as `Arc<dyn VectorStore>`.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn upsert(&self, entry: StoredVector) -> Result<(), StoreError>;

    /// Returns at most `top_k` matches ordered by similarity, best first.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, StoreError>;
}
