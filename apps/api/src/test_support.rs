//! In-memory fakes for the external capabilities, plus an `AppState` builder.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use crate::genai::{Embedder, GenAiError, EMBEDDING_DIMENSION};
use crate::ingest::metadata::MetadataExtractor;
use crate::ingest::pdf::{ExtractionError, TextExtractor};
use crate::models::resume::ExtractedMetadata;
use crate::state::AppState;
use crate::vector_store::{QueryMatch, StoreError, StoredVector, VectorStore};

pub const SAMPLE_RESUME: &str = "Jane Doe\njane@example.com\nSenior Backend Engineer\nRust, PostgreSQL, Kafka";

/// One-page PDF whose text layer reads "Jane Doe" / "Skills: Rust, Kafka".
pub const SAMPLE_PDF: &[u8] = include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/resume.pdf"));

pub struct FakeText(Option<String>);

impl FakeText {
    pub fn failing() -> Self {
        Self(None)
    }
}

impl Default for FakeText {
    fn default() -> Self {
        Self(Some(SAMPLE_RESUME.to_string()))
    }
}

#[async_trait]
impl TextExtractor for FakeText {
    async fn extract(&self, _bytes: Bytes) -> Result<String, ExtractionError> {
        self.0
            .clone()
            .ok_or_else(|| ExtractionError::Parse("invalid file header".to_string()))
    }
}

/// Returns a constant full-dimension vector and remembers every input text.
#[derive(Clone, Default)]
pub struct FakeEmbedder {
    fail: bool,
    inputs: Arc<Mutex<Vec<String>>>,
}

impl FakeEmbedder {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GenAiError> {
        self.inputs.lock().unwrap().push(text.to_string());
        if self.fail {
            return Err(GenAiError::Api {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            });
        }
        Ok(vec![0.1; EMBEDDING_DIMENSION])
    }
}

pub struct FakeMetadata(Option<ExtractedMetadata>);

impl FakeMetadata {
    pub fn returning(metadata: ExtractedMetadata) -> Self {
        Self(Some(metadata))
    }

    pub fn failing() -> Self {
        Self(None)
    }
}

impl Default for FakeMetadata {
    fn default() -> Self {
        Self::returning(ExtractedMetadata {
            name: Some("Jane Doe".to_string()),
            skills: Some(vec!["Rust".to_string(), "PostgreSQL".to_string()]),
            experience: Some("6 years".to_string()),
        })
    }
}

#[async_trait]
impl MetadataExtractor for FakeMetadata {
    async fn extract(&self, _resume_text: &str) -> Result<ExtractedMetadata, GenAiError> {
        self.0.clone().ok_or(GenAiError::EmptyContent)
    }
}

#[derive(Default)]
struct StoreLog {
    upserts: Vec<StoredVector>,
    queries: Vec<usize>,
}

/// Records every call; query results are the canned matches truncated to `top_k`.
#[derive(Clone, Default)]
pub struct RecordingStore {
    log: Arc<Mutex<StoreLog>>,
    matches: Vec<QueryMatch>,
    fail: bool,
}

impl RecordingStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_matches(matches: Vec<QueryMatch>) -> Self {
        Self {
            matches,
            ..Default::default()
        }
    }

    pub fn upserts(&self) -> Vec<StoredVector> {
        self.log.lock().unwrap().upserts.clone()
    }

    pub fn queries(&self) -> Vec<usize> {
        self.log.lock().unwrap().queries.clone()
    }
}

#[async_trait]
impl VectorStore for RecordingStore {
    async fn upsert(&self, entry: StoredVector) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Api {
                status: 503,
                message: "index unavailable".to_string(),
            });
        }
        self.log.lock().unwrap().upserts.push(entry);
        Ok(())
    }

    async fn query(&self, _vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, StoreError> {
        self.log.lock().unwrap().queries.push(top_k);
        if self.fail {
            return Err(StoreError::Api {
                status: 503,
                message: "index unavailable".to_string(),
            });
        }
        Ok(self.matches.iter().take(top_k).cloned().collect())
    }
}

/// Builds an `AppState` from fakes, defaulting every capability to a succeeding one.
pub struct TestState {
    text: Arc<dyn TextExtractor>,
    embedder: Arc<dyn Embedder>,
    metadata: Arc<dyn MetadataExtractor>,
    store: Arc<dyn VectorStore>,
}

impl TestState {
    pub fn new() -> Self {
        Self {
            text: Arc::new(FakeText::default()),
            embedder: Arc::new(FakeEmbedder::default()),
            metadata: Arc::new(FakeMetadata::default()),
            store: Arc::new(RecordingStore::default()),
        }
    }

    pub fn text(mut self, text: impl TextExtractor + 'static) -> Self {
        self.text = Arc::new(text);
        self
    }

    pub fn embedder(mut self, embedder: impl Embedder + 'static) -> Self {
        self.embedder = Arc::new(embedder);
        self
    }

    pub fn metadata(mut self, metadata: impl MetadataExtractor + 'static) -> Self {
        self.metadata = Arc::new(metadata);
        self
    }

    pub fn store(mut self, store: impl VectorStore + 'static) -> Self {
        self.store = Arc::new(store);
        self
    }

    pub fn build(self) -> AppState {
        AppState {
            text_extractor: self.text,
            embedder: self.embedder,
            metadata_extractor: self.metadata,
            vector_store: self.store,
        }
    }
}
