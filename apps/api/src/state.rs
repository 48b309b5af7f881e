use std::sync::Arc;

use crate::genai::Embedder;
use crate::ingest::metadata::MetadataExtractor;
use crate::ingest::pdf::TextExtractor;
use crate::vector_store::VectorStore;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every external collaborator sits behind a capability trait. Handles are built once in
/// `main` and are read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// PDF bytes → plain text. Default: `PdfTextExtractor`.
    pub text_extractor: Arc<dyn TextExtractor>,
    /// Default: `GenAiClient` (text-embedding-004).
    pub embedder: Arc<dyn Embedder>,
    /// Default: `GenAiMetadataExtractor` (prompt + line parsing).
    pub metadata_extractor: Arc<dyn MetadataExtractor>,
    /// Default: `PineconeClient` bound to the configured index.
    pub vector_store: Arc<dyn VectorStore>,
}
