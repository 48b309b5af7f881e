// Ingestion flow: PDF upload → text → embedding + extracted metadata → vector store upsert.
// All model calls go through genai — no direct provider calls here.

pub mod handlers;
pub mod metadata;
pub mod pdf;
pub mod pipeline;
