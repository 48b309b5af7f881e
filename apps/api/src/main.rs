mod config;
mod errors;
mod genai;
mod ingest;
mod models;
mod pages;
mod routes;
mod search;
mod state;
mod vector_store;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::genai::GenAiClient;
use crate::ingest::metadata::GenAiMetadataExtractor;
use crate::ingest::pdf::PdfTextExtractor;
use crate::routes::build_router;
use crate::state::AppState;
use crate::vector_store::PineconeClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillScan v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generative-AI client (embeddings + metadata extraction)
    let genai_client = GenAiClient::new(config.gen_ai_api_key.clone())?;
    info!(
        "GenAI client initialized (embedding: {}, generation: {})",
        genai::EMBEDDING_MODEL,
        genai::GENERATION_MODEL
    );

    // Initialize vector store client
    let pinecone = match &config.pinecone_index_host {
        Some(host) => PineconeClient::new(config.pinecone_api_key.clone(), host)?,
        None => {
            PineconeClient::connect(config.pinecone_api_key.clone(), &config.pinecone_index)
                .await?
        }
    };
    info!(
        "Pinecone client initialized (index: {}, url: {})",
        config.pinecone_index,
        pinecone.index_url()
    );

    // Build app state
    let state = AppState {
        text_extractor: Arc::new(PdfTextExtractor),
        embedder: Arc::new(genai_client.clone()),
        metadata_extractor: Arc::new(GenAiMetadataExtractor(genai_client)),
        vector_store: Arc::new(pinecone),
    };

    // Build router
    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
