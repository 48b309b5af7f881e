use anyhow::{Context, Result};

const DEFAULT_INDEX: &str = "skill-scan-index";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Fails at startup if a required variable is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub pinecone_api_key: String,
    pub gen_ai_api_key: String,
    pub pinecone_index: String,
    /// Data-plane host of the index. Resolved through the control plane when unset.
    pub pinecone_index_host: Option<String>,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            pinecone_api_key: require_env("PINECONE_API_KEY")?,
            gen_ai_api_key: require_env("GEN_AI_API_KEY")?,
            pinecone_index: std::env::var("PINECONE_INDEX")
                .unwrap_or_else(|_| DEFAULT_INDEX.to_string()),
            pinecone_index_host: std::env::var("PINECONE_INDEX_HOST")
                .ok()
                .filter(|h| !h.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

// Presence is checked, content is not: an empty key surfaces on the first API call.
fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
