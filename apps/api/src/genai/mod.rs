/// Generative-AI client — the single point of entry for all Google Generative Language
/// API calls in SkillScan.
///
/// ARCHITECTURAL RULE: No other module may call the provider directly.
/// Embedding and generation both go through `GenAiClient`.
///
/// Models are hardcoded. The vector index dimension is tied to the embedding model,
/// so switching it is a migration, not a config change.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GENAI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Embedding model. Produces `EMBEDDING_DIMENSION`-long vectors.
pub const EMBEDDING_MODEL: &str = "text-embedding-004";
pub const EMBEDDING_DIMENSION: usize = 768;
/// Generation model used for metadata extraction.
pub const GENERATION_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model returned empty content")]
    EmptyContent,

    #[error("Embedding has {actual} dimensions, expected {expected}")]
    Dimension { expected: usize, actual: usize },
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct EmbedContentRequest<'a> {
    model: String,
    content: Content<'a>,
}

#[derive(Debug, Deserialize)]
pub struct EmbedContentResponse {
    pub embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
pub struct ContentEmbedding {
    #[serde(default)]
    pub values: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ReplyPart>,
}

#[derive(Debug, Deserialize)]
pub struct ReplyPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Extracts the first text part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.iter().find_map(|p| p.text.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
struct GenAiErrorEnvelope {
    error: GenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GenAiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Capability
// ────────────────────────────────────────────────────────────────────────────

/// Text in, fixed-length vector out. Carried in `AppState` as `Arc<dyn Embedder>`.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GenAiError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single generative-AI client used by all services in SkillScan.
/// Calls are made once; failures surface to the caller without retry.
#[derive(Clone)]
pub struct GenAiClient {
    client: Client,
    api_key: String,
}

impl GenAiClient {
    pub fn new(api_key: String) -> Result<Self, GenAiError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
        })
    }

    /// Runs a single-turn prompt through the generation model and returns its reply text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!("{GENAI_API_BASE}/models/{GENERATION_MODEL}:generateContent");
        let response: GenerateContentResponse = self.post(&url, &body).await?;

        if let Some(usage) = &response.usage_metadata {
            debug!(
                "Generation succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        response
            .text()
            .map(str::to_string)
            .ok_or(GenAiError::EmptyContent)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, GenAiError> {
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Embedder for GenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, GenAiError> {
        let body = EmbedContentRequest {
            model: format!("models/{EMBEDDING_MODEL}"),
            content: Content {
                role: None,
                parts: vec![Part { text }],
            },
        };

        let url = format!("{GENAI_API_BASE}/models/{EMBEDDING_MODEL}:embedContent");
        let response: EmbedContentResponse = self.post(&url, &body).await?;
        let values = check_embedding(response.embedding.values)?;

        debug!("Generated embedding with {} dimensions", values.len());
        Ok(values)
    }
}

fn check_embedding(values: Vec<f32>) -> Result<Vec<f32>, GenAiError> {
    if values.is_empty() {
        return Err(GenAiError::EmptyContent);
    }
    if values.len() != EMBEDDING_DIMENSION {
        return Err(GenAiError::Dimension {
            expected: EMBEDDING_DIMENSION,
            actual: values.len(),
        });
    }
    Ok(values)
}

/// Pulls `error.message` out of a provider error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<GenAiErrorEnvelope>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
