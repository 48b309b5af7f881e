//! Pinecone REST client: control-plane index lookup plus data-plane upsert and query.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, info};

use super::{QueryMatch, StoreError, StoredVector, VectorStore};
use crate::genai::EMBEDDING_DIMENSION;

const CONTROL_PLANE_URL: &str = "https://api.pinecone.io";
const API_VERSION: &str = "2024-07";

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [StoredVector],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_values: bool,
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

/// Control-plane description of an index.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexDescription {
    pub name: String,
    pub host: String,
    pub dimension: Option<usize>,
    pub metric: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PineconeErrorEnvelope {
    error: PineconeErrorBody,
}

#[derive(Debug, Deserialize)]
struct PineconeErrorBody {
    message: String,
}

/// Handle on one Pinecone index. Read-only after construction.
#[derive(Clone)]
pub struct PineconeClient {
    client: Client,
    api_key: String,
    /// Base URL of the index data plane, e.g. `https://skill-scan-index-abc123.svc.pinecone.io`.
    index_url: String,
}

impl PineconeClient {
    /// Builds a client for an index whose data-plane host is already known.
    pub fn new(api_key: String, host: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: build_http_client()?,
            api_key,
            index_url: index_url(host),
        })
    }

    /// Looks the index up on the control plane and builds a client for its host.
    pub async fn connect(api_key: String, index_name: &str) -> Result<Self, StoreError> {
        let client = build_http_client()?;
        let request = client.get(format!("{CONTROL_PLANE_URL}/indexes/{index_name}"));
        let description: IndexDescription = send(request, &api_key).await?;

        info!(
            "Resolved Pinecone index '{}' at {} (dimension: {:?}, metric: {:?})",
            description.name, description.host, description.dimension, description.metric
        );
        check_dimension(&description)?;

        Ok(Self {
            client,
            api_key,
            index_url: index_url(&description.host),
        })
    }

    pub fn index_url(&self) -> &str {
        &self.index_url
    }
}

#[async_trait]
impl VectorStore for PineconeClient {
    async fn upsert(&self, entry: StoredVector) -> Result<(), StoreError> {
        let vectors = [entry];
        let request = self
            .client
            .post(format!("{}/vectors/upsert", self.index_url))
            .json(&UpsertRequest { vectors: &vectors });
        let response: UpsertResponse = send(request, &self.api_key).await?;

        debug!(
            "Upserted {} vector(s), id={}",
            response.upserted_count, vectors[0].id
        );
        Ok(())
    }

    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>, StoreError> {
        let request = self
            .client
            .post(format!("{}/query", self.index_url))
            .json(&QueryRequest {
                vector,
                top_k,
                include_values: false,
                include_metadata: true,
            });
        let response: QueryResponse = send(request, &self.api_key).await?;

        debug!("Query returned {} match(es)", response.matches.len());
        Ok(response.matches)
    }
}

/// No request timeout: a slow index stalls the request rather than failing it.
fn build_http_client() -> Result<Client, StoreError> {
    Ok(Client::builder().build()?)
}

/// Rejects an index that cannot hold this service's embeddings.
fn check_dimension(description: &IndexDescription) -> Result<(), StoreError> {
    match description.dimension {
        Some(actual) if actual != EMBEDDING_DIMENSION => Err(StoreError::Dimension {
            index: description.name.clone(),
            expected: EMBEDDING_DIMENSION,
            actual,
        }),
        _ => Ok(()),
    }
}

fn index_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder, api_key: &str) -> Result<T, StoreError> {
    let response = request
        .header("Api-Key", api_key)
        .header("X-Pinecone-API-Version", API_VERSION)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let message = serde_json::from_str::<PineconeErrorEnvelope>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        return Err(StoreError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(serde_json::from_str(&body)?)
}
