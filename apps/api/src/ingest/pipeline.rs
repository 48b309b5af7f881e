use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::StoredResume;
use crate::state::AppState;
use crate::vector_store::StoredVector;

/// A parsed multipart submission.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file: Bytes,
    pub email: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub id: String,
    pub resume_text: String,
}

/// Ids are derived from the ingestion instant; two uploads in the same millisecond share one.
pub fn resume_id(at: DateTime<Utc>) -> String {
    format!("resume-{}", at.timestamp_millis())
}

/// Extract → embed → extract metadata → upsert.
///
/// Steps run sequentially and any failure aborts the flow. The upsert is the only write,
/// so nothing is persisted unless every earlier step succeeded.
pub async fn ingest_resume(
    state: &AppState,
    upload: ResumeUpload,
) -> Result<IngestOutcome, AppError> {
    let resume_text = state.text_extractor.extract(upload.file).await?;

    let embedding = state
        .embedder
        .embed(&resume_text)
        .await
        .map_err(AppError::Embedding)?;

    let extracted = state
        .metadata_extractor
        .extract(&resume_text)
        .await
        .map_err(AppError::Generation)?;

    let metadata = StoredResume::new(
        extracted,
        upload.email.as_deref(),
        upload.linkedin.as_deref(),
        &resume_text,
    );
    let id = resume_id(Utc::now());

    state
        .vector_store
        .upsert(StoredVector {
            id: id.clone(),
            values: embedding,
            metadata: metadata.into_metadata(),
        })
        .await?;

    info!("Resume {id} upserted ({} chars)", resume_text.len());

    Ok(IngestOutcome { id, resume_text })
}
