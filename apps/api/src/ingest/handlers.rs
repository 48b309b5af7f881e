//! Axum route handlers for the Upload API.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::ingest::pipeline::{ingest_resume, ResumeUpload};
use crate::search::handlers::{require_query, search, SearchRequest};
use crate::state::AppState;

pub const UPLOAD_SUCCESS_MESSAGE: &str = "File uploaded, parsed, and upserted successfully.";
pub const NO_FILE_MESSAGE: &str = "No file uploaded.";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    /// Text extracted from the uploaded PDF.
    pub data: String,
}

/// POST /api/upload
///
/// One route, two flows, chosen by content type alone: `multipart/form-data` ingests a
/// resume, anything else is read as a JSON search request.
pub async fn handle_upload(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, AppError> {
    if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        let upload = read_upload(multipart).await?;
        let outcome = ingest_resume(&state, upload).await?;
        info!("Ingestion complete for {}", outcome.id);

        return Ok(Json(UploadResponse {
            message: UPLOAD_SUCCESS_MESSAGE,
            data: outcome.resume_text,
        })
        .into_response());
    }

    let payload = Json::<SearchRequest>::from_request(request, &state).await;
    let query = require_query(payload)?;
    Ok(search(&state, query).await?.into_response())
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"))
}

/// Collects the fields the ingestion flow uses. Other form fields are ignored; email and
/// LinkedIn values are taken as submitted.
async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut file = None;
    let mut email = None;
    let mut linkedin = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                info!(
                    "Receiving resume '{}'",
                    field.file_name().unwrap_or("<unnamed>")
                );
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(e.body_text()))?;
                file = Some(bytes);
            }
            Some("email") => {
                email = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?,
                );
            }
            Some("linkedIn") => {
                linkedin = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(e.body_text()))?,
                );
            }
            _ => {}
        }
    }

    // Browsers send an empty part when no file was picked.
    let file = file
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::Validation(NO_FILE_MESSAGE.to_string()))?;

    Ok(ResumeUpload {
        file,
        email,
        linkedin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_is_multipart_matches_boundary_content_type() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("multipart/form-data; boundary=----x"),
        );
        assert!(is_multipart(&headers));
    }

    #[test]
    fn test_is_multipart_rejects_json_and_missing_header() {
        let mut headers = HeaderMap::new();
        assert!(!is_multipart(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_multipart(&headers));
    }
}
