//! File scan handlers
//!
//! `POST` forwards the uploaded file to the scanner and reshapes its verdict;
//! `GET` only explains how to use the endpoint.

use std::time::Instant;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use scan_core::backend::DEFAULT_FILE_NAME;
use scan_core::{BackendError, ScanResult, UploadedFile};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Form field carrying the file
pub const FILE_FIELD: &str = "file";
/// Message returned on `GET`
pub const USAGE_MESSAGE: &str = "This endpoint expects a POST request with a file to scan.";

/// Response for `GET` on the scan route
#[derive(Debug, Serialize)]
pub struct UsageResponse {
    pub message: String,
}

/// POST /scan
/// Forward an uploaded file to the scanner and return the reshaped result
pub async fn scan_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ScanResult>, ApiError> {
    let started = Instant::now();
    tracing::info!("Scan request received");

    let multipart = multipart.map_err(|rejection| ApiError::Unexpected(rejection.body_text()))?;
    let file = extract_file(multipart)
        .await?
        .ok_or_else(|| ApiError::Validation("No file provided".to_string()))?;

    tracing::info!(file_name = %file.name, size = file.size(), "File received");

    let backend = state.backend();
    tracing::info!(target_url = %backend.endpoint(), "Forwarding to scanner");

    let verdict = backend.scan(&file).await.map_err(|e| {
        if let BackendError::Rejected { status, body } = &e {
            tracing::error!(status, %body, "Backend error");
        }
        ApiError::from(e)
    })?;

    tracing::info!(?verdict, "Backend response");

    let result = ScanResult::from_verdict(&file, verdict, Utc::now());

    tracing::info!(
        analysis_id = %result.analysis_id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Scan completed"
    );

    Ok(Json(result))
}

/// GET /scan
/// Always 405; the route only scans on POST
pub async fn scan_usage() -> (StatusCode, Json<UsageResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(UsageResponse {
            message: USAGE_MESSAGE.to_string(),
        }),
    )
}

/// Read the first `file` field from the form, skipping any other field.
///
/// Returns `Ok(None)` when the form has no such field.
async fn extract_file(mut multipart: Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        return Ok(Some(UploadedFile::new(name, content_type, data)));
    }

    Ok(None)
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::Unexpected(err.body_text())
    }
}
