use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use papergist_core::pipeline::PipelineError;

use crate::models::{ErrorResponse, SummarizeResponse};
use crate::state::AppState;
use crate::upload::{self, FileType};

pub async fn summarize(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    match handle(state, multipart).await {
        Ok(summary) => Json(SummarizeResponse { summary }).into_response(),
        Err((status, message)) => {
            tracing::warn!(%status, %message, "summarize request failed");
            (status, Json(ErrorResponse::new(message))).into_response()
        }
    }
}

async fn handle(
    state: Arc<AppState>,
    multipart: Multipart,
) -> Result<String, (StatusCode, String)> {
    let fields = upload::parse_multipart(multipart)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let filename = fields.file.filename.clone();
    tracing::info!(%filename, "processing upload");

    let text = match fields.file.file_type {
        FileType::Text => String::from_utf8(fields.file.data)
            .map_err(|_| (StatusCode::BAD_REQUEST, "File is not valid UTF-8 text".to_string()))?,
        FileType::Pdf => {
            // Temp dir is auto-cleaned on drop
            let temp_dir = tempfile::tempdir().map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to create temp directory: {}", e),
                )
            })?;
            let pdf_path = temp_dir.path().join("upload.pdf");
            std::fs::write(&pdf_path, &fields.file.data).map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to write temp file: {}", e),
                )
            })?;
            extract_blocking(&pdf_path)
                .await
                .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, format!("{}: {}", filename, e)))?
        }
    };

    let mut config = state.config.clone();
    if let Some(mode) = fields.mode {
        config.mode = mode;
    }

    papergist_core::summarize_document(&text, state.backend.as_ref(), &state.client, &config, |_| {})
        .await
        .map_err(|e| {
            let status = match &e {
                PipelineError::NoText => StatusCode::UNPROCESSABLE_ENTITY,
                PipelineError::Config(_) => StatusCode::BAD_REQUEST,
                PipelineError::Model(_) => StatusCode::BAD_GATEWAY,
            };
            (status, e.to_string())
        })
}

/// Extract document text using blocking I/O (MuPDF is not async).
async fn extract_blocking(path: &std::path::Path) -> Result<String, String> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        papergist_ingest::extract_text(&path).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
}
