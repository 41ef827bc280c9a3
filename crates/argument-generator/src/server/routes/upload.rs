//! Upload endpoint

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::UploadResponse;

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

/// POST /upload - Store a PDF in the upload directory
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>> {
    let mut multipart =
        multipart.map_err(|e| Error::invalid_input(format!("No file uploaded: {}", e)))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_input(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("upload_{}.pdf", Uuid::new_v4()));

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::invalid_input(format!("Failed to read file: {}", e)))?;

        tracing::info!("Received upload: {} ({} bytes)", filename, data.len());

        let stored = state.store().store(&filename, &data).await?;

        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            filename: stored,
        }));
    }

    Err(Error::invalid_input("No file uploaded"))
}
