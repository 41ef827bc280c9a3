//! Argument extraction and generation endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::path::PathBuf;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::generation::PromptBuilder;
use crate::ingestion::{leading_lines, MAX_ARGUMENTS};
use crate::server::state::AppState;
use crate::types::{ArgumentsResponse, FilenameRequest, GenerateResponse};

/// Validate the request and resolve the referenced upload
///
/// Fails before any extraction happens: 400 for a missing name, 404 for an unknown file.
async fn resolve_upload(
    state: &AppState,
    body: std::result::Result<Json<FilenameRequest>, JsonRejection>,
    missing_message: &str,
) -> Result<(String, PathBuf)> {
    let Json(request) = body.map_err(|e| {
        tracing::debug!("Unreadable request body: {}", e);
        Error::invalid_input(missing_message)
    })?;
    let filename = request.require_filename(missing_message)?;

    let path = state
        .store()
        .path(filename)
        .await?
        .ok_or_else(|| Error::not_found("File not found"))?;

    Ok((filename.to_string(), path))
}

/// POST /extract-arguments - First non-blank lines of the extracted text
pub async fn extract_arguments(
    State(state): State<AppState>,
    body: std::result::Result<Json<FilenameRequest>, JsonRejection>,
) -> Result<Json<ArgumentsResponse>> {
    let (filename, path) = resolve_upload(&state, body, "Filename not provided").await?;

    let text = state.extractor().extract(&path).await?;
    let arguments = leading_lines(&text, MAX_ARGUMENTS);

    tracing::info!("Extracted {} lines from {}", arguments.len(), filename);
    Ok(Json(ArgumentsResponse { arguments }))
}

/// POST /generate - Ask the generation backend for the paper's arguments
pub async fn generate_arguments(
    State(state): State<AppState>,
    body: std::result::Result<Json<FilenameRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>> {
    let (filename, path) = resolve_upload(&state, body, "Filename is required").await?;

    let text = state.extractor().extract(&path).await?;

    let backend = state.backend();
    let prompt = PromptBuilder::argument_prompt(&text, backend.prompt_prefix_chars());

    tracing::info!(
        "Generating arguments for {} with {} ({})",
        filename,
        backend.name(),
        backend.model()
    );
    let start = Instant::now();

    let result = backend.generate(&prompt).await?;

    tracing::info!(
        "Generated {} characters for {} in {:.1}s",
        result.chars().count(),
        filename,
        start.elapsed().as_secs_f64()
    );
    Ok(Json(GenerateResponse { result }))
}
