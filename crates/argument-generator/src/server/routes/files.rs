//! File listing endpoint

use axum::{extract::State, Json};

use crate::error::Result;
use crate::server::state::AppState;
use crate::types::FileListResponse;

/// GET /list-files - List uploaded files
pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>> {
    let files = state.store().list().await?;
    Ok(Json(FileListResponse { files }))
}
