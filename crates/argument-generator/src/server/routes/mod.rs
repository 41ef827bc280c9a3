//! API routes for the argument server

pub mod arguments;
pub mod files;
pub mod upload;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Uploads
        .route("/upload", post(upload::upload_file))
        .route("/list-files", get(files::list_files))
        // Text extraction and generation
        .route("/extract-arguments", post(arguments::extract_arguments))
        .route("/generate", post(arguments::generate_arguments))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let backend = state.backend();

    Json(serde_json::json!({
        "name": "argument-generator",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Extracts text from uploaded PDFs and generates the paper's key arguments",
        "backend": {
            "name": backend.name(),
            "model": backend.model(),
            "prompt_prefix_chars": backend.prompt_prefix_chars(),
        },
        "endpoints": {
            "POST /upload": "Upload a PDF (multipart field 'file')",
            "GET /list-files": "List uploaded files",
            "POST /extract-arguments": "First lines of a file's extracted text",
            "POST /generate": "Generate bullet-point arguments with the configured model",
            "GET /health": "Liveness check"
        }
    }))
}
