//! Response types

use serde::{Deserialize, Serialize};

/// Response for a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    /// Name the file was stored under
    pub filename: String,
}

/// Response for the file listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<String>,
}

/// Leading lines of a document's extracted text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentsResponse {
    pub arguments: Vec<String>,
}

/// Raw model output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub result: String,
}
