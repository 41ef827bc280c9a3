//! PDF text extraction

use async_trait::async_trait;
use std::path::Path;

use crate::error::{Error, Result};

/// Turns a stored document into plain text
///
/// Implementations:
/// - `PdfTextExtractor`: pdf-extract on the blocking thread pool
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the full text of the file at `path`
    async fn extract(&self, path: &Path) -> Result<String>;

    /// Get extractor name for logging
    fn name(&self) -> &str;
}

/// PDF extractor backed by the `pdf-extract` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text from in-memory PDF bytes (blocking)
    pub fn extract_from_mem(filename: &str, data: &[u8]) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::extraction(filename, e.to_string()))?;
        Ok(text.replace('\0', ""))
    }
}

/// Run a blocking extraction job on the blocking thread pool.
///
/// pdf-extract panics on some malformed fonts. With the unwinding panic
/// strategy the panic comes back as a `JoinError` and is reported as an
/// extraction failure for `filename`; under `panic = "abort"` it would take
/// the whole server down instead, so the release profile must not set it.
async fn run_blocking<F>(filename: &str, job: F) -> Result<String>
where
    F: FnOnce() -> Result<String> + Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| Error::extraction(filename, format!("extraction task failed: {}", e)))?
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let data = tokio::fs::read(path).await?;
        tracing::debug!("Extracting text from {} ({} bytes)", filename, data.len());

        let task_filename = filename.clone();
        let text = run_blocking(&filename, move || {
            Self::extract_from_mem(&task_filename, &data)
        })
        .await?;

        tracing::debug!("Extracted {} characters from {}", text.chars().count(), filename);
        Ok(text)
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}
