//! Upload store trait for received documents

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Trait for upload storage
///
/// Implementations:
/// - `LocalUploadStore`: plain files in a local directory
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Store a file, overwriting any existing file of the same name
    ///
    /// Returns the name the file was stored under
    async fn store(&self, filename: &str, data: &[u8]) -> Result<String>;

    /// List stored filenames (no guaranteed order)
    async fn list(&self) -> Result<Vec<String>>;

    /// Resolve a stored file to a path, `None` if it was never uploaded
    ///
    /// Names with directory components never resolve, even when their last
    /// component matches a stored file.
    async fn path(&self, filename: &str) -> Result<Option<PathBuf>>;

    /// Get store name for logging
    fn name(&self) -> &str;
}

/// Reduce a client-supplied filename to its final path component
///
/// `../../etc/passwd` becomes `passwd`; names with nothing usable are rejected.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::invalid_input(format!("Invalid filename: '{}'", filename)));
    }

    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("paper.pdf").unwrap(), "paper.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\thesis.pdf").unwrap(), "thesis.pdf");
        assert_eq!(sanitize_filename("my paper (v2).pdf").unwrap(), "my paper (v2).pdf");
    }

    #[test]
    fn test_sanitize_rejects_empty_names() {
        for bad in ["", "  ", "..", ".", "dir/", "/"] {
            assert!(sanitize_filename(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
