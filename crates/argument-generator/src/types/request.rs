//! Request types

use serde::Deserialize;

use crate::error::{Error, Result};

/// Body of `/extract-arguments` and `/generate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilenameRequest {
    /// Name of a previously uploaded file
    #[serde(default)]
    pub filename: Option<String>,
}

impl FilenameRequest {
    /// Return the filename, or an input error with `message` when missing or blank
    pub fn require_filename(&self, message: &str) -> Result<&str> {
        self.filename
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| Error::invalid_input(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_filename() {
        let req: FilenameRequest = serde_json::from_str(r#"{"filename": "paper.pdf"}"#).unwrap();
        assert_eq!(req.require_filename("missing").unwrap(), "paper.pdf");

        let req: FilenameRequest = serde_json::from_str("{}").unwrap();
        assert!(req.require_filename("missing").is_err());

        let req: FilenameRequest = serde_json::from_str(r#"{"filename": "  "}"#).unwrap();
        let err = req.require_filename("Filename is required").unwrap_err();
        assert_eq!(err.to_string(), "Filename is required");
    }
}
