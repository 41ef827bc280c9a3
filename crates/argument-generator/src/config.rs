//! Configuration for the argument generator
//!
//! Values come from the defaults below, then an optional TOML file, then the
//! process environment (a `.env` file is loaded by the binary before this
//! runs). The resulting [`AppConfig`] is handed to `AppState` explicitly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the hosted model API key
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable selecting the backend (`gemini` or `local`)
pub const BACKEND_ENV: &str = "ARGGEN_BACKEND";
/// Environment variable overriding the upload directory
pub const UPLOAD_DIR_ENV: &str = "ARGGEN_UPLOAD_DIR";
/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "ARGGEN_PORT";

/// Main service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation backend (gemini or local)
    #[serde(default)]
    pub backend: BackendProvider,
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upload storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Hosted Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
    /// Local model configuration
    #[serde(default)]
    pub local: LocalModelConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse TOML configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides using the given variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            self.gemini.api_key = Some(key);
        }

        if let Some(backend) = lookup(BACKEND_ENV) {
            match backend.parse() {
                Ok(backend) => self.backend = backend,
                Err(e) => tracing::warn!("Ignoring {}: {}", BACKEND_ENV, e),
            }
        }

        if let Some(dir) = lookup(UPLOAD_DIR_ENV).filter(|d| !d.is_empty()) {
            self.storage.upload_dir = PathBuf::from(dir);
        }

        if let Some(port) = lookup(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring {}: '{}' is not a port", PORT_ENV, port),
            }
        }
    }

    /// Model name of the active backend
    pub fn active_model(&self) -> &str {
        match self.backend {
            BackendProvider::Gemini => &self.gemini.model,
            BackendProvider::Local => &self.local.model,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum request body size in bytes (default: 100MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            enable_cors: true,
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Upload storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding uploaded files
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

/// Generation backend selection
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// Hosted Gemini model
    #[default]
    Gemini,
    /// Locally served model (Ollama)
    Local,
}

impl std::str::FromStr for BackendProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "hosted" => Ok(BackendProvider::Gemini),
            "local" | "ollama" => Ok(BackendProvider::Local),
            other => Err(format!("unknown backend '{}' (expected gemini or local)", other)),
        }
    }
}

impl std::fmt::Display for BackendProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendProvider::Gemini => f.write_str("gemini"),
            BackendProvider::Local => f.write_str("local"),
        }
    }
}

/// Hosted Gemini configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// API key; usually supplied through `GOOGLE_API_KEY`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Characters of extracted text included in the prompt
    pub prompt_prefix_chars: usize,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key: None,
            prompt_prefix_chars: 5000,
            temperature: 0.2,
            timeout_secs: 120,
        }
    }
}

/// Local model configuration (Ollama)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalModelConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Generation model name
    pub model: String,
    /// Upper bound on generated tokens
    pub max_new_tokens: u32,
    /// Characters of extracted text included in the prompt (smaller model, smaller input)
    pub prompt_prefix_chars: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LocalModelConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "qwen2.5:0.5b".to_string(),
            max_new_tokens: 150,
            prompt_prefix_chars: 1000,
            timeout_secs: 120,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend, BackendProvider::Gemini);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.gemini.prompt_prefix_chars, 5000);
        assert_eq!(config.local.prompt_prefix_chars, 1000);
        assert_eq!(config.local.max_new_tokens, 150);
        assert_eq!(config.local.model, "qwen2.5:0.5b");
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            backend = "local"

            [server]
            port = 8088

            [local]
            model = "phi3"
            "#,
        )
        .unwrap();

        assert_eq!(config.backend, BackendProvider::Local);
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.local.model, "phi3");
        assert_eq!(config.local.prompt_prefix_chars, 1000);
        assert_eq!(config.active_model(), "phi3");
    }

    #[test]
    fn test_invalid_toml() {
        let err = AppConfig::from_toml("backend = \"mainframe\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (API_KEY_ENV, "secret"),
            (BACKEND_ENV, "ollama"),
            (UPLOAD_DIR_ENV, "/tmp/papers"),
            (PORT_ENV, "6000"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_from(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.backend, BackendProvider::Local);
        assert_eq!(config.storage.upload_dir, PathBuf::from("/tmp/papers"));
        assert_eq!(config.server.port, 6000);
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_from(|key| match key {
            BACKEND_ENV => Some("mainframe".to_string()),
            PORT_ENV => Some("not-a-port".to_string()),
            API_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.backend, BackendProvider::Gemini);
        assert_eq!(config.server.port, 5000);
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn test_api_key_not_serialized() {
        let mut config = AppConfig::default();
        config.gemini.api_key = Some("secret".to_string());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
