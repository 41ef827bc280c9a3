//! Application state for the argument server

use std::sync::Arc;

use crate::config::{AppConfig, BackendProvider};
use crate::error::Result;
use crate::ingestion::{PdfTextExtractor, TextExtractor};
use crate::providers::{
    GeminiBackend, GenerationBackend, LocalBackend, LocalUploadStore, UploadStore,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Upload directory
    store: Arc<dyn UploadStore>,
    /// PDF text extractor
    extractor: Arc<dyn TextExtractor>,
    /// Generation backend (Gemini or local)
    backend: Arc<dyn GenerationBackend>,
}

impl AppState {
    /// Create application state with the providers selected by `config`
    pub fn new(config: AppConfig) -> Result<Self> {
        tracing::info!("Initializing application state (backend: {})...", config.backend);

        let store = Arc::new(LocalUploadStore::new(config.storage.upload_dir.clone())?);
        tracing::info!(
            "Upload store {} ready at {}",
            store.name(),
            store.upload_dir().display()
        );

        let backend: Arc<dyn GenerationBackend> = match config.backend {
            BackendProvider::Gemini => {
                if config.gemini.api_key.is_none() {
                    tracing::warn!(
                        "No Gemini API key configured; /generate will fail until {} is set",
                        crate::config::API_KEY_ENV
                    );
                }
                Arc::new(GeminiBackend::new(&config.gemini)?)
            }
            BackendProvider::Local => Arc::new(LocalBackend::new(&config.local)?),
        };
        tracing::info!(
            "Generation backend: {} ({}), prompt prefix {} chars",
            backend.name(),
            backend.model(),
            backend.prompt_prefix_chars()
        );

        let extractor = Arc::new(PdfTextExtractor::new());
        tracing::info!("Text extractor: {}", extractor.name());

        Ok(Self::from_parts(config, store, extractor, backend))
    }

    /// Assemble state from already constructed providers
    pub fn from_parts(
        config: AppConfig,
        store: Arc<dyn UploadStore>,
        extractor: Arc<dyn TextExtractor>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                extractor,
                backend,
            }),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get upload store
    pub fn store(&self) -> &Arc<dyn UploadStore> {
        &self.inner.store
    }

    /// Get text extractor
    pub fn extractor(&self) -> &Arc<dyn TextExtractor> {
        &self.inner.extractor
    }

    /// Get generation backend
    pub fn backend(&self) -> &Arc<dyn GenerationBackend> {
        &self.inner.backend
    }
}
