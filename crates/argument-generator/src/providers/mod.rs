//! Provider abstractions for text generation and upload storage
//!
//! This module provides trait-based abstractions that allow switching between
//! the hosted (Gemini) and local (Ollama) generation backends, and keep the
//! upload directory behind an interface handlers can be tested against.

pub mod gemini;
pub mod llm;
pub mod local;
pub mod ollama;
pub mod upload_store;

pub use gemini::GeminiBackend;
pub use llm::GenerationBackend;
pub use local::LocalUploadStore;
pub use ollama::LocalBackend;
pub use upload_store::UploadStore;
