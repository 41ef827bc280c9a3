//! argument-generator: PDF upload service that summarizes a paper's arguments
//!
//! Uploaded PDFs are kept in a local directory. On request their text is
//! extracted and either returned as raw leading lines or handed to a
//! generative model (hosted Gemini or a local Ollama model) together with a
//! fixed instruction asking for the top arguments as bullet points.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod server;
pub mod types;

pub use config::{AppConfig, BackendProvider};
pub use error::{Error, ErrorKind, Result};
pub use server::{build_router, state::AppState, ArgumentServer};
