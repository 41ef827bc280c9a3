//! Generation backend trait

use async_trait::async_trait;
use crate::error::Result;

/// Trait for prompt-to-text generation
///
/// Implementations:
/// - `GeminiBackend`: hosted Gemini model (gemini-1.5-flash)
/// - `LocalBackend`: locally served small model via Ollama
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text for a single-turn prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Characters of document text this backend accepts in a prompt
    fn prompt_prefix_chars(&self) -> usize;

    /// Check if the backend is reachable and configured
    async fn health_check(&self) -> Result<bool>;

    /// Get backend name for logging
    fn name(&self) -> &str;

    /// Get the model being used
    fn model(&self) -> &str;
}
