//! Local generation backend served by Ollama

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LocalModelConfig;
use crate::error::{Error, Result};

use super::llm::GenerationBackend;

/// Small local model with bounded output length
pub struct LocalBackend {
    client: Client,
    base_url: String,
    model: String,
    max_new_tokens: u32,
    prompt_prefix_chars: usize,
}

#[derive(Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl LocalBackend {
    /// Create a new local backend
    pub fn new(config: &LocalModelConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_new_tokens: config.max_new_tokens,
            prompt_prefix_chars: config.prompt_prefix_chars,
        })
    }

    fn build_request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                num_predict: self.max_new_tokens,
            },
        }
    }
}

#[async_trait]
impl GenerationBackend for LocalBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = self.build_request(prompt);

        tracing::info!(
            "Generating with local model: {} (max {} tokens)",
            self.model,
            self.max_new_tokens
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Generation failed: HTTP {} - {}",
                status, body
            )));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse generation response: {}", e)))?;

        Ok(generate_response.response)
    }

    fn prompt_prefix_chars(&self) -> usize {
        self.prompt_prefix_chars
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "local"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
