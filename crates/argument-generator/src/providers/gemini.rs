//! Hosted Gemini backend via the Generative Language API
//!
//! Authenticates with an API key appended to the request URL. A missing key
//! is reported when `generate` is called, not when the backend is built.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::error::{Error, Result};

use super::llm::GenerationBackend;

/// Gemini generation backend
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    prompt_prefix_chars: usize,
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
            prompt_prefix_chars: config.prompt_prefix_chars,
        })
    }

    /// Endpoint URL without the key, safe to log
    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::llm(format!(
                "Gemini API key is not configured (set {})",
                crate::config::API_KEY_ENV
            ))
        })
    }

    fn build_request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl GenerationBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let request = self.build_request(prompt);

        tracing::info!("Generating with Gemini model: {}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::llm(format!("Gemini request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Gemini generation failed ({}): {}",
                status, body
            )));
        }

        let gen_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| Error::llm(format!("Failed to parse Gemini response: {}", e.without_url())))?;

        gen_response
            .into_text()
            .ok_or_else(|| Error::llm("No text in Gemini response"))
    }

    fn prompt_prefix_chars(&self) -> usize {
        self.prompt_prefix_chars
    }

    async fn health_check(&self) -> Result<bool> {
        let api_key = match self.api_key() {
            Ok(key) => key,
            Err(_) => return Ok(false),
        };

        let url = format!("{}/v1beta/models/{}", self.base_url, self.model);
        match self.client.get(url).query(&[("key", api_key)]).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(api_key: Option<&str>) -> GeminiBackend {
        let config = GeminiConfig {
            base_url: "http://127.0.0.1:9/".to_string(),
            api_key: api_key.map(str::to_string),
            ..GeminiConfig::default()
        };
        GeminiBackend::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_excludes_key() {
        let backend = backend(Some("secret"));
        assert_eq!(
            backend.endpoint(),
            "http://127.0.0.1:9/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(!backend.endpoint().contains("secret"));
    }

    #[test]
    fn test_request_shape() {
        let request = backend(None).build_request("Summarize this");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Summarize this");
        assert!(json["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"- A\n"},{"text":"- B"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("- A\n- B"));
    }

    #[test]
    fn test_blocked_response_has_no_text() {
        let response: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(response.into_text().is_none());

        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert!(response.into_text().is_none());
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_invocation() {
        let backend = backend(None);
        let err = backend.generate("prompt").await.unwrap_err();
        assert!(matches!(err, Error::Llm(_)));
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
        assert!(!backend.health_check().await.unwrap());
    }

    #[test]
    fn test_prefix_from_config() {
        assert_eq!(backend(None).prompt_prefix_chars(), 5000);
    }
}
