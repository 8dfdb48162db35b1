//! OpenAI-backed requirement generator.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::{PipelineError, PipelineResult};

use super::{user_prompt, TextGenerator, SYSTEM_PROMPT};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Generation backend settings, read from the environment.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub model_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl GenerationConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model_name: "gpt-4o-mini".to_string(),
            temperature: 0.2,
            max_tokens: 1000,
        }
    }

    /// Reads `OPENAI_API_KEY` (required) and optional overrides.
    pub fn from_env() -> PipelineResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            PipelineError::Generation("OPENAI_API_KEY is not set".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Ok(model) = std::env::var("REQSIFT_GENERATION_MODEL") {
            config.model_name = model;
        }
        Ok(config)
    }
}

/// Chat-completions client for requirement extraction.
pub struct OpenAiGenerator {
    client: Client,
    config: GenerationConfig,
}

impl OpenAiGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatRequestMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, transcript: &str) -> PipelineResult<String> {
        let start = Instant::now();
        let url = format!("{}/chat/completions", OPENAI_API_BASE);

        let request = ChatRequest {
            model: self.config.model_name.clone(),
            messages: vec![
                ChatRequestMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatRequestMessage {
                    role: "user".to_string(),
                    content: user_prompt(transcript),
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(model = %self.config.model_name, "sending generation request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Generation(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PipelineError::Generation(format!(
                "API returned {status}: {error_text}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Generation(format!("unparseable response: {e}")))?;

        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| PipelineError::Generation("response had no choices".to_string()))?;

        debug!(
            latency_ms = start.elapsed().as_millis() as u64,
            "generation complete"
        );

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GenerationConfig::new("sk-test".to_string());
        assert_eq!(config.model_name, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.max_tokens, 1000);
    }

    #[test]
    fn test_chat_request_shape() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatRequestMessage {
                role: "system".to_string(),
                content: "x".to_string(),
            }],
            temperature: 0.2,
            max_tokens: 1000,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["max_tokens"], 1000);
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"choices":[{"message":{"content":" ## Yêu cầu kỹ thuật "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.trim(),
            "## Yêu cầu kỹ thuật"
        );
    }
}
