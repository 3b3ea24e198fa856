//! OpenRouter chat completion client.

use super::CompletionBackend;
use crate::models::config::OpenRouterConfig;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenRouter API client.
pub struct OpenRouterClient {
    config: OpenRouterConfig,
    api_key: String,
    client: reqwest::Client,
}

/// Chat message.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat completion request payload.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

/// Chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ResponseMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Content of the first choice, if any choice was returned.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
    }
}

impl OpenRouterClient {
    /// Create a client from configuration.
    ///
    /// Fails with [`crate::Error::OpenRouterApiKeyMissing`] when no key is set.
    pub fn with_config(config: OpenRouterConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(crate::Error::OpenRouterApiKeyMissing)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Model this client sends requests to.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a single-message chat completion and return the raw response.
    pub async fn chat(&self, prompt: &str) -> Result<ChatResponse> {
        let request = ChatRequest {
            model: &self.config.model,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp)
    }
}

impl CompletionBackend for OpenRouterClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.chat(prompt)
            .await?
            .first_content()
            .ok_or(crate::Error::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "x-ai/grok-4-fast",
            temperature: 0.2,
            max_tokens: 400,
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "x-ai/grok-4-fast");
        assert_eq!(value["max_tokens"], 400);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_first_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": "{\"filename\": \"A.mkv\"}"}}]}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.first_content().as_deref(), Some(r#"{"filename": "A.mkv"}"#));

        let resp: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(resp.first_content().is_none());

        let resp: ChatResponse = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(resp.first_content().is_none());
    }

    #[test]
    fn test_missing_key_rejected() {
        let result = OpenRouterClient::with_config(OpenRouterConfig::default());
        assert!(matches!(result, Err(crate::Error::OpenRouterApiKeyMissing)));
    }

    #[test]
    fn test_client_with_key() {
        let config = OpenRouterConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let client = OpenRouterClient::with_config(config).unwrap();
        assert_eq!(client.model(), "x-ai/grok-4-fast");
    }
}
