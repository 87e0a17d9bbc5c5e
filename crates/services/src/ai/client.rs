use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ai::config::ModelConfig;
use crate::error::ModelError;

/// A text-in, text-out language model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send `prompt` and return the raw response text.
    ///
    /// # Errors
    ///
    /// Returns `ModelError` when the model is unavailable or the request fails.
    async fn complete(&self, prompt: &str) -> Result<String, ModelError>;
}

/// `ModelClient` for any OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    config: Option<ModelConfig>,
}

impl ChatCompletionsClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ModelConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<ModelConfig>) -> Self {
        let built = config
            .as_ref()
            .map(|c| Client::builder().timeout(c.timeout).build());
        let client = match built {
            Some(Ok(client)) => client,
            Some(Err(err)) => {
                tracing::warn!(
                    error = %err,
                    "http client with timeout unavailable, using defaults"
                );
                Client::new()
            }
            None => Client::new(),
        };
        Self { client, config }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.model.as_str())
    }
}

#[async_trait]
impl ModelClient for ChatCompletionsClient {
    async fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        let config = self.config.as_ref().ok_or(ModelError::NotConfigured)?;

        let payload = ChatRequest {
            model: &config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.2,
        };

        tracing::debug!(
            model = %config.model,
            prompt_len = prompt.len(),
            "sending chat completion"
        );
        let response = self
            .client
            .post(config.completions_url())
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::HttpStatus { status, body });
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ModelError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_client_fails_fast() {
        let client = ChatCompletionsClient::new(None);
        assert!(!client.enabled());
        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, ModelError::NotConfigured));
        assert!(!err.is_retryable());
    }

    #[test]
    fn configured_client_keeps_model_and_timeout() {
        let config = ModelConfig {
            base_url: "http://localhost:9".into(),
            api_key: "k".into(),
            model: "gemini-1.5-flash".into(),
            timeout: std::time::Duration::from_millis(250),
        };
        let client = ChatCompletionsClient::new(Some(config));
        assert!(client.enabled());
        assert_eq!(client.model(), Some("gemini-1.5-flash"));
    }

    #[tokio::test]
    async fn timeout_applies_to_unreachable_endpoint() {
        let config = ModelConfig {
            base_url: "http://10.255.255.1:81".into(),
            api_key: "k".into(),
            model: "m".into(),
            timeout: std::time::Duration::from_millis(50),
        };
        let client = ChatCompletionsClient::new(Some(config));
        let started = std::time::Instant::now();
        let err = client.complete("hello").await.unwrap_err();
        assert!(matches!(err, ModelError::Http(_)));
        assert!(err.is_retryable());
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn request_serializes_as_chat_completion() {
        let payload = ChatRequest {
            model: "gemini-1.5-flash",
            messages: vec![ChatMessage {
                role: "user",
                content: "prompt",
            }],
            temperature: 0.2,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["model"], "gemini-1.5-flash");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "prompt");
    }

    #[test]
    fn response_without_content_decodes() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(body.choices[0].message.content.is_none());
    }
}
