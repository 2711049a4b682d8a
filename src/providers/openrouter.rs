//! OpenRouter provider implementation for Chatvault
//!
//! Talks to the OpenAI-compatible `/chat/completions` endpoint exposed by
//! OpenRouter (or any server speaking the same dialect, selected through
//! `api_base`). One request per exchange; failures are reported, not retried.

use crate::config::OpenRouterConfig;
use crate::error::{ChatvaultError, Result};
use crate::providers::{CompletionResponse, Message, Provider, Role, TokenUsage};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OpenRouter API provider
///
/// # Examples
///
/// ```no_run
/// use chatvault::config::OpenRouterConfig;
/// use chatvault::providers::{Message, OpenRouterProvider, Provider};
///
/// # async fn example() -> chatvault::error::Result<()> {
/// let config = OpenRouterConfig {
///     api_key: Some("sk-or-...".to_string()),
///     ..OpenRouterConfig::default()
/// };
/// let provider = OpenRouterProvider::new(config)?;
/// let completion = provider.complete(&[Message::user("Hello!")]).await?;
/// println!("{}", completion.message.content);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OpenRouterProvider {
    client: Client,
    config: OpenRouterConfig,
    api_key: String,
}

/// Request body for `/chat/completions`
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

/// Response body of `/chat/completions`
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl OpenRouterProvider {
    /// Create a new OpenRouter provider instance
    ///
    /// # Errors
    ///
    /// Returns `MissingCredentials` when no API key is configured, or a
    /// provider error if the HTTP client cannot be built.
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        let api_key = match config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => {
                return Err(ChatvaultError::MissingCredentials(
                    "openrouter (set OPENROUTER_API_KEY or provider.openrouter.api_key)"
                        .to_string(),
                )
                .into())
            }
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("chatvault/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ChatvaultError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized OpenRouter provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Endpoint requests are posted to
    pub fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    fn status_error(status: StatusCode, body: &str) -> ChatvaultError {
        let detail = format!("OpenRouter returned error {}: {}", status, body);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ChatvaultError::Authentication(detail)
            }
            StatusCode::TOO_MANY_REQUESTS => ChatvaultError::RateLimited(detail),
            _ => ChatvaultError::Provider(detail),
        }
    }
}

#[async_trait]
impl Provider for OpenRouterProvider {
    async fn complete(&self, messages: &[Message]) -> Result<CompletionResponse> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
        };

        tracing::debug!(
            "Sending OpenRouter request: {} messages, model={}",
            messages.len(),
            self.config.model
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenRouter request failed: {}", e);
                ChatvaultError::Provider(format!("OpenRouter request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("OpenRouter returned error {}: {}", status, error_text);
            return Err(Self::status_error(status, &error_text).into());
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse OpenRouter response: {}", e);
            ChatvaultError::Provider(format!("Failed to parse OpenRouter response: {}", e))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                tracing::error!("OpenRouter response contained no message content");
                ChatvaultError::Provider("OpenRouter response contained no choices".to_string())
            })?;

        let message = Message {
            role: Role::Assistant,
            content,
        };

        let response = match body.usage {
            Some(usage) => {
                tracing::debug!(
                    "OpenRouter usage: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens,
                    usage.completion_tokens
                );
                CompletionResponse::with_usage(
                    message,
                    TokenUsage::new(usage.prompt_tokens, usage.completion_tokens),
                )
            }
            None => CompletionResponse::new(message),
        };

        Ok(response)
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: Option<&str>) -> OpenRouterConfig {
        OpenRouterConfig {
            api_key: key.map(str::to_string),
            ..OpenRouterConfig::default()
        }
    }

    #[test]
    fn test_openrouter_provider_creation() {
        let provider = OpenRouterProvider::new(config_with_key(Some("sk-test")));
        assert!(provider.is_ok());
    }

    #[test]
    fn test_openrouter_provider_requires_key() {
        let err = OpenRouterProvider::new(config_with_key(None)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChatvaultError>(),
            Some(ChatvaultError::MissingCredentials(_))
        ));
    }

    #[test]
    fn test_openrouter_provider_rejects_blank_key() {
        assert!(OpenRouterProvider::new(config_with_key(Some("   "))).is_err());
    }

    #[test]
    fn test_openrouter_provider_model() {
        let provider = OpenRouterProvider::new(config_with_key(Some("k"))).unwrap();
        assert_eq!(provider.model(), "openai/gpt-4o-mini");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = config_with_key(Some("k"));
        config.api_base = "http://localhost:9000/v1/".to_string();
        let provider = OpenRouterProvider::new(config).unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            OpenRouterProvider::status_error(StatusCode::UNAUTHORIZED, ""),
            ChatvaultError::Authentication(_)
        ));
        assert!(matches!(
            OpenRouterProvider::status_error(StatusCode::FORBIDDEN, ""),
            ChatvaultError::Authentication(_)
        ));
        assert!(matches!(
            OpenRouterProvider::status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            ChatvaultError::RateLimited(_)
        ));
        let err = OpenRouterProvider::status_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, ChatvaultError::Provider(_)));
        assert!(err.to_string().contains("upstream down"));
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![Message::system("be brief"), Message::user("hi")];
        let request = ChatCompletionRequest {
            model: "m",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "m",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hi"}
                ]
            })
        );
    }

    #[test]
    fn test_response_deserialization_without_usage() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"gen-1","choices":[{"index":0,"message":{"role":"assistant","content":"hey"}}]}"#,
        )
        .unwrap();
        assert_eq!(body.choices.len(), 1);
        assert_eq!(body.choices[0].message.content.as_deref(), Some("hey"));
        assert!(body.usage.is_none());
    }
}
