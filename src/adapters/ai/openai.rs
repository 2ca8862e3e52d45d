//! OpenAI-compatible implementation of the LanguageModel port.
//!
//! Talks to a chat-completions endpoint over HTTPS. Every call carries an
//! explicit timeout (default 30 s); the pipeline issues calls strictly
//! sequentially, so there is no streaming and no connection fan-out.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAiConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let model = OpenAiModel::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::{AiConfig, ValidationError};
use crate::ports::{
    CompletionRequest, CompletionResponse, LanguageModel, LanguageModelError, MessageRole,
};

/// Configuration for the OpenAI-compatible adapter.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model identifier (e.g. "gpt-4o").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Per-call timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Creates a configuration with the given API key and defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds adapter configuration from the application AI section.
    pub fn from_app_config(ai: &AiConfig) -> Result<Self, ValidationError> {
        ai.validate()?;
        let api_key = ai.openai_api_key.clone().unwrap_or_default();
        Ok(Self::new(api_key)
            .with_model(ai.model.clone())
            .with_timeout(ai.timeout()))
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI-compatible chat-completions client.
pub struct OpenAiModel {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiModel {
    /// Creates a client with the configured timeout baked in.
    pub fn new(config: OpenAiConfig) -> Result<Self, LanguageModelError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LanguageModelError::network(format!("client build failed: {e}")))?;
        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_wire_request(&self, request: &CompletionRequest) -> WireRequest {
        let messages = request
            .messages
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    MessageRole::System => "system",
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: m.content.clone(),
            })
            .collect();

        WireRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    async fn send(&self, request: &CompletionRequest) -> Result<Response, LanguageModelError> {
        let wire = self.to_wire_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&wire)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LanguageModelError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    LanguageModelError::network(format!("connection failed: {e}"))
                } else {
                    LanguageModelError::network(e.to_string())
                }
            })
    }

    async fn check_status(&self, response: Response) -> Result<Response, LanguageModelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 => Err(LanguageModelError::AuthenticationFailed),
            429 => Err(LanguageModelError::RateLimited {
                retry_after_secs: Self::parse_retry_after(&error_body),
            }),
            400 => Err(LanguageModelError::InvalidRequest(error_body)),
            500..=599 => Err(LanguageModelError::unavailable(format!(
                "server error {status}: {error_body}"
            ))),
            _ => Err(LanguageModelError::network(format!(
                "unexpected status {status}: {error_body}"
            ))),
        }
    }

    /// Pulls "try again in Xs" out of a rate-limit error body; defaults to
    /// 30 s when absent.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(msg) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                if let Some(idx) = msg.find("try again in ") {
                    let rest = &msg[idx + 13..];
                    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                    if let Ok(secs) = digits.parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
        30
    }

    async fn parse_response(
        &self,
        response: Response,
    ) -> Result<CompletionResponse, LanguageModelError> {
        let response = self.check_status(response).await?;

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| LanguageModelError::parse(format!("response body: {e}")))?;

        let choice = wire
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LanguageModelError::parse("no choices in response"))?;

        Ok(CompletionResponse {
            content: choice.message.content.trim().to_string(),
            model: wire.model,
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LanguageModelError> {
        tracing::debug!(
            purpose = ?request.metadata.purpose,
            trace_id = %request.metadata.trace_id,
            model = %self.config.model,
            "issuing completion call"
        );
        let response = self.send(&request).await?;
        self.parse_response(response).await
    }
}

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::CallPurpose;

    #[test]
    fn wire_request_carries_roles_and_model() {
        let config = OpenAiConfig::new("sk-test").with_model("gpt-4o");
        let model = OpenAiModel::new(config).unwrap();

        let request = CompletionRequest::new(CallPurpose::EmailDraft)
            .with_system("write politely")
            .with_user("my VPN dropped")
            .with_temperature(0.5);
        let wire = model.to_wire_request(&request);

        assert_eq!(wire.model, "gpt-4o");
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.temperature, Some(0.5));
        assert_eq!(wire.max_tokens, None);
    }

    #[test]
    fn adapter_config_comes_from_the_app_section() {
        let ai = AiConfig {
            openai_api_key: Some("sk-test".to_string()),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 10,
        };
        let config = OpenAiConfig::from_app_config(&ai).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout, Duration::from_secs(10));

        let missing_key = AiConfig::default();
        assert!(OpenAiConfig::from_app_config(&missing_key).is_err());
    }

    #[test]
    fn retry_after_parses_from_error_body() {
        let body = r#"{"error":{"message":"Rate limit reached, try again in 17s."}}"#;
        assert_eq!(OpenAiModel::parse_retry_after(body), 17);
    }

    #[test]
    fn retry_after_defaults_to_thirty() {
        assert_eq!(OpenAiModel::parse_retry_after("not json"), 30);
        assert_eq!(OpenAiModel::parse_retry_after(r#"{"error":{}}"#), 30);
    }

    #[test]
    fn wire_response_deserializes() {
        let body = r#"{
            "model": "gpt-4o",
            "choices": [{"message": {"role": "assistant", "content": "  hello  "}}]
        }"#;
        let wire: WireResponse = serde_json::from_str(body).unwrap();
        assert_eq!(wire.model, "gpt-4o");
        assert_eq!(wire.choices[0].message.content, "  hello  ");
    }
}
