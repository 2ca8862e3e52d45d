//! Language Model Port - the core's sole generative dependency.
//!
//! The contract is deliberately narrow: given a role-tagged message list,
//! return text (which callers may parse as structured JSON), possibly
//! failing transiently. Scope filtering, department classification, email
//! drafting and FAQ synthesis all go through this one port, so a single
//! test double covers the whole pipeline.
//!
//! Calls within one triage request are strictly sequential; there is no
//! streaming and no fan-out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Port for text classification/generation calls.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Runs one completion. Blocking from the caller's perspective: the
    /// next pipeline step does not start until this returns.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, LanguageModelError>;
}

/// What a completion call is for. Carried as metadata for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallPurpose {
    /// Off-topic pre-check before triage.
    ScopeCheck,
    /// Department classification.
    Classification,
    /// Support email drafting.
    EmailDraft,
    /// FAQ theme clustering.
    FaqDigest,
}

/// Request for one completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Role-tagged messages, system prompt included.
    pub messages: Vec<Message>,
    /// Sampling temperature; provider default when unset.
    pub temperature: Option<f32>,
    /// Cap on generated tokens; provider default when unset.
    pub max_tokens: Option<u32>,
    /// Tracing metadata.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    /// Creates an empty request for the given purpose.
    pub fn new(purpose: CallPurpose) -> Self {
        Self {
            messages: Vec::new(),
            temperature: None,
            max_tokens: None,
            metadata: RequestMetadata::new(purpose),
        }
    }

    /// Appends a system message.
    pub fn with_system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::system(content));
        self
    }

    /// Appends a user message.
    pub fn with_user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the generation cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// A role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who the message is attributed to.
    pub role: MessageRole,
    /// Message text.
    pub content: String,
}

impl Message {
    /// Creates a message with an explicit role.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }
}

/// Message attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Per-call tracing metadata.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// What the call is for.
    pub purpose: CallPurpose,
    /// Unique id for correlating logs.
    pub trace_id: Uuid,
}

impl RequestMetadata {
    /// Creates metadata with a fresh trace id.
    pub fn new(purpose: CallPurpose) -> Self {
        Self {
            purpose,
            trace_id: Uuid::new_v4(),
        }
    }
}

/// Response from one completion call.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text, whitespace-trimmed.
    pub content: String,
    /// Model that produced it.
    pub model: String,
}

/// Language model call failures. All variants are treated as transient
/// external-service errors by the triage pipeline: the caller may retry
/// the whole request.
#[derive(Debug, thiserror::Error)]
pub enum LanguageModelError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider returned a server-side failure.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Credential rejected.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Response body did not parse.
    #[error("parse error: {0}")]
    Parse(String),

    /// The provider rejected the request itself.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The explicit per-call timeout elapsed.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl LanguageModelError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
