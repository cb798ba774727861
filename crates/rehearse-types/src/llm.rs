//! Completion provider request/response types for Rehearse.
//!
//! These types model the boundary with the external text-completion
//! provider: the request shape built by the prompt builder, the response
//! returned by the gateway, and the closed error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a message in a completion conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::System => write!(f, "system"),
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "system" => Ok(MessageRole::System),
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message in a completion conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Request to a completion provider.
///
/// `max_tokens` and `temperature` are chosen per request kind by the prompt
/// builder (short/varied for questions, longer/steadier for evaluation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Response from a completion provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
    pub usage: Usage,
}

/// Token usage for a completion request/response.
///
/// Observability only -- usage never affects control flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Errors from completion provider operations.
///
/// This is a closed taxonomy: every provider-side failure maps to exactly
/// one of these kinds so callers can decide between "resubmit the same
/// action" and "fix configuration first".
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No credential was supplied at all. Detected before any network call.
    #[error("no API key configured")]
    EmptyCredential,

    /// The supplied credential was rejected by the provider.
    #[error("authentication failed: check your API key")]
    AuthenticationFailed,

    /// The provider throttled the request. Wait and resubmit.
    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    /// Catch-all transient or unknown provider failure. Resubmittable.
    #[error("provider error: {message}")]
    Provider { message: String },
}

impl LlmError {
    /// Whether the identical request may simply be resubmitted.
    ///
    /// Credential problems are not retriable: the user must fix
    /// configuration before the same request can succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimited { .. } | LlmError::Provider { .. }
        )
    }
}
