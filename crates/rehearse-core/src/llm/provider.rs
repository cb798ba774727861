//! LlmProvider trait definition.
//!
//! The single abstraction over the external text-completion service.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use rehearse_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for completion provider backends.
///
/// Implementations live in `rehearse-infra` (e.g.
/// `OpenAiCompatibleProvider`). A provider is a stateless transport:
/// request in, text out, or one of the closed `LlmError` kinds. Retry
/// policy belongs to the caller, never to the provider.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
