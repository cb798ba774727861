//! Configuration and per-provider defaults for OpenAI-compatible providers.
//!
//! Each provider that speaks the OpenAI chat completions protocol gets a
//! factory function returning an [`OpenAiCompatConfig`] with the correct
//! base URL.

/// Configuration for an OpenAI-compatible completion provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openrouter").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://openrouter.ai/api/v1").
    pub base_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier used when a request leaves the model empty.
    pub model: String,
}

/// OpenRouter default configuration.
///
/// Base URL: `https://openrouter.ai/api/v1` -- one key in front of many
/// underlying model vendors, which is why it is the default backend.
pub fn openrouter_defaults(api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openrouter".into(),
        base_url: "https://openrouter.ai/api/v1".into(),
        api_key: api_key.into(),
        model: model.into(),
    }
}

/// OpenAI default configuration.
///
/// Base URL: `https://api.openai.com/v1`
pub fn openai_defaults(api_key: &str, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key: api_key.into(),
        model: model.into(),
    }
}
