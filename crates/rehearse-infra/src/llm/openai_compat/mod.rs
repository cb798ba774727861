//! OpenAI-compatible completion provider implementation.
//!
//! A single [`OpenAiCompatibleProvider`] serves OpenRouter and OpenAI from
//! one codebase via configurable base URLs and factory functions. Uses
//! [`async_openai`] for type-safe request/response handling. Requests are
//! non-streaming: the interview loop waits for each full completion.

pub mod config;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};

use rehearse_core::llm::provider::LlmProvider;
use rehearse_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
};

use self::config::OpenAiCompatConfig;

/// Unified provider for any OpenAI-compatible API.
///
/// # API Key Security
///
/// Does NOT derive Debug to prevent accidental exposure of the API key
/// stored inside the `async_openai::Client`.
pub struct OpenAiCompatibleProvider {
    client: Client<OpenAIConfig>,
    provider_name: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider from a configuration.
    ///
    /// An empty (or whitespace-only) API key fails with
    /// [`LlmError::EmptyCredential`] before any network call is possible.
    pub fn new(config: OpenAiCompatConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::EmptyCredential);
        }

        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            provider_name: config.provider_name,
            model: config.model,
        })
    }

    /// Create an OpenRouter provider (the default backend).
    pub fn openrouter(api_key: &str, model: &str) -> Result<Self, LlmError> {
        Self::new(config::openrouter_defaults(api_key, model))
    }

    /// Create an OpenAI provider.
    pub fn openai(api_key: &str, model: &str) -> Result<Self, LlmError> {
        Self::new(config::openai_defaults(api_key, model))
    }

    /// Build a [`CreateChatCompletionRequest`] from a generic
    /// [`CompletionRequest`].
    fn build_request(&self, request: &CompletionRequest) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> = Vec::new();

        if let Some(ref system) = request.system {
            messages.push(ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system.clone()),
                    name: None,
                },
            ));
        }

        for msg in &request.messages {
            let oai_msg = match msg.role {
                MessageRole::System => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage {
                        content: ChatCompletionRequestSystemMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::User => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage {
                        content: ChatCompletionRequestUserMessageContent::Text(
                            msg.content.clone(),
                        ),
                        name: None,
                    },
                ),
                MessageRole::Assistant => {
                    #[allow(deprecated)]
                    ChatCompletionRequestMessage::Assistant(
                        ChatCompletionRequestAssistantMessage {
                            content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                                msg.content.clone(),
                            )),
                            refusal: None,
                            name: None,
                            audio: None,
                            tool_calls: None,
                            function_call: None,
                        },
                    )
                }
            };
            messages.push(oai_msg);
        }

        // Use the model from the request if set, otherwise fall back to the
        // configured default.
        let model = if request.model.is_empty() {
            self.model.clone()
        } else {
            request.model.clone()
        };

        CreateChatCompletionRequest {
            model,
            messages,
            max_completion_tokens: Some(request.max_tokens),
            temperature: request.temperature.map(|t| t as f32),
            ..Default::default()
        }
    }
}

impl LlmProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.provider_name
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let oai_request = self.build_request(request);

        let response = self
            .client
            .chat()
            .create(oai_request)
            .await
            .map_err(map_openai_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
            usage,
        })
    }
}

/// Map an `async_openai::error::OpenAIError` into the closed [`LlmError`]
/// taxonomy.
fn map_openai_error(err: async_openai::error::OpenAIError) -> LlmError {
    use async_openai::error::OpenAIError;

    match &err {
        OpenAIError::ApiError(api_err) => {
            let code = api_err.code.as_deref().unwrap_or("");
            let error_type = api_err.r#type.as_deref().unwrap_or("");

            if code == "authentication_error"
                || error_type == "authentication_error"
                || api_err.message.contains("Incorrect API key")
                || api_err.message.contains("Invalid API key")
            {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited {
                    retry_after_ms: None,
                }
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        OpenAIError::Reqwest(reqwest_err) => {
            if let Some(status) = reqwest_err.status() {
                match status.as_u16() {
                    401 | 403 => LlmError::AuthenticationFailed,
                    429 => LlmError::RateLimited {
                        retry_after_ms: None,
                    },
                    _ => LlmError::Provider {
                        message: err.to_string(),
                    },
                }
            } else {
                LlmError::Provider {
                    message: err.to_string(),
                }
            }
        }
        _ => LlmError::Provider {
            message: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_types::llm::Message;

    #[test]
    fn test_openrouter_factory() {
        let provider = OpenAiCompatibleProvider::openrouter("sk-or-test", "z-ai/glm-4.5-air")
            .unwrap();
        assert_eq!(provider.name(), "openrouter");
        assert_eq!(provider.model, "z-ai/glm-4.5-air");
    }

    #[test]
    fn test_openai_factory() {
        let provider = OpenAiCompatibleProvider::openai("sk-test", "gpt-4o-mini").unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_empty_credential_rejected_before_any_call() {
        assert!(matches!(
            OpenAiCompatibleProvider::openrouter("", "m"),
            Err(LlmError::EmptyCredential)
        ));
        assert!(matches!(
            OpenAiCompatibleProvider::openrouter("   ", "m"),
            Err(LlmError::EmptyCredential)
        ));
    }

    #[test]
    fn test_build_request_messages() {
        let provider = OpenAiCompatibleProvider::openrouter("sk-or-test", "z-ai/glm-4.5-air")
            .unwrap();
        let request = CompletionRequest {
            model: "z-ai/glm-4.5-air".to_string(),
            system: Some("Be an interviewer".to_string()),
            messages: vec![Message::assistant("Q1"), Message::user("A1")],
            max_tokens: 150,
            temperature: Some(0.7),
        };

        let oai_req = provider.build_request(&request);
        assert_eq!(oai_req.model, "z-ai/glm-4.5-air");
        // 1 system + 2 conversation = 3 messages
        assert_eq!(oai_req.messages.len(), 3);
        assert_eq!(oai_req.max_completion_tokens, Some(150));
        assert_eq!(oai_req.temperature, Some(0.7));
    }

    #[test]
    fn test_build_request_empty_model_uses_default() {
        let provider = OpenAiCompatibleProvider::openrouter("sk-or-test", "z-ai/glm-4.5-air")
            .unwrap();
        let request = CompletionRequest {
            model: String::new(),
            system: None,
            messages: vec![Message::user("hi")],
            max_tokens: 150,
            temperature: None,
        };

        let oai_req = provider.build_request(&request);
        assert_eq!(oai_req.model, "z-ai/glm-4.5-air");
    }

    #[test]
    fn test_map_openai_error_api_auth() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Incorrect API key provided".to_string(),
            r#type: Some("authentication_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[test]
    fn test_map_openai_error_rate_limit() {
        use async_openai::error::{ApiError, OpenAIError};
        let api_err = ApiError {
            message: "Rate limit exceeded".to_string(),
            r#type: Some("rate_limit_error".to_string()),
            param: None,
            code: None,
        };
        let err = map_openai_error(OpenAIError::ApiError(api_err));
        assert!(matches!(err, LlmError::RateLimited { .. }));
    }

    #[test]
    fn test_map_openai_error_unknown_is_provider() {
        use async_openai::error::OpenAIError;
        let err = map_openai_error(OpenAIError::InvalidArgument("bad arg".to_string()));
        assert!(matches!(err, LlmError::Provider { .. }));
    }
}
