use thiserror::Error;

use crate::llm::LlmError;

/// Errors from interview session operations.
///
/// Validation variants are always local and never reach the provider;
/// `Gateway` wraps a provider failure that interrupted a transition.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("job title must not be empty")]
    EmptyJobTitle,

    #[error("question count must be between 1 and {max}, got {requested}")]
    QuestionCountOutOfRange { requested: u8, max: u8 },

    #[error("answer must not be empty")]
    EmptyAnswer,

    #[error("no question is awaiting an answer")]
    NoPendingQuestion,

    #[error("interview has not been started")]
    NotStarted,

    #[error("interview is already completed")]
    AlreadyCompleted,

    #[error(transparent)]
    Gateway(#[from] LlmError),
}

impl SessionError {
    /// Whether resubmitting the identical user action can succeed.
    pub fn is_retriable(&self) -> bool {
        match self {
            SessionError::Gateway(err) => err.is_retriable(),
            _ => false,
        }
    }
}

/// Errors from transcript store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_display() {
        let err = SessionError::QuestionCountOutOfRange {
            requested: 12,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "question count must be between 1 and 10, got 12"
        );
    }

    #[test]
    fn test_gateway_error_is_transparent() {
        let err = SessionError::Gateway(LlmError::AuthenticationFailed);
        assert_eq!(err.to_string(), "authentication failed: check your API key");
    }

    #[test]
    fn test_retriable_classification() {
        assert!(
            SessionError::Gateway(LlmError::RateLimited { retry_after_ms: None }).is_retriable()
        );
        assert!(!SessionError::Gateway(LlmError::EmptyCredential).is_retriable());
        assert!(!SessionError::EmptyAnswer.is_retriable());
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
