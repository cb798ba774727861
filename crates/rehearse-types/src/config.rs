//! Global application configuration.
//!
//! Loaded from `{data_dir}/config.toml` by the infrastructure layer;
//! every field falls back to a default so a missing or partial file is
//! never an error.

use serde::{Deserialize, Serialize};

/// Application-wide defaults applied when a session does not override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Model identifier used when none is given on the command line.
    pub default_model: String,
    /// Question count used when none is given on the command line.
    pub default_question_count: u8,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_model: "z-ai/glm-4.5-air".to_string(),
            default_question_count: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GlobalConfig::default();
        assert_eq!(config.default_model, "z-ai/glm-4.5-air");
        assert_eq!(config.default_question_count, 3);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let config: GlobalConfig = serde_json::from_str(r#"{"default_question_count":5}"#).unwrap();
        assert_eq!(config.default_question_count, 5);
        assert_eq!(config.default_model, "z-ai/glm-4.5-air");
    }
}
