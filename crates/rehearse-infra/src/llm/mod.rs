//! Completion provider implementations.
//!
//! One provider serves every OpenAI-compatible chat-completions API
//! (OpenRouter, OpenAI) via configurable base URLs.

pub mod openai_compat;
