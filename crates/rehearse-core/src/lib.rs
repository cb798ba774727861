//! Interview engine and port trait definitions for Rehearse.
//!
//! This crate owns the session state machine, the prompt builder, and the
//! "ports" (`LlmProvider`, `TranscriptStore`) that the infrastructure layer
//! implements. It depends only on `rehearse-types` -- never on
//! `rehearse-infra` or any network/database crate.

pub mod llm;
pub mod prompt;
pub mod session;
pub mod transcript;
