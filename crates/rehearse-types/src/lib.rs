//! Shared domain types for Rehearse.
//!
//! This crate contains the core domain types used across the Rehearse
//! workspace: session configuration, interview turns and state, completion
//! request/response shapes, transcript records, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod config;
pub mod error;
pub mod interview;
pub mod llm;
pub mod transcript;
