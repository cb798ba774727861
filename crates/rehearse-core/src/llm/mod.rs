//! Completion provider abstraction for Rehearse.
//!
//! Defines the `LlmProvider` trait that concrete provider implementations
//! (in `rehearse-infra`) fulfil. The engine issues one request at a time
//! and awaits each to completion; there is no streaming path.

pub mod provider;
