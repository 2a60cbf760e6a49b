//! LLM provider abstractions for Fingertips.
//!
//! - `LlmProvider`: RPITIT trait for concrete provider implementations
//! - `BoxLlmProvider`: owned, type-erased provider chosen at startup

pub mod box_provider;
pub mod provider;
