//! Shared domain types for Fingertips.
//!
//! This crate contains the core domain types used across the workspace:
//! conversation turns, the chat request/response pair, LLM request shapes,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod turn;
