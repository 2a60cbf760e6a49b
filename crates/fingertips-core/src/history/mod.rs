//! Conversation history persistence abstractions.
//!
//! Defines the `HistoryRepository` trait implemented by the infrastructure
//! layer, and an in-process implementation used by tests and local runs.

pub mod memory;
pub mod repository;
