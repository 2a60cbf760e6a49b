//! Business logic and port definitions for Fingertips.
//!
//! This crate defines the "ports" (history store and LLM provider traits)
//! that the infrastructure layer implements, plus the conversation turn
//! handler that composes them. It depends only on `fingertips-types` --
//! never on `fingertips-infra` or any database/IO crate.

pub mod chat;
pub mod history;
pub mod llm;
