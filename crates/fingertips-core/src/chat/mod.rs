//! Conversation turn handling: prompt assembly and the turn handler.

pub mod handler;
pub mod prompt;
