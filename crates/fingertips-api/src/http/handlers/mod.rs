//! Route handlers.

pub mod chat;
