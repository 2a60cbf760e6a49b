//! Infrastructure layer for Fingertips.
//!
//! Contains implementations of the ports defined in `fingertips-core`:
//! SQLite history storage, the OpenAI-compatible completion provider, and
//! configuration loading from the environment and `fingertips.toml`.

pub mod config;
pub mod llm;
pub mod sqlite;
