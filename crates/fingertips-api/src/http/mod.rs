//! HTTP API layer for Fingertips.
//!
//! Axum router exposing `POST /chat` and `GET /health`, with CORS and request
//! tracing.

pub mod error;
pub mod handlers;
pub mod router;
