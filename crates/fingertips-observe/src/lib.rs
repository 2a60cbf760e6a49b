//! Observability setup for Fingertips.

pub mod tracing_setup;
