//! Observability setup for Terminal AI.

pub mod tracing_setup;
