//! Observability setup for Colloquy binaries.

pub mod tracing_setup;
