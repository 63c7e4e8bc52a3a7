//! Infrastructure implementations for Colloquy.
//!
//! Concrete [`ChatProvider`](colloquy_core::llm::provider::ChatProvider) and
//! [`TextProvider`](colloquy_core::llm::provider::TextProvider) implementations
//! over OpenAI-compatible APIs, the provider factory, and `config.toml` loading.

pub mod config;
pub mod llm;
