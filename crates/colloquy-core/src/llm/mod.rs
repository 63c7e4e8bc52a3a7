//! LLM provider abstractions for Colloquy.
//!
//! This module defines the core traits and utilities for provider integration:
//! - `ChatProvider` / `TextProvider`: RPITIT traits for concrete providers
//! - `BoxChatProvider` / `BoxTextProvider`: object-safe wrappers for dynamic dispatch
//! - `role`: total mapping from provider role vocabulary onto [`Role`](colloquy_types::message::Role)

pub mod box_provider;
pub mod provider;
pub mod role;
