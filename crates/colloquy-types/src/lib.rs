//! Shared domain types for Colloquy.
//!
//! This crate contains the core domain types used across the Colloquy workspace:
//! chat messages and roles, session identifiers, provider-facing shapes,
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod message;
