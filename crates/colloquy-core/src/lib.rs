//! Session management and completion services for Colloquy.
//!
//! This crate defines the provider "ports" (traits) that the infrastructure
//! layer implements, plus the in-memory session store and the chat and text
//! completion services built on top of them. It depends only on
//! `colloquy-types` -- never on `colloquy-infra` or any SDK crate.

pub mod chat;
pub mod llm;
pub mod text;
