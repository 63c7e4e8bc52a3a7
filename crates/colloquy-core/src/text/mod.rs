//! Stateless single-shot text completion.

pub mod service;
