//! Multi-turn chat: the in-memory session store and the service that drives
//! one conversation turn against a [`ChatProvider`](crate::llm::provider::ChatProvider).

pub mod service;
pub mod store;
