//! # Adapters Layer
//!
//! In-memory implementations of the indexer's outbound ports.

pub mod memory;

pub use memory::{InMemoryIndexStore, StaticChainSource};
