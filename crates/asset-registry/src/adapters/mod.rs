//! # Adapters Layer
//!
//! In-memory implementations of the registry's outbound ports.

pub mod memory;

pub use memory::{InMemoryAssetStore, InMemorySignerService};
