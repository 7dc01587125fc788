//! # Ports Layer
//!
//! Outbound interfaces required by the indexer: the external chain
//! source and the transactional index store.

pub mod outbound;

pub use outbound::{ChainError, ChainSource, IndexStore, IndexStoreError, WriterLease};
