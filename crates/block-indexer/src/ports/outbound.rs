//! # Outbound Ports (Driven Ports)
//!
//! Interfaces the indexer depends on: the consensus/networking layer
//! that produces blocks, and the storage engine backing the index.

use crate::domain::IndexError;
use async_trait::async_trait;
use shared_types::{AnnotatedTransaction, Block};
use thiserror::Error;

/// External chain source.
///
/// Blocks are immutable once produced and addressed by strictly
/// increasing height starting at 1. Fetching may suspend (the requested
/// block may not be produced yet); implementations must not hold any
/// storage transaction open across that suspension.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Get the block at `height`. `Ok(None)` means not yet produced —
    /// the indexer retries with backoff rather than failing.
    async fn get_block(&self, height: u64) -> Result<Option<Block>, ChainError>;
}

/// Chain source errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChainError {
    /// Fetch-side failure. Triggers backoff-retry, never surfaced as an
    /// indexing failure.
    #[error("chain source unavailable: {0}")]
    Unavailable(String),
}

/// Transactional persistence of the annotated index.
///
/// `commit_block` must write the block's records and the advanced
/// cursor in one atomic operation; a crash mid-commit must leave the
/// index at the pre-commit cursor so the whole cycle can be retried.
pub trait IndexStore: Send + Sync {
    /// Last fully indexed height (0 before genesis).
    fn cursor(&self) -> Result<u64, IndexStoreError>;

    /// Atomically persist all annotated transactions of the block at
    /// `height` and advance the cursor to `height`. Rejects any height
    /// other than cursor+1 with [`IndexStoreError::CursorConflict`].
    fn commit_block(
        &self,
        height: u64,
        transactions: Vec<AnnotatedTransaction>,
    ) -> Result<(), IndexStoreError>;

    /// Annotated transactions with `from_height <= block_height <= to_height`,
    /// in (height, position) order.
    fn transactions(
        &self,
        from_height: u64,
        to_height: u64,
    ) -> Result<Vec<AnnotatedTransaction>, IndexStoreError>;

    /// Acquire the single-writer lease for this index. No two processes
    /// may advance the same cursor; the lease is released when the
    /// returned guard is dropped.
    fn try_acquire_writer(&self) -> Result<Box<dyn WriterLease>, IndexStoreError>;
}

/// Guard for the index's single-writer lease. Dropping it releases the
/// lease.
pub trait WriterLease: Send + Sync {}

/// Index store errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexStoreError {
    #[error("cursor conflict: cursor at {cursor}, commit at {attempted}")]
    CursorConflict { cursor: u64, attempted: u64 },

    #[error("writer lease already held")]
    WriterLockHeld,

    #[error("storage failure: {0}")]
    Io(String),
}

impl From<IndexStoreError> for IndexError {
    fn from(err: IndexStoreError) -> Self {
        match err {
            IndexStoreError::CursorConflict { cursor, attempted } => {
                IndexError::CursorConflict { cursor, attempted }
            }
            IndexStoreError::WriterLockHeld => IndexError::WriterLockHeld,
            IndexStoreError::Io(message) => IndexError::Storage(message),
        }
    }
}

impl From<ChainError> for IndexError {
    fn from(err: ChainError) -> Self {
        match err {
            ChainError::Unavailable(message) => IndexError::ChainUnavailable(message),
        }
    }
}
