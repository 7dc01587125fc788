//! # Domain Errors
//!
//! Error types for the block indexing subsystem. Chain unavailability
//! triggers backoff-retry in the outer loop; storage failures are fatal
//! to the current commit and never advance the cursor.

use thiserror::Error;

/// Errors surfaced by indexing operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    /// An annotator namespace was registered twice. Configuration
    /// error, caught before indexing starts.
    #[error("annotator namespace already registered: {0}")]
    DuplicateNamespace(String),

    /// The chain source could not be reached. Retried with backoff,
    /// never surfaced as failure by the run loop.
    #[error("chain source unavailable: {0}")]
    ChainUnavailable(String),

    /// The chain source returned a block at the wrong height.
    #[error("block height mismatch: requested {requested}, chain returned {got}")]
    HeightMismatch { requested: u64, got: u64 },

    /// A commit was attempted at a height other than cursor+1. Under
    /// the single-writer invariant this indicates a second indexer.
    #[error("cursor conflict: cursor at {cursor}, commit at {attempted}")]
    CursorConflict { cursor: u64, attempted: u64 },

    /// Another indexer holds the writer lease for this index.
    #[error("another indexer holds the writer lease")]
    WriterLockHeld,

    /// The index store failed. Fatal to the current cycle; the cursor
    /// does not advance.
    #[error("storage failure: {0}")]
    Storage(String),
}
