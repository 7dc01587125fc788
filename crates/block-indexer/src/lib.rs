//! # Block Indexer Subsystem
//!
//! The Block Indexer consumes newly confirmed ledger blocks exactly once
//! and builds a queryable, annotated transaction history. It pulls
//! blocks in strictly increasing height order from the external chain
//! source, applies every registered annotator to every transaction, and
//! commits the annotated records together with the advanced cursor in
//! one atomic unit.
//!
//! ## State machine
//!
//! ```text
//! Idle(h) → Fetching(h+1) → Annotating(h+1) → Committing(h+1) → Idle(h+1)
//! ```
//!
//! looping until shutdown; terminal only on cancellation or an
//! unrecoverable storage failure.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | Monotonic cursor | `commit_block` rejects any height except cursor+1 |
//! | INVARIANT-2 | No partial blocks | records and cursor commit in one atomic step |
//! | INVARIANT-3 | Crash-safe resume | restart re-reads the cursor and continues at cursor+1 |
//! | INVARIANT-4 | Merge order | fragments merge in registration order, never completion order |
//! | INVARIANT-5 | Single writer | a storage-level lease guards cursor advancement |
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): cursor arithmetic, annotator registry; no I/O
//! - **Ports Layer** (`ports/`): `ChainSource` and `IndexStore` traits
//! - **Adapters Layer** (`adapters/`): in-memory implementations
//! - **Service** (`service.rs`): the fetch/annotate/commit loop

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::IndexerConfig;

pub use domain::{AnnotationOutcome, AnnotatorRegistry, IndexCursor, IndexError};

pub use ports::{ChainError, ChainSource, IndexStore, IndexStoreError, WriterLease};

pub use adapters::{InMemoryIndexStore, StaticChainSource};

pub use service::{BlockIndexer, StepOutcome};
