//! # Annotation Types
//!
//! Annotated transaction records produced by the block indexer. Each
//! registered annotator contributes one fragment under its own namespace;
//! fragments from different namespaces never collide.

use crate::tags::TagValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One annotator's contribution for a single transaction.
pub type AnnotationFragment = BTreeMap<String, TagValue>;

/// Merged annotations for a transaction, keyed by annotator namespace.
pub type Annotations = BTreeMap<String, AnnotationFragment>;

/// An indexed transaction enriched with annotator output.
///
/// Immutable once written: the indexer commits all annotated transactions
/// of a block together with the advanced cursor in one atomic step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedTransaction {
    /// Height of the containing block.
    pub block_height: u64,
    /// Position within the block, starting at 0.
    pub tx_position: u32,
    /// The raw transaction bytes, persisted verbatim.
    pub raw_tx: Vec<u8>,
    /// Merged annotator fragments, keyed by namespace.
    pub annotations: Annotations,
}

/// A single annotator's failure for a single transaction.
///
/// Non-fatal to block progress: the indexer records the failure and
/// keeps the other annotators' fragments.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("annotator {namespace}: {message}")]
pub struct AnnotationError {
    /// Namespace of the failing annotator.
    pub namespace: String,
    /// Human-readable failure description.
    pub message: String,
}

impl AnnotationError {
    pub fn new(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            message: message.into(),
        }
    }
}
