//! # Index Cursor
//!
//! The durable bookmark of the last fully indexed block height. Starts
//! at 0 (pre-genesis) and only ever advances by exactly one, after the
//! block's annotated records are durably committed.

use serde::{Deserialize, Serialize};

/// Last fully indexed block height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct IndexCursor {
    pub height: u64,
}

impl IndexCursor {
    pub fn new(height: u64) -> Self {
        Self { height }
    }

    /// The next height to fetch.
    pub fn next(&self) -> u64 {
        self.height + 1
    }

    /// Whether a commit at `height` is the legal successor.
    pub fn accepts(&self, height: u64) -> bool {
        height == self.next()
    }
}
