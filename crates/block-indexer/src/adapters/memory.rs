//! # In-Memory Adapters
//!
//! In-memory index store and a pre-produced chain source for unit tests
//! and fixtures. A single mutex over cursor plus records gives the
//! commit its atomicity; production uses a transactional storage engine
//! and an advisory lock for the writer lease.

use crate::domain::IndexCursor;
use crate::ports::{ChainError, ChainSource, IndexStore, IndexStoreError, WriterLease};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{AnnotatedTransaction, Block};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct IndexInner {
    cursor: IndexCursor,
    records: Vec<AnnotatedTransaction>,
}

/// In-memory index store.
#[derive(Default)]
pub struct InMemoryIndexStore {
    inner: Mutex<IndexInner>,
    writer_held: Arc<AtomicBool>,
}

impl InMemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of annotated transactions committed.
    pub fn record_count(&self) -> usize {
        self.inner.lock().records.len()
    }
}

struct MemoryWriterLease {
    held: Arc<AtomicBool>,
}

impl WriterLease for MemoryWriterLease {}

impl Drop for MemoryWriterLease {
    fn drop(&mut self) {
        self.held.store(false, Ordering::SeqCst);
    }
}

impl IndexStore for InMemoryIndexStore {
    fn cursor(&self) -> Result<u64, IndexStoreError> {
        Ok(self.inner.lock().cursor.height)
    }

    fn commit_block(
        &self,
        height: u64,
        transactions: Vec<AnnotatedTransaction>,
    ) -> Result<(), IndexStoreError> {
        let mut inner = self.inner.lock();
        if !inner.cursor.accepts(height) {
            return Err(IndexStoreError::CursorConflict {
                cursor: inner.cursor.height,
                attempted: height,
            });
        }
        // Records and cursor change under one guard: all or nothing.
        inner.records.extend(transactions);
        inner.cursor = IndexCursor::new(height);
        Ok(())
    }

    fn transactions(
        &self,
        from_height: u64,
        to_height: u64,
    ) -> Result<Vec<AnnotatedTransaction>, IndexStoreError> {
        let inner = self.inner.lock();
        Ok(inner
            .records
            .iter()
            .filter(|r| r.block_height >= from_height && r.block_height <= to_height)
            .cloned()
            .collect())
    }

    fn try_acquire_writer(&self) -> Result<Box<dyn WriterLease>, IndexStoreError> {
        if self
            .writer_held
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(IndexStoreError::WriterLockHeld);
        }
        Ok(Box::new(MemoryWriterLease {
            held: Arc::clone(&self.writer_held),
        }))
    }
}

/// Chain source over a fixed, pre-produced block sequence.
///
/// Heights past the tip report not-yet-produced, which exercises the
/// indexer's backoff path.
pub struct StaticChainSource {
    blocks: Vec<Block>,
}

impl StaticChainSource {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn tip(&self) -> u64 {
        self.blocks.len() as u64
    }
}

#[async_trait]
impl ChainSource for StaticChainSource {
    async fn get_block(&self, height: u64) -> Result<Option<Block>, ChainError> {
        if height == 0 {
            return Err(ChainError::Unavailable(
                "height 0 is pre-genesis".to_string(),
            ));
        }
        Ok(self.blocks.get(height as usize - 1).cloned())
    }
}
