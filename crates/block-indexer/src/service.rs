//! # Block Indexer Service
//!
//! Drives the `Idle → Fetching → Annotating → Committing` cycle over the
//! chain source. One logical sequential process per index: construction
//! acquires the storage-level writer lease, so a second indexer on the
//! same store fails fast instead of racing the cursor.

use crate::config::IndexerConfig;
use crate::domain::{AnnotatorRegistry, IndexError};
use crate::ports::{ChainSource, IndexStore, WriterLease};
use shared_types::AnnotatedTransaction;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome of a single indexing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The block at `height` was annotated and durably committed.
    Committed {
        height: u64,
        transactions: usize,
        annotation_failures: usize,
    },
    /// The chain has not produced the next block yet.
    NotYetProduced { next: u64 },
}

/// The block indexing service.
pub struct BlockIndexer {
    chain: Arc<dyn ChainSource>,
    store: Arc<dyn IndexStore>,
    annotators: AnnotatorRegistry,
    config: IndexerConfig,
    is_active: AtomicBool,
    // Held for the indexer's lifetime; dropping the indexer releases
    // the single-writer lease.
    _writer: Box<dyn WriterLease>,
}

impl BlockIndexer {
    /// Create an indexer, acquiring the index's writer lease.
    ///
    /// The annotator registry is taken by value: registration is
    /// complete before indexing starts and cannot be mutated while the
    /// indexer runs.
    pub fn new(
        chain: Arc<dyn ChainSource>,
        store: Arc<dyn IndexStore>,
        annotators: AnnotatorRegistry,
        config: IndexerConfig,
    ) -> Result<Self, IndexError> {
        let writer = store.try_acquire_writer()?;
        let cursor = store.cursor()?;
        info!(
            "[block-indexer] Initialized with {} annotator(s), resuming at height {}",
            annotators.len(),
            cursor + 1
        );
        Ok(Self {
            chain,
            store,
            annotators,
            config,
            is_active: AtomicBool::new(false),
            _writer: writer,
        })
    }

    /// Run one Fetching→Annotating→Committing cycle.
    ///
    /// The cycle is idempotent per height: it re-reads the cursor, and
    /// the commit either lands atomically or leaves the index at the
    /// pre-commit state for a clean retry.
    pub async fn index_next(&self) -> Result<StepOutcome, IndexError> {
        let height = self.store.cursor()? + 1;

        let block = match self.chain.get_block(height).await? {
            Some(block) => block,
            None => return Ok(StepOutcome::NotYetProduced { next: height }),
        };
        if block.height != height {
            return Err(IndexError::HeightMismatch {
                requested: height,
                got: block.height,
            });
        }

        let mut records = Vec::with_capacity(block.transactions.len());
        let mut annotation_failures = 0;
        for (position, tx) in block.transactions.iter().enumerate() {
            let outcome = self.annotators.apply(tx);
            for failure in &outcome.failures {
                // Non-fatal: record and move on. Only storage errors
                // fail the block.
                warn!(
                    "[block-indexer] Annotation failure at height {} tx {}: {}",
                    height, position, failure
                );
            }
            annotation_failures += outcome.failures.len();
            records.push(AnnotatedTransaction {
                block_height: height,
                tx_position: position as u32,
                raw_tx: tx.raw.clone(),
                annotations: outcome.annotations,
            });
        }

        let transactions = records.len();
        self.store.commit_block(height, records)?;
        debug!(
            "[block-indexer] Committed height {} ({} transaction(s), {} annotation failure(s))",
            height, transactions, annotation_failures
        );
        Ok(StepOutcome::Committed {
            height,
            transactions,
            annotation_failures,
        })
    }

    /// Run the indexing loop until shutdown or an unrecoverable storage
    /// failure.
    ///
    /// Chain unavailability and not-yet-produced heights back off
    /// exponentially (capped) and reset on progress; the cursor never
    /// advances on a storage error.
    pub async fn run(&self) -> Result<(), IndexError> {
        self.is_active.store(true, Ordering::SeqCst);
        info!("[block-indexer] Indexing loop started");

        let mut backoff = self.config.poll_interval;
        while self.is_active.load(Ordering::SeqCst) {
            match self.index_next().await {
                Ok(StepOutcome::Committed { height, .. }) => {
                    debug!("[block-indexer] Advanced to height {height}");
                    backoff = self.config.poll_interval;
                }
                Ok(StepOutcome::NotYetProduced { next }) => {
                    debug!("[block-indexer] Height {next} not yet produced, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff = self.config.next_backoff(backoff);
                }
                Err(IndexError::ChainUnavailable(message)) => {
                    warn!("[block-indexer] Chain source unavailable: {message}");
                    tokio::time::sleep(backoff).await;
                    backoff = self.config.next_backoff(backoff);
                }
                Err(fatal) => {
                    error!("[block-indexer] Unrecoverable failure: {fatal}");
                    self.is_active.store(false, Ordering::SeqCst);
                    return Err(fatal);
                }
            }
        }

        info!("[block-indexer] Indexing loop stopped");
        Ok(())
    }

    /// Request the run loop to stop after the in-flight cycle. In-flight
    /// commits complete or roll back; they never partially commit.
    pub fn shutdown(&self) {
        self.is_active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.is_active.load(Ordering::SeqCst)
    }

    /// Last fully indexed height.
    pub fn cursor(&self) -> Result<u64, IndexError> {
        Ok(self.store.cursor()?)
    }
}
