//! Shared fixtures for the integration suite.

use asset_registry::{AssetRegistry, DefineAssetRequest, InMemoryAssetStore, InMemorySignerService};
use async_trait::async_trait;
use block_indexer::{ChainError, ChainSource, StaticChainSource};
use shared_types::{AssetId, Block, Tags, Transaction, TxOutput};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Once};

static INIT_TRACING: Once = Once::new();

/// Install the RUST_LOG-driven subscriber once per test binary.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A registry wired to in-memory adapters, with handles to both so
/// tests can assert on side effects.
pub struct TestHarness {
    pub registry: Arc<AssetRegistry>,
    pub store: Arc<InMemoryAssetStore>,
    pub signers: Arc<InMemorySignerService>,
}

pub fn harness() -> TestHarness {
    init_tracing();
    let store = Arc::new(InMemoryAssetStore::new());
    let signers = Arc::new(InMemorySignerService::new());
    let registry = Arc::new(AssetRegistry::new(store.clone(), signers.clone()));
    TestHarness {
        registry,
        store,
        signers,
    }
}

/// A single-key, threshold-1 define request.
pub fn define_request(alias: Option<&str>, token: Option<&str>) -> DefineAssetRequest {
    DefineAssetRequest {
        keys: vec![[0x42; 32]],
        threshold: 1,
        issuance_program: b"issue".to_vec(),
        initial_block_hash: [0u8; 32],
        alias: alias.map(String::from),
        tags: Tags::new(),
        client_token: token.map(String::from),
    }
}

/// A transaction moving one unit of each listed asset.
pub fn transfer_tx(tx_byte: u8, assets: &[AssetId]) -> Transaction {
    Transaction {
        id: [tx_byte; 32],
        raw: vec![tx_byte],
        outputs: assets
            .iter()
            .map(|&asset_id| TxOutput {
                asset_id,
                amount: 1,
            })
            .collect(),
    }
}

/// Build a linked chain of blocks, each holding the given transactions.
pub fn build_chain(transactions_per_block: Vec<Vec<Transaction>>) -> StaticChainSource {
    let mut parent_hash = [0u8; 32];
    let mut blocks = Vec::new();
    for (i, transactions) in transactions_per_block.into_iter().enumerate() {
        let height = i as u64 + 1;
        let hash = [height as u8; 32];
        blocks.push(Block {
            height,
            hash,
            parent_hash,
            timestamp: 1_700_000_000 + height,
            transactions,
        });
        parent_hash = hash;
    }
    StaticChainSource::new(blocks)
}

/// Chain source that fails its first `failures` fetches, then delegates.
///
/// Exercises the indexer's backoff-retry path without surfacing an
/// indexing failure.
pub struct FlakyChainSource {
    inner: StaticChainSource,
    remaining_failures: AtomicU32,
}

impl FlakyChainSource {
    pub fn new(inner: StaticChainSource, failures: u32) -> Self {
        Self {
            inner,
            remaining_failures: AtomicU32::new(failures),
        }
    }
}

#[async_trait]
impl ChainSource for FlakyChainSource {
    async fn get_block(&self, height: u64) -> Result<Option<Block>, ChainError> {
        let remaining = self.remaining_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.remaining_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(ChainError::Unavailable("transient outage".to_string()));
        }
        self.inner.get_block(height).await
    }
}
