//! # In-Memory Adapters
//!
//! In-memory asset store and signer service for unit tests and
//! single-node deployments. A single mutex around the record table makes
//! the three uniqueness checks in `insert` atomic; production uses a
//! transactional storage engine with row-level uniqueness constraints.

use crate::domain::Asset;
use crate::ports::{AssetStore, SignerError, SignerService, StoreError};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{AssetId, PublicKey, Quorum, SignerRef, Tags};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

#[derive(Default)]
struct StoreInner {
    /// Keyed by sort key so iteration is creation order.
    assets: BTreeMap<u64, Asset>,
    by_id: HashMap<AssetId, u64>,
    next_sort_key: u64,
}

/// In-memory asset store.
#[derive(Default)]
pub struct InMemoryAssetStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AssetStore for InMemoryAssetStore {
    fn insert(&self, mut asset: Asset) -> Result<Asset, StoreError> {
        let mut inner = self.inner.lock();

        if inner.by_id.contains_key(&asset.id) {
            return Err(StoreError::DuplicateId(asset.id));
        }
        if let Some(alias) = asset.alias.as_deref() {
            let taken = inner
                .assets
                .values()
                .any(|a| !a.archived && a.alias.as_deref() == Some(alias));
            if taken {
                return Err(StoreError::DuplicateAlias(alias.to_string()));
            }
        }
        if let Some(token) = asset.client_token.as_deref() {
            let taken = inner
                .assets
                .values()
                .any(|a| a.client_token.as_deref() == Some(token));
            if taken {
                return Err(StoreError::DuplicateClientToken(token.to_string()));
            }
        }

        inner.next_sort_key += 1;
        asset.sort_key = inner.next_sort_key;
        inner.by_id.insert(asset.id, asset.sort_key);
        inner.assets.insert(asset.sort_key, asset.clone());
        Ok(asset)
    }

    fn find_by_id(&self, id: &AssetId) -> Result<Asset, StoreError> {
        let inner = self.inner.lock();
        let sort_key = inner.by_id.get(id).ok_or(StoreError::NotFound)?;
        let asset = &inner.assets[sort_key];
        if asset.archived {
            return Err(StoreError::Archived);
        }
        Ok(asset.clone())
    }

    fn find_by_alias(&self, alias: &str) -> Result<Asset, StoreError> {
        let inner = self.inner.lock();
        // Active alias first; otherwise report archived if any retired
        // asset ever held the alias.
        let mut archived_match = false;
        for asset in inner.assets.values() {
            if asset.alias.as_deref() == Some(alias) {
                if asset.archived {
                    archived_match = true;
                } else {
                    return Ok(asset.clone());
                }
            }
        }
        if archived_match {
            Err(StoreError::Archived)
        } else {
            Err(StoreError::NotFound)
        }
    }

    fn find_by_client_token(&self, token: &str) -> Result<Option<Asset>, StoreError> {
        let inner = self.inner.lock();
        Ok(inner
            .assets
            .values()
            .find(|a| a.client_token.as_deref() == Some(token))
            .cloned())
    }

    fn update_tags(&self, id: &AssetId, tags: Tags) -> Result<Asset, StoreError> {
        let mut inner = self.inner.lock();
        let sort_key = *inner.by_id.get(id).ok_or(StoreError::NotFound)?;
        let asset = inner
            .assets
            .get_mut(&sort_key)
            .ok_or(StoreError::NotFound)?;
        asset.tags = tags;
        Ok(asset.clone())
    }

    fn archive(&self, id: &AssetId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let sort_key = *inner.by_id.get(id).ok_or(StoreError::NotFound)?;
        if let Some(asset) = inner.assets.get_mut(&sort_key) {
            asset.archived = true;
        }
        Ok(())
    }

    fn list(&self, after_sort_key: Option<u64>, limit: usize) -> Result<Vec<Asset>, StoreError> {
        let inner = self.inner.lock();
        let start = after_sort_key.map(|k| k + 1).unwrap_or(0);
        Ok(inner
            .assets
            .range(start..)
            .map(|(_, a)| a)
            .filter(|a| !a.archived)
            .take(limit)
            .cloned()
            .collect())
    }
}

struct SignerEntry {
    quorum: Quorum,
    archived: bool,
}

/// In-memory signer service.
///
/// Tracks how many quorums were created so idempotency tests can assert
/// on side effects.
#[derive(Default)]
pub struct InMemorySignerService {
    quorums: Mutex<HashMap<String, SignerEntry>>,
    created: AtomicU64,
}

impl InMemorySignerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of quorums created since construction.
    pub fn created_count(&self) -> u64 {
        self.created.load(Ordering::SeqCst)
    }

    /// Number of quorums currently live (created and not archived).
    pub fn active_count(&self) -> usize {
        self.quorums.lock().values().filter(|e| !e.archived).count()
    }
}

#[async_trait]
impl SignerService for InMemorySignerService {
    async fn create_quorum(
        &self,
        keys: &[PublicKey],
        threshold: u8,
    ) -> Result<SignerRef, SignerError> {
        if keys.is_empty() || threshold == 0 || usize::from(threshold) > keys.len() {
            return Err(SignerError::InvalidQuorum(format!(
                "threshold {} of {} keys",
                threshold,
                keys.len()
            )));
        }
        let signer = SignerRef(Uuid::new_v4().to_string());
        self.quorums.lock().insert(
            signer.0.clone(),
            SignerEntry {
                quorum: Quorum {
                    keys: keys.to_vec(),
                    threshold,
                },
                archived: false,
            },
        );
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(signer)
    }

    async fn archive(&self, signer: &SignerRef) -> Result<(), SignerError> {
        let mut quorums = self.quorums.lock();
        let entry = quorums
            .get_mut(&signer.0)
            .ok_or_else(|| SignerError::NotFound(signer.clone()))?;
        entry.archived = true;
        Ok(())
    }

    async fn find(&self, signer: &SignerRef) -> Result<Quorum, SignerError> {
        let quorums = self.quorums.lock();
        let entry = quorums
            .get(&signer.0)
            .ok_or_else(|| SignerError::NotFound(signer.clone()))?;
        if entry.archived {
            return Err(SignerError::Archived(signer.clone()));
        }
        Ok(entry.quorum.clone())
    }
}
