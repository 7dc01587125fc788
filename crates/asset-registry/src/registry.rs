//! # Asset Registry Service
//!
//! Orchestrates Define/SetTags/Archive/Find atop the asset store and the
//! external signer service.
//!
//! ## Exactly-once creation
//!
//! `define` never pre-checks existence before creating. It attempts the
//! insert and treats a uniqueness conflict as the authoritative signal
//! that the asset already exists, re-reading and returning the stored
//! record. Concurrent Define calls with the same client token or the
//! same derived identifier therefore resolve to exactly one winning
//! insert, with every other caller observing the conflict and falling
//! back to lookup.

use crate::domain::{derive_asset_id, Asset, AssetSelector, DefineAssetRequest, RegistryError};
use crate::ports::{AssetStore, SignerService, StoreError};
use shared_types::{
    AnnotationError, AnnotationFragment, AssetId, TagValue, Tags, Transaction,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Annotation namespace owned by the asset registry.
pub const ASSET_ANNOTATION_NAMESPACE: &str = "asset";

/// The asset registry service.
pub struct AssetRegistry {
    store: Arc<dyn AssetStore>,
    signer: Arc<dyn SignerService>,
}

impl AssetRegistry {
    pub fn new(store: Arc<dyn AssetStore>, signer: Arc<dyn SignerService>) -> Self {
        info!("[asset-registry] Initializing Asset Registry");
        Self { store, signer }
    }

    /// Define a new asset.
    ///
    /// Idempotency:
    /// - With a client token, a repeated call returns the stored asset
    ///   unchanged, even if the replayed alias or tags differ — the
    ///   client token wins, without validating the replayed arguments.
    /// - Without a token, the derived identifier is the dedup signal: a
    ///   duplicate-id conflict resolves to the pre-existing asset.
    ///
    /// Alias conflicts and signer failures propagate as errors.
    pub async fn define(&self, req: DefineAssetRequest) -> Result<Asset, RegistryError> {
        req.validate()?;

        if let Some(token) = req.client_token.as_deref() {
            if let Some(existing) = self.store.find_by_client_token(token)? {
                debug!(
                    "[asset-registry] Define short-circuited by client token: asset {}",
                    existing.id
                );
                return Ok(existing);
            }
        }

        let quorum = req.quorum();
        let id = derive_asset_id(&quorum, &req.issuance_program, &req.initial_block_hash)?;

        // The identifier is known before any side effect, so a tokenless
        // retry of an existing asset skips quorum creation entirely. The
        // insert conflict below still covers the concurrent race.
        if req.client_token.is_none() {
            match self.store.find_by_id(&id) {
                Ok(existing) => {
                    debug!("[asset-registry] Define resolved to existing asset {id}");
                    return Ok(existing);
                }
                Err(StoreError::NotFound) => {}
                Err(other) => return Err(other.into()),
            }
        }

        let signer = self.signer.create_quorum(&req.keys, req.threshold).await?;

        let asset = Asset {
            id,
            alias: req.alias.clone(),
            signer: signer.clone(),
            quorum,
            issuance_program: req.issuance_program.clone(),
            initial_block_hash: req.initial_block_hash,
            tags: req.tags.clone(),
            client_token: req.client_token.clone(),
            archived: false,
            sort_key: 0,
        };

        match self.store.insert(asset) {
            Ok(stored) => {
                info!(
                    "[asset-registry] Defined asset {} (alias: {:?})",
                    stored.id, stored.alias
                );
                Ok(stored)
            }
            Err(StoreError::DuplicateId(_)) => {
                // A concurrent tokenless Define with identical inputs won
                // the race. Re-read and return the winner.
                debug!("[asset-registry] Insert conflict on id {id}, returning existing asset");
                self.release_orphan_quorum(&signer).await;
                Ok(self.store.find_by_id(&id)?)
            }
            Err(StoreError::DuplicateClientToken(token)) => {
                // A concurrent Define with the same token won the race.
                debug!("[asset-registry] Insert conflict on client token, returning existing asset");
                self.release_orphan_quorum(&signer).await;
                self.store
                    .find_by_client_token(&token)?
                    .ok_or_else(|| RegistryError::Storage("client token vanished after conflict".into()))
            }
            Err(other) => {
                // Alias conflicts and storage failures abort the Define;
                // the quorum created above must not outlive it.
                self.release_orphan_quorum(&signer).await;
                Err(other.into())
            }
        }
    }

    /// Retire a quorum whose asset insert failed.
    ///
    /// Mirrors transactional rollback in engines that create the quorum
    /// inside the insert's own transaction: whether the insert lost a
    /// uniqueness race or hit an alias conflict, no quorum survives
    /// without an owning asset.
    async fn release_orphan_quorum(&self, signer: &shared_types::SignerRef) {
        if let Err(err) = self.signer.archive(signer).await {
            warn!("[asset-registry] Failed to release orphan quorum {signer}: {err}");
        }
    }

    /// Replace an asset's tags (last-write-wins on the whole set).
    pub fn set_tags(
        &self,
        selector: impl Into<AssetSelector>,
        tags: Tags,
    ) -> Result<Asset, RegistryError> {
        shared_types::validate_tags(&tags)?;
        let asset = self.resolve(selector.into())?;
        let updated = self.store.update_tags(&asset.id, tags)?;
        debug!("[asset-registry] Replaced tags on asset {}", updated.id);
        Ok(updated)
    }

    /// Archive an asset and cascade to its signing quorum.
    ///
    /// Irreversible; archiving an already-archived asset is a no-op
    /// success.
    pub async fn archive(&self, selector: impl Into<AssetSelector>) -> Result<(), RegistryError> {
        let found = match selector.into() {
            AssetSelector::Id(id) => self.store.find_by_id(&id),
            AssetSelector::Alias(alias) => self.store.find_by_alias(&alias),
        };
        match found {
            Ok(asset) => {
                self.store.archive(&asset.id)?;
                self.signer.archive(&asset.signer).await?;
                info!(
                    "[asset-registry] Archived asset {} and its signing quorum",
                    asset.id
                );
                Ok(())
            }
            // Already archived: the transition is monotonic, so this is
            // a no-op success.
            Err(StoreError::Archived) => Ok(()),
            Err(other) => Err(other.into()),
        }
    }

    /// Look up a non-archived asset by id. Archived assets yield
    /// [`RegistryError::Archived`], distinct from `NotFound`.
    pub fn find_by_id(&self, id: &AssetId) -> Result<Asset, RegistryError> {
        Ok(self.store.find_by_id(id)?)
    }

    /// Look up a non-archived asset by alias, with the same
    /// archived/not-found distinction.
    pub fn find_by_alias(&self, alias: &str) -> Result<Asset, RegistryError> {
        Ok(self.store.find_by_alias(alias)?)
    }

    /// List non-archived assets in creation order.
    pub fn list(
        &self,
        after_sort_key: Option<u64>,
        limit: usize,
    ) -> Result<Vec<Asset>, RegistryError> {
        Ok(self.store.list(after_sort_key, limit)?)
    }

    /// The registry's transaction annotator.
    ///
    /// Contributes the `"asset"` namespace: for every asset referenced
    /// by a transaction, an entry keyed by the asset id's hex form with
    /// the alias, tags, and archival state. References to assets this
    /// registry has never seen are listed under `"unresolved"`; only
    /// storage failures error.
    pub fn annotator(
        &self,
    ) -> impl Fn(&Transaction) -> Result<AnnotationFragment, AnnotationError> + Send + Sync + 'static
    {
        let store = Arc::clone(&self.store);
        move |tx: &Transaction| {
            let mut fragment = AnnotationFragment::new();
            let mut unresolved = Vec::new();

            for asset_id in tx.referenced_assets() {
                let (asset, archived) = match store.find_by_id(&asset_id) {
                    Ok(asset) => (Some(asset), false),
                    Err(StoreError::Archived) => (None, true),
                    Err(StoreError::NotFound) => {
                        unresolved.push(TagValue::String(asset_id.to_hex()));
                        continue;
                    }
                    Err(err) => {
                        return Err(AnnotationError::new(
                            ASSET_ANNOTATION_NAMESPACE,
                            err.to_string(),
                        ))
                    }
                };

                let mut entry = BTreeMap::new();
                if let Some(asset) = asset {
                    if let Some(alias) = asset.alias {
                        entry.insert("alias".to_string(), TagValue::String(alias));
                    }
                    entry.insert("tags".to_string(), TagValue::Object(asset.tags));
                } else {
                    entry.insert("archived".to_string(), TagValue::Bool(archived));
                }
                fragment.insert(asset_id.to_hex(), TagValue::Object(entry));
            }

            if !unresolved.is_empty() {
                warn!(
                    "[asset-registry] {} unresolved asset reference(s) while annotating",
                    unresolved.len()
                );
                fragment.insert("unresolved".to_string(), TagValue::Array(unresolved));
            }
            Ok(fragment)
        }
    }

    /// Resolve a selector to a non-archived asset.
    fn resolve(&self, selector: AssetSelector) -> Result<Asset, RegistryError> {
        match selector {
            AssetSelector::Id(id) => self.find_by_id(&id),
            AssetSelector::Alias(alias) => self.find_by_alias(&alias),
        }
    }
}
