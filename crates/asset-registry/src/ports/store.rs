//! # Asset Store Port
//!
//! Transactional persistence of asset records. The store enforces the
//! three uniqueness constraints (identifier, active alias, client token)
//! atomically within `insert`; the registry relies on the resulting
//! conflict errors as normal control flow, never on pre-checks.

use crate::domain::{Asset, RegistryError};
use shared_types::{AssetId, Tags};
use thiserror::Error;

/// Storage port for asset records.
///
/// Implementations must make the three uniqueness checks in [`insert`]
/// atomic with respect to concurrent inserts (a single transaction, or a
/// single critical section for in-memory stores). All methods take
/// `&self` so the store can be shared behind an `Arc`.
///
/// [`insert`]: AssetStore::insert
pub trait AssetStore: Send + Sync {
    /// Persist a new asset, assigning its strictly increasing `sort_key`.
    ///
    /// Returns the stored record. Fails with the corresponding duplicate
    /// error if the id, the alias (among non-archived assets), or the
    /// client token collides.
    fn insert(&self, asset: Asset) -> Result<Asset, StoreError>;

    /// Look up by identifier. Archived records yield
    /// [`StoreError::Archived`], distinguishing "existed but retired"
    /// from "never existed".
    fn find_by_id(&self, id: &AssetId) -> Result<Asset, StoreError>;

    /// Look up by alias, with the same archived/not-found distinction.
    fn find_by_alias(&self, alias: &str) -> Result<Asset, StoreError>;

    /// Look up by client token. Returns the record even when archived,
    /// so a retried Define after archival still resolves idempotently.
    fn find_by_client_token(&self, token: &str) -> Result<Option<Asset>, StoreError>;

    /// Replace the full tag set (last-write-wins). Returns the updated
    /// record; fails [`StoreError::NotFound`] if absent.
    fn update_tags(&self, id: &AssetId, tags: Tags) -> Result<Asset, StoreError>;

    /// Set the archived flag. Idempotent: archiving an already-archived
    /// asset succeeds without change.
    fn archive(&self, id: &AssetId) -> Result<(), StoreError>;

    /// List non-archived assets in creation order, starting after the
    /// given sort key.
    fn list(&self, after_sort_key: Option<u64>, limit: usize) -> Result<Vec<Asset>, StoreError>;
}

/// Storage port errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("asset id already exists: {0}")]
    DuplicateId(AssetId),

    #[error("alias already in use: {0}")]
    DuplicateAlias(String),

    #[error("client token already in use: {0}")]
    DuplicateClientToken(String),

    #[error("asset not found")]
    NotFound,

    #[error("asset is archived")]
    Archived,

    #[error("storage failure: {0}")]
    Io(String),
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateAlias(alias) => RegistryError::DuplicateAlias(alias),
            StoreError::NotFound => RegistryError::NotFound,
            StoreError::Archived => RegistryError::Archived,
            // Duplicate id and duplicate client token are handled inside
            // the registry's define path; one escaping is a storage-level
            // consistency failure.
            StoreError::DuplicateId(id) => {
                RegistryError::Storage(format!("unresolved id conflict: {id}"))
            }
            StoreError::DuplicateClientToken(token) => {
                RegistryError::Storage(format!("unresolved client token conflict: {token}"))
            }
            StoreError::Io(message) => RegistryError::Storage(message),
        }
    }
}
