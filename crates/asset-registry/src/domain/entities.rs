//! # Registry Entities
//!
//! The asset record and the request/selector value types used by the
//! registry service.

use crate::domain::derive::validate_quorum;
use crate::domain::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_types::{validate_tags, AssetId, Hash, PublicKey, Quorum, SignerRef, Tags};

/// A registered asset.
///
/// `id`, `quorum`, `issuance_program`, `initial_block_hash`, and
/// `client_token` are immutable after creation. `tags` is fully
/// replaceable; `archived` transitions false→true only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Derived identifier, never client-supplied.
    pub id: AssetId,
    /// Optional human-readable name, unique among non-archived assets.
    pub alias: Option<String>,
    /// Reference to the signing quorum held by the external signer service.
    pub signer: SignerRef,
    /// The quorum the identifier was derived from.
    pub quorum: Quorum,
    /// Opaque program bytes defining issuance rules.
    pub issuance_program: Vec<u8>,
    /// Reference to the chain's initial block, part of derivation.
    pub initial_block_hash: Hash,
    /// Client metadata, last-write-wins on replacement.
    pub tags: Tags,
    /// Caller-supplied idempotency key, unique when present.
    pub client_token: Option<String>,
    /// Archival flag, monotonic false→true.
    pub archived: bool,
    /// Strictly increasing creation-order token assigned by the store.
    pub sort_key: u64,
}

/// Inputs to `AssetRegistry::define`.
#[derive(Debug, Clone, Default)]
pub struct DefineAssetRequest {
    /// Public keys for the signing quorum.
    pub keys: Vec<PublicKey>,
    /// Number of keys required to sign.
    pub threshold: u8,
    /// Opaque issuance program bytes.
    pub issuance_program: Vec<u8>,
    /// The chain's initial block hash.
    pub initial_block_hash: Hash,
    /// Optional alias.
    pub alias: Option<String>,
    /// Initial tags.
    pub tags: Tags,
    /// Optional idempotency key.
    pub client_token: Option<String>,
}

impl DefineAssetRequest {
    /// The quorum this request describes.
    pub fn quorum(&self) -> Quorum {
        Quorum {
            keys: self.keys.clone(),
            threshold: self.threshold,
        }
    }

    /// Boundary validation of all request fields.
    pub fn validate(&self) -> Result<(), RegistryError> {
        validate_quorum(&self.quorum())?;
        if matches!(self.alias.as_deref(), Some("")) {
            return Err(RegistryError::InvalidInput("alias must be non-empty".into()));
        }
        if matches!(self.client_token.as_deref(), Some("")) {
            return Err(RegistryError::InvalidInput(
                "client token must be non-empty".into(),
            ));
        }
        validate_tags(&self.tags)?;
        Ok(())
    }
}

/// Selects an asset by id or by alias. Exactly one dimension, enforced
/// by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSelector {
    Id(AssetId),
    Alias(String),
}

impl From<AssetId> for AssetSelector {
    fn from(id: AssetId) -> Self {
        AssetSelector::Id(id)
    }
}

impl From<&str> for AssetSelector {
    fn from(alias: &str) -> Self {
        AssetSelector::Alias(alias.to_string())
    }
}
