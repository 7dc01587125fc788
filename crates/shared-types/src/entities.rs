//! # Core Domain Entities
//!
//! Defines the ledger entities shared across subsystems.
//!
//! ## Clusters
//!
//! - **Chain**: `Block`, `Transaction`, `TxOutput`
//! - **Assets**: `AssetId`, `Quorum`, `SignerRef`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 32-byte hash (SHA3-256).
pub type Hash = [u8; 32];

/// A 32-byte Ed25519 public key.
pub type PublicKey = [u8; 32];

/// The derived, globally unique identifier of an asset.
///
/// Computed from `(quorum, issuance_program, initial_block_hash)` by the
/// asset registry; never client-supplied, immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut id = [0u8; 32];
        hex::decode_to_slice(s, &mut id)?;
        Ok(Self(id))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for AssetId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// A reference to a signing quorum held by the external signer service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignerRef(pub String);

impl fmt::Display for SignerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A set of keys plus the threshold required to authorize issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quorum {
    /// Public keys, in the order supplied at definition time.
    pub keys: Vec<PublicKey>,
    /// Number of keys that must sign.
    pub threshold: u8,
}

/// A single output of a ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    /// Asset being moved or issued.
    pub asset_id: AssetId,
    /// Amount in the asset's base units.
    pub amount: u64,
}

/// A confirmed ledger transaction as it appears in a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash.
    pub id: Hash,
    /// Canonical serialized form, persisted verbatim by the indexer.
    pub raw: Vec<u8>,
    /// Outputs in transaction order.
    pub outputs: Vec<TxOutput>,
}

impl Transaction {
    /// Asset ids referenced by this transaction, deduplicated, in
    /// first-appearance order.
    pub fn referenced_assets(&self) -> Vec<AssetId> {
        let mut seen = Vec::new();
        for out in &self.outputs {
            if !seen.contains(&out.asset_id) {
                seen.push(out.asset_id);
            }
        }
        seen
    }
}

/// A confirmed block produced by the external chain source.
///
/// Blocks are immutable once produced and addressed by strictly increasing
/// height starting at 1. Height 0 is the implicit pre-genesis cursor value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain, starting at 1.
    pub height: u64,
    /// Block hash.
    pub hash: Hash,
    /// Hash of the parent block.
    pub parent_hash: Hash,
    /// Unix timestamp when the block was produced.
    pub timestamp: u64,
    /// Transactions in block order.
    pub transactions: Vec<Transaction>,
}
