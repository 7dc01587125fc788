//! # Identifier Derivation
//!
//! Pure computation of an asset's canonical identifier from its immutable
//! inputs. The same inputs always produce the same identifier, in every
//! process; unrelated inputs collide with cryptographic improbability.
//!
//! The identifier collision itself is the dedup mechanism for tokenless
//! Define calls: two calls with identical inputs derive the same id, and
//! the second insert resolves to the pre-existing record.

use crate::domain::errors::RegistryError;
use shared_types::{AssetId, Hash, Quorum};
use sha3::{Digest, Sha3_256};

/// Domain separation tag for asset identifiers.
pub const ASSET_ID_DOMAIN: &[u8] = b"ledger-core/asset-id/v1";

/// Derive the canonical identifier for an asset.
///
/// SHA3-256 over a length-framed encoding of the domain tag, initial
/// block hash, quorum (threshold, key count, keys in given order), and
/// issuance program. The framing makes the encoding injective, so
/// distinct inputs never serialize to the same byte stream.
///
/// Fails with [`RegistryError::InvalidInput`] on a malformed quorum:
/// no keys, zero threshold, or threshold exceeding the key count.
pub fn derive_asset_id(
    quorum: &Quorum,
    issuance_program: &[u8],
    initial_block_hash: &Hash,
) -> Result<AssetId, RegistryError> {
    validate_quorum(quorum)?;

    let mut hasher = Sha3_256::new();
    hasher.update(ASSET_ID_DOMAIN);
    hasher.update(initial_block_hash);
    hasher.update([quorum.threshold]);
    hasher.update((quorum.keys.len() as u32).to_le_bytes());
    for key in &quorum.keys {
        hasher.update(key);
    }
    hasher.update((issuance_program.len() as u64).to_le_bytes());
    hasher.update(issuance_program);

    let mut id = [0u8; 32];
    id.copy_from_slice(&hasher.finalize());
    Ok(AssetId(id))
}

/// Validate derivation inputs.
pub fn validate_quorum(quorum: &Quorum) -> Result<(), RegistryError> {
    if quorum.keys.is_empty() {
        return Err(RegistryError::InvalidInput(
            "quorum requires at least one key".into(),
        ));
    }
    if quorum.threshold == 0 {
        return Err(RegistryError::InvalidInput(
            "quorum threshold must be at least 1".into(),
        ));
    }
    if usize::from(quorum.threshold) > quorum.keys.len() {
        return Err(RegistryError::InvalidInput(format!(
            "quorum threshold {} exceeds key count {}",
            quorum.threshold,
            quorum.keys.len()
        )));
    }
    Ok(())
}
