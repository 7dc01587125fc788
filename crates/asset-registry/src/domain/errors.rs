//! # Domain Errors
//!
//! The registry error taxonomy. Conflict errors from the storage port are
//! converted here; duplicate-identifier and duplicate-client-token
//! conflicts never reach callers — the registry resolves them to the
//! pre-existing record.

use shared_types::TagError;
use thiserror::Error;

/// Errors surfaced by asset registry operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// Malformed derivation inputs or malformed tags.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested alias is held by a non-archived asset.
    #[error("alias already in use: {0}")]
    DuplicateAlias(String),

    /// No asset matched the lookup.
    #[error("asset not found")]
    NotFound,

    /// The asset existed but has been intentionally retired.
    /// Distinct from [`RegistryError::NotFound`].
    #[error("asset is archived")]
    Archived,

    /// The external signer service failed.
    #[error("signer service: {0}")]
    Signer(String),

    /// The storage layer failed. Fatal to the current operation; the
    /// caller may retry.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl From<TagError> for RegistryError {
    fn from(err: TagError) -> Self {
        RegistryError::InvalidInput(err.to_string())
    }
}
