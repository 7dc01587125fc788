//! # Signer Service Port
//!
//! Interface to the external key-custody subsystem that stores signing
//! quorums and validates signatures. The registry only creates, archives,
//! and looks up quorums; signing itself is out of scope.

use crate::domain::RegistryError;
use async_trait::async_trait;
use shared_types::{PublicKey, Quorum, SignerRef};
use thiserror::Error;

/// External signer/key-custody service.
#[async_trait]
pub trait SignerService: Send + Sync {
    /// Create a signing quorum and return its reference.
    async fn create_quorum(&self, keys: &[PublicKey], threshold: u8)
        -> Result<SignerRef, SignerError>;

    /// Archive a quorum so it can no longer authorize issuance.
    /// Idempotent.
    async fn archive(&self, signer: &SignerRef) -> Result<(), SignerError>;

    /// Look up a quorum. Archived quorums yield [`SignerError::Archived`].
    async fn find(&self, signer: &SignerRef) -> Result<Quorum, SignerError>;
}

/// Signer service errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignerError {
    #[error("signer not found: {0}")]
    NotFound(SignerRef),

    #[error("signer is archived: {0}")]
    Archived(SignerRef),

    #[error("invalid quorum: {0}")]
    InvalidQuorum(String),

    #[error("signer service failure: {0}")]
    Service(String),
}

impl From<SignerError> for RegistryError {
    fn from(err: SignerError) -> Self {
        match err {
            SignerError::InvalidQuorum(message) => RegistryError::InvalidInput(message),
            other => RegistryError::Signer(other.to_string()),
        }
    }
}
