//! # Ports Layer
//!
//! Outbound interfaces required by the registry: transactional asset
//! persistence and the external signer service.

pub mod signer;
pub mod store;

pub use signer::{SignerError, SignerService};
pub use store::{AssetStore, StoreError};
