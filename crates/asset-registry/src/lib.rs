//! # Asset Registry Subsystem
//!
//! The Asset Registry is the system's authority for the canonical mapping
//! between cryptographically derived asset identifiers and their mutable
//! metadata (alias, signing quorum, tags, archival state).
//!
//! ## Key responsibilities
//!
//! - Derive deterministic, collision-resistant asset identifiers from
//!   `(signing quorum, issuance program, initial block hash)`
//! - Guarantee exactly-once creation under concurrent callers and client
//!   retries (client tokens, identifier-collision dedup)
//! - Maintain alias uniqueness among non-archived assets
//! - Cascade archival to the owned signing quorum
//! - Contribute the `"asset"` annotation namespace to the block indexer
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | Deterministic identity | `derive_asset_id` is a pure SHA3-256 construction |
//! | INVARIANT-2 | Exactly-once creation | insert-then-lookup on uniqueness conflict, never pre-check |
//! | INVARIANT-3 | Alias uniqueness | at most one non-archived asset per alias, checked atomically in `insert` |
//! | INVARIANT-4 | Monotonic archival | `archived` transitions false→true only, idempotent |
//!
//! ## Hexagonal Architecture
//!
//! - **Domain Layer** (`domain/`): identifier derivation, entities, errors; no I/O
//! - **Ports Layer** (`ports/`): `AssetStore` and `SignerService` traits
//! - **Adapters Layer** (`adapters/`): in-memory implementations for tests
//!   and single-node deployments
//! - **Service** (`registry.rs`): the `AssetRegistry` orchestrator

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod registry;

pub use domain::{
    derive_asset_id, Asset, AssetSelector, DefineAssetRequest, RegistryError, ASSET_ID_DOMAIN,
};

pub use ports::{AssetStore, SignerError, SignerService, StoreError};

pub use adapters::{InMemoryAssetStore, InMemorySignerService};

pub use registry::{AssetRegistry, ASSET_ANNOTATION_NAMESPACE};
