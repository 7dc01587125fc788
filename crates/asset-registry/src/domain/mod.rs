//! # Domain Layer
//!
//! Pure registry logic: identifier derivation, entities, and errors.
//! No I/O dependencies.

pub mod derive;
pub mod entities;
pub mod errors;

pub use derive::{derive_asset_id, ASSET_ID_DOMAIN};
pub use entities::{Asset, AssetSelector, DefineAssetRequest};
pub use errors::RegistryError;
