//! # Shared Types Crate
//!
//! This crate contains the domain entities shared between the asset
//! registry and the block indexer.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Derived Identity**: `AssetId` is always computed from immutable
//!   inputs, never supplied by a client.
//! - **JSON-Shaped Tags**: Arbitrary client metadata is carried as
//!   [`TagValue`], a recursive value type validated at the boundary.

pub mod annotations;
pub mod entities;
pub mod tags;

pub use annotations::*;
pub use entities::*;
pub use tags::*;
