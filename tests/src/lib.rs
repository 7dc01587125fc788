//! # Ledger-Core Test Suite
//!
//! Unified test crate for cross-subsystem behavior.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Shared fixtures (registry, chain builders)
//! │
//! └── integration/      # Cross-subsystem scenarios
//!     ├── end_to_end.rs # Registry + indexer choreography, crash-resume
//!     └── concurrency.rs# Racing Define calls, single-writer enforcement
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ledger-tests
//!
//! # By category
//! cargo test -p ledger-tests integration::
//! ```

pub mod support;

#[cfg(test)]
mod integration;
