//! # Beowulf Wallet Client Test Suite
//!
//! Unified test crate for flows that cross crate boundaries:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── end_to_end.rs      # Assemble -> sign -> wire round-trip
//!     └── wallet_flow.rs     # Vault-backed signing and broadcast
//! ```
//!
//! Single-crate behavior is tested in each crate's own `#[cfg(test)]`
//! modules; only choreography lives here.
//!
//! ```bash
//! cargo test -p bwc-tests
//! ```

pub mod integration;
