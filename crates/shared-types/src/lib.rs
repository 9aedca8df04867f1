//! # Shared Types Crate
//!
//! Cross-crate domain entities for the Beowulf wallet client: chain
//! parameters, asset amounts and the head-block reference used to anchor
//! transactions.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: the symbol→precision table and the chain
//!   ids live here and nowhere else.
//! - **Immutable value objects**: entities are populated once on fetch or
//!   construction; there is no runtime reflection.

pub mod asset;
pub mod chain;
pub mod entities;
pub mod errors;

pub use asset::{Asset, SymbolTable};
pub use chain::{ChainParams, Network, NULL_SIGNING_KEY};
pub use entities::{validate_account_name, BlockId, BroadcastReceipt, HeadBlock};
pub use errors::TypeError;
