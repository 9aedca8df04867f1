//! # Authority Resolution
//!
//! Decides which locally held private keys must sign a transaction to
//! satisfy a weighted-threshold [`bwc_protocol::Authority`], descending
//! into delegated accounts up to a bounded depth.
//!
//! ## Architecture
//!
//! - **Ports** (`ports`): the account-directory gateway and the local
//!   key-lookup trait.
//! - **Resolver** (`resolver`): the depth-bounded collection algorithm.
//!
//! The account graph is nominally a DAG but nothing at the protocol level
//! proves it acyclic, so recursion is bounded by an explicit depth counter
//! rather than by trust in the graph.

pub mod errors;
pub mod ports;
pub mod resolver;

pub use errors::AuthorityError;
pub use ports::{AccountDirectory, DirectoryError, KeyLookup, Role};
pub use resolver::{
    required_authorities, required_public_keys, resolve_signers, ResolvedSigners,
    DEFAULT_MAX_DEPTH,
};
