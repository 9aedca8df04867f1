//! # Beowulf Protocol
//!
//! The typed operation model and its canonical encoding:
//!
//! - **Registry** (`registry`): the closed, versioned operation-id table.
//! - **Operations** (`operations`): one struct per client-constructible
//!   operation, encoded in declared field order.
//! - **Authority** (`authority`): weighted-threshold signer sets with
//!   canonical ordering enforced at construction.
//! - **Transaction** (`transaction`): the unsigned/signed envelope and the
//!   chain-id-bound signing digest.
//!
//! Everything here must byte-for-byte match what the verifying node
//! reconstructs from the same logical values.

pub mod authority;
pub mod errors;
pub mod operations;
pub mod registry;
pub mod transaction;

pub use authority::Authority;
pub use errors::ProtocolError;
pub use operations::{
    AccountCreate, AccountSupernodeVote, AccountUpdate, Operation, SmtCreate, SmtSymbol,
    SupernodeUpdate, Transfer, TransferToVesting, WithdrawVesting, MEMO_CIPHER_MARKER,
};
pub use registry::{id_for, is_virtual, name_for};
pub use transaction::{SignedTransaction, UnsignedTransaction};
