//! Protocol error types.

use bwc_codec::CodecError;
use shared_crypto::CryptoError;
use shared_types::TypeError;
use thiserror::Error;

/// Errors from the operation registry, authority model and envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Operation name absent from the closed operation set.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Operation id absent from the closed operation set.
    #[error("Unknown operation id: {0}")]
    UnknownOperationId(u64),

    /// The id belongs to a chain-reported virtual operation, which has
    /// no client-constructible schema.
    #[error("Operation '{0}' is virtual and cannot be client-constructed")]
    VirtualOperation(String),

    /// Operation field validation failed.
    #[error("Invalid {operation} operation: {reason}")]
    InvalidOperation {
        /// Registry name of the operation.
        operation: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// Authority construction violated an invariant.
    #[error("Invalid authority: {0}")]
    InvalidAuthority(String),

    /// Expiration window outside the accepted policy range.
    #[error("Invalid expiration window: {seconds}s (allowed 1..={max}s)")]
    InvalidExpiration {
        /// The requested window.
        seconds: i64,
        /// The policy ceiling.
        max: i64,
    },

    /// Value-object construction failed.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Key material or text codec failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Wire decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
