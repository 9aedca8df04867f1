//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur in the signing capability layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Private key scalar out of range or malformed.
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Public key is not 33 compressed-SEC1 bytes.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// WIF string is not base58, has the wrong length, or a bad version.
    #[error("Invalid WIF-encoded private key")]
    InvalidWif,

    /// Trailing checksum does not match the payload.
    #[error("Checksum mismatch in base58 text")]
    BadChecksum,

    /// Public-key text does not start with the expected network prefix.
    #[error("Wrong key prefix: expected {expected}")]
    WrongPrefix {
        /// The prefix the current network requires.
        expected: String,
    },

    /// Signature bytes are malformed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Public-key recovery from a signature failed.
    #[error("Failed to recover public key from signature")]
    RecoveryFailed,
}
