//! # Shared Crypto - Signing Capability
//!
//! Cryptographic capability layer for the Beowulf wallet client.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 / SHA-512 | Digests and checksums |
//! | `keys` | secp256k1, base58check | Key material and text codecs |
//! | `signature` | ECDSA (recoverable) | Transaction signatures |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic nonces, low-S normalization
//! - **Key material**: zeroized on drop
//! - **Text codecs**: 4-byte double-SHA-256 checksums on WIF and public keys

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod keys;
pub mod signature;

pub use errors::CryptoError;
pub use hashing::{sha256, sha256d, sha512};
pub use keys::{PrivateKey, PublicKey};
pub use signature::CompactSignature;
