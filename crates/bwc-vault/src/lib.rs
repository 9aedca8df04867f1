//! # Key Vault
//!
//! At-rest protection for private key material. Keys are serialized to a
//! small JSON document, encrypted under a password-derived AES-256-CBC
//! key, and guarded by a SHA-512 checksum of the plaintext so a wrong
//! passphrase is detected instead of yielding garbage keys.
//!
//! The vault is an explicit lock/unlock gate: key material is decrypted
//! only transiently into memory, never persisted in plaintext, and the
//! unlock must be re-issued per process lifetime.

#![warn(missing_docs)]

pub mod cipher;
pub mod errors;
pub mod record;
pub mod vault;

pub use errors::VaultError;
pub use record::CipherRecord;
pub use vault::KeyVault;
