//! Vault error types.

use thiserror::Error;

/// Errors that can occur in the key vault.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The integrity checksum did not match after decryption.
    ///
    /// Nothing decrypted under the wrong passphrase ever leaves the
    /// vault; this is the only signal the caller gets.
    #[error("Wrong passphrase")]
    WrongPassphrase,

    /// An operation needing key material was attempted while locked.
    #[error("Vault is locked")]
    Locked,

    /// There is no encrypted record to unlock yet.
    #[error("Vault holds no encrypted record")]
    NoRecord,

    /// A key being imported was not valid WIF.
    #[error("Invalid private key format: {0}")]
    InvalidKeyFormat(#[from] shared_crypto::CryptoError),

    /// The on-disk document was structurally invalid.
    #[error("Malformed vault record: {0}")]
    Malformed(String),

    /// Reading or writing the vault file failed.
    #[error("Vault file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
