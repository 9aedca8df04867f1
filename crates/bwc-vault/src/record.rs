//! On-disk encrypted wallet document.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::cipher::SALT_LEN;
use crate::errors::VaultError;

/// Cipher identifier written into every record.
pub const CIPHER_TYPE: &str = "aes-256-cbc";

/// The encrypted wallet document as it is stored on disk.
///
/// `cipher_keys` is hex, `salt` is base64, and `checksum_rawkeys` is
/// the SHA-512 hex digest of the plaintext key-set JSON. The mixed
/// encodings are part of the existing file format.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CipherRecord {
    /// AES-256-CBC ciphertext of the key-set JSON, hex encoded.
    pub cipher_keys: String,
    /// PBKDF2 salt, base64 encoded.
    pub salt: String,
    /// SHA-512 hex digest of the plaintext key-set JSON.
    pub checksum_rawkeys: String,
    /// Always [`CIPHER_TYPE`].
    pub cipher_type: String,
    /// Account the wallet belongs to.
    pub account: String,
}

impl CipherRecord {
    /// Builds a record from raw ciphertext and parameters.
    pub fn new(
        account: &str,
        ciphertext: &[u8],
        salt: [u8; SALT_LEN],
        checksum: String,
    ) -> Self {
        Self {
            cipher_keys: hex::encode(ciphertext),
            salt: BASE64.encode(salt),
            checksum_rawkeys: checksum,
            cipher_type: CIPHER_TYPE.to_string(),
            account: account.to_string(),
        }
    }

    /// Decodes the hex ciphertext.
    pub fn ciphertext(&self) -> Result<Vec<u8>, VaultError> {
        hex::decode(&self.cipher_keys)
            .map_err(|e| VaultError::Malformed(format!("cipher_keys is not hex: {e}")))
    }

    /// Decodes the base64 salt.
    pub fn salt_bytes(&self) -> Result<[u8; SALT_LEN], VaultError> {
        let raw = BASE64
            .decode(&self.salt)
            .map_err(|e| VaultError::Malformed(format!("salt is not base64: {e}")))?;
        raw.try_into()
            .map_err(|_| VaultError::Malformed("salt is not 16 bytes".to_string()))
    }

    /// Parses a record from its JSON document.
    pub fn from_json(doc: &str) -> Result<Self, VaultError> {
        let record: Self =
            serde_json::from_str(doc).map_err(|e| VaultError::Malformed(e.to_string()))?;
        if record.cipher_type != CIPHER_TYPE {
            return Err(VaultError::Malformed(format!(
                "unsupported cipher_type {}",
                record.cipher_type
            )));
        }
        Ok(record)
    }

    /// Serializes the record to its JSON document.
    pub fn to_json(&self) -> Result<String, VaultError> {
        serde_json::to_string_pretty(self).map_err(|e| VaultError::Malformed(e.to_string()))
    }
}
