//! # Vault Cipher
//!
//! PBKDF2 key derivation and AES-256-CBC encryption for the
//! serialized key set. Parameters are fixed for compatibility with
//! existing wallet files:
//!
//! | Parameter  | Value                        |
//! |------------|------------------------------|
//! | KDF        | PBKDF2-HMAC-SHA256, 1000 it. |
//! | Salt       | 16 random bytes              |
//! | Cipher     | AES-256-CBC, PKCS#7 padding  |
//! | IV         | first 16 bytes of the key    |

use hmac::Hmac;
use sha2::Sha256;
use zeroize::Zeroize;

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::errors::VaultError;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// PBKDF2 iteration count. Fixed by the wallet file format.
pub const KDF_ITERATIONS: u32 = 1_000;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Derived cipher key. Zeroized on drop.
pub struct DerivedKey {
    key: [u8; 32],
    /// Salt the key was derived with.
    pub salt: [u8; SALT_LEN],
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl DerivedKey {
    /// Derives a cipher key from a passphrase, generating a fresh
    /// random salt.
    pub fn new(passphrase: &str) -> Self {
        let mut salt = [0u8; SALT_LEN];
        rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut salt);
        Self::with_salt(passphrase, salt)
    }

    /// Derives a cipher key from a passphrase and a known salt.
    pub fn with_salt(passphrase: &str, salt: [u8; SALT_LEN]) -> Self {
        let mut key = [0u8; 32];
        pbkdf2::pbkdf2::<Hmac<Sha256>>(passphrase.as_bytes(), &salt, KDF_ITERATIONS, &mut key);
        Self { key, salt }
    }

    /// The IV reuses the key's first half. Kept for compatibility
    /// with wallet files written by earlier clients.
    fn iv(&self) -> [u8; 16] {
        let mut iv = [0u8; 16];
        iv.copy_from_slice(&self.key[..16]);
        iv
    }

    /// Encrypts a plaintext under this key.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        Aes256CbcEnc::new(&self.key.into(), &self.iv().into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
    }

    /// Decrypts a ciphertext under this key. A padding failure means
    /// the passphrase was wrong.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, VaultError> {
        Aes256CbcDec::new(&self.key.into(), &self.iv().into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| VaultError::WrongPassphrase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derivation_is_deterministic_per_salt() {
        let a = DerivedKey::with_salt("hunter2", [7u8; SALT_LEN]);
        let b = DerivedKey::with_salt("hunter2", [7u8; SALT_LEN]);
        assert_eq!(a.key, b.key);

        let c = DerivedKey::with_salt("hunter2", [8u8; SALT_LEN]);
        assert_ne!(a.key, c.key);
    }

    #[test]
    fn test_fresh_keys_use_distinct_salts() {
        let a = DerivedKey::new("pass");
        let b = DerivedKey::new("pass");
        assert_ne!(a.salt, b.salt);
    }

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let key = DerivedKey::new("correct horse");
        let plain = b"{\"keys\": []}";
        let cipher = key.encrypt(plain);
        assert_ne!(cipher.as_slice(), plain.as_slice());
        assert_eq!(key.decrypt(&cipher).unwrap(), plain);
    }

    #[test]
    fn test_wrong_passphrase_fails_padding() {
        let key = DerivedKey::new("right");
        let cipher = key.encrypt(b"secret material");
        let wrong = DerivedKey::with_salt("wrong", key.salt);
        assert!(wrong.decrypt(&cipher).is_err());
    }
}
