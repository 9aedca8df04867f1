//! # Key Vault
//!
//! | Section   | Contents                                   |
//! |-----------|--------------------------------------------|
//! | `KeySet`  | In-memory plaintext key list               |
//! | `KeyVault`| Lock/unlock gate over an encrypted record  |

use std::path::Path;

use zeroize::Zeroize;

use shared_crypto::{sha512, PrivateKey, PublicKey};

use crate::cipher::DerivedKey;
use crate::errors::VaultError;
use crate::record::CipherRecord;

/// Plaintext key set, serialized as `{"keys": [[public, wif], ...]}`.
///
/// WIF strings are zeroized on drop.
#[derive(serde::Serialize, serde::Deserialize)]
struct KeySet {
    keys: Vec<(String, String)>,
}

impl Drop for KeySet {
    fn drop(&mut self) {
        for (_, wif) in &mut self.keys {
            wif.zeroize();
        }
    }
}

/// Password-protected store for an account's signing keys.
///
/// The vault holds at most one encrypted [`CipherRecord`] and, while
/// unlocked, the corresponding plaintext [`KeySet`]. Locking drops the
/// plaintext; the record survives so the vault can be unlocked again.
pub struct KeyVault {
    account: String,
    prefix: String,
    record: Option<CipherRecord>,
    unlocked: Option<KeySet>,
}

impl KeyVault {
    /// Creates an empty, unlocked vault for an account.
    pub fn new(account: &str, prefix: &str) -> Self {
        Self {
            account: account.to_string(),
            prefix: prefix.to_string(),
            record: None,
            unlocked: Some(KeySet { keys: Vec::new() }),
        }
    }

    /// Wraps an existing encrypted record. The vault starts locked.
    pub fn from_record(record: CipherRecord, prefix: &str) -> Self {
        Self {
            account: record.account.clone(),
            prefix: prefix.to_string(),
            record: Some(record),
            unlocked: None,
        }
    }

    /// Reads an encrypted record from a wallet file. The vault starts
    /// locked.
    pub fn load(path: &Path, prefix: &str) -> Result<Self, VaultError> {
        let doc = std::fs::read_to_string(path)?;
        let record = CipherRecord::from_json(&doc)?;
        Ok(Self::from_record(record, prefix))
    }

    /// Writes the encrypted record to a wallet file. The vault must
    /// have been sealed at least once.
    pub fn save(&self, path: &Path) -> Result<(), VaultError> {
        let record = self.record.as_ref().ok_or(VaultError::NoRecord)?;
        std::fs::write(path, record.to_json()?)?;
        Ok(())
    }

    /// Account this vault belongs to.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Whether key material is currently inaccessible.
    pub fn is_locked(&self) -> bool {
        self.unlocked.is_none()
    }

    /// Decrypts the record into memory.
    ///
    /// The plaintext checksum is verified before any key is exposed;
    /// a mismatch (or a padding failure) reports `WrongPassphrase`.
    pub fn unlock(&mut self, passphrase: &str) -> Result<(), VaultError> {
        if self.unlocked.is_some() {
            return Ok(());
        }
        let record = self.record.as_ref().ok_or(VaultError::NoRecord)?;
        let key = DerivedKey::with_salt(passphrase, record.salt_bytes()?);
        let mut plaintext = key.decrypt(&record.ciphertext()?)?;
        if hex::encode(sha512(&plaintext)) != record.checksum_rawkeys {
            plaintext.zeroize();
            return Err(VaultError::WrongPassphrase);
        }
        let parsed = serde_json::from_slice::<KeySet>(&plaintext);
        plaintext.zeroize();
        let set = parsed.map_err(|_| VaultError::WrongPassphrase)?;
        tracing::debug!(account = %self.account, keys = set.keys.len(), "vault unlocked");
        self.unlocked = Some(set);
        Ok(())
    }

    /// Drops the plaintext key material. The encrypted record stays.
    pub fn lock(&mut self) {
        self.unlocked = None;
        tracing::debug!(account = %self.account, "vault locked");
    }

    /// Imports a WIF private key. Re-importing a key replaces its
    /// existing entry.
    pub fn add_key(&mut self, wif: &str) -> Result<PublicKey, VaultError> {
        let private = PrivateKey::from_wif(wif)?;
        let public = private.public_key();
        let text = public.to_text(&self.prefix);
        let set = self.unlocked.as_mut().ok_or(VaultError::Locked)?;
        set.keys.retain(|(existing, _)| existing != &text);
        set.keys.push((text, wif.to_string()));
        Ok(public)
    }

    /// Removes a key by its textual public form. Returns whether an
    /// entry was removed.
    pub fn remove_key(&mut self, public: &str) -> Result<bool, VaultError> {
        let set = self.unlocked.as_mut().ok_or(VaultError::Locked)?;
        let before = set.keys.len();
        set.keys.retain(|(existing, _)| existing != public);
        Ok(set.keys.len() != before)
    }

    /// Textual public keys currently held.
    pub fn public_keys(&self) -> Result<Vec<String>, VaultError> {
        let set = self.unlocked.as_ref().ok_or(VaultError::Locked)?;
        Ok(set.keys.iter().map(|(public, _)| public.clone()).collect())
    }

    /// Decodes every held private key for signing.
    pub fn private_keys(&self) -> Result<Vec<PrivateKey>, VaultError> {
        let set = self.unlocked.as_ref().ok_or(VaultError::Locked)?;
        set.keys
            .iter()
            .map(|(_, wif)| PrivateKey::from_wif(wif).map_err(VaultError::from))
            .collect()
    }

    /// Encrypts the current key set under a passphrase, replacing the
    /// stored record. The vault stays unlocked.
    pub fn seal(&mut self, passphrase: &str) -> Result<(), VaultError> {
        let set = self.unlocked.as_ref().ok_or(VaultError::Locked)?;
        let mut plaintext =
            serde_json::to_vec(set).map_err(|e| VaultError::Malformed(e.to_string()))?;
        let checksum = hex::encode(sha512(&plaintext));
        let key = DerivedKey::new(passphrase);
        let ciphertext = key.encrypt(&plaintext);
        plaintext.zeroize();
        self.record = Some(CipherRecord::new(
            &self.account,
            &ciphertext,
            key.salt,
            checksum,
        ));
        Ok(())
    }

    /// Re-encrypts the record under a new passphrase. The old one must
    /// still decrypt it.
    pub fn change_passphrase(&mut self, old: &str, new: &str) -> Result<(), VaultError> {
        let was_locked = self.is_locked();
        self.unlock(old)?;
        self.seal(new)?;
        if was_locked {
            self.lock();
        }
        Ok(())
    }
}
