//! Ports for authority resolution.
//!
//! The account directory is a remote, read-only capability; the key
//! lookup is satisfied locally by the wallet or the vault.

use bwc_protocol::Authority;
use shared_crypto::{PrivateKey, PublicKey};
use std::fmt;
use thiserror::Error;

/// Permission level a signature is gathered for.
///
/// Beowulf accounts carry a single owner authority today; the role enum
/// keeps directory lookups explicit should more levels appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The owner permission.
    Owner,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Owner => f.write_str("owner"),
        }
    }
}

/// Error from an account-directory lookup.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// Transport failure talking to the node.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Gateway to the remote account directory.
#[async_trait::async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Fetch the authority of `account` for `role`.
    ///
    /// Returns `Ok(None)` when the account does not exist.
    async fn get_authority(
        &self,
        account: &str,
        role: Role,
    ) -> Result<Option<Authority>, DirectoryError>;
}

/// Local lookup from public key to held private key.
pub trait KeyLookup {
    /// The private key matching `public`, if held.
    fn private_key_for(&self, public: &PublicKey) -> Option<PrivateKey>;
}

/// A plain list of keys is enough for a lookup.
impl KeyLookup for Vec<PrivateKey> {
    fn private_key_for(&self, public: &PublicKey) -> Option<PrivateKey> {
        self.iter()
            .find(|key| key.public_key() == *public)
            .cloned()
    }
}
