//! Compact recoverable ECDSA signatures.
//!
//! Wire layout is 65 bytes: one header byte (`31 + recovery_id`, the
//! compressed-key convention) followed by `r ‖ s`. Signing is RFC 6979
//! deterministic with low-S normalization.

use crate::errors::CryptoError;
use crate::keys::PublicKey;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use std::fmt;

/// Header offset for recoverable signatures over compressed keys.
const COMPACT_HEADER_BASE: u8 = 31;

/// A 65-byte recoverable signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompactSignature([u8; 65]);

impl CompactSignature {
    pub(crate) fn sign(key: &SigningKey, digest: &[u8; 32]) -> Result<Self, CryptoError> {
        let (signature, recovery_id) = key
            .sign_prehash_recoverable(digest)
            .map_err(|_| CryptoError::InvalidSignature)?;
        let mut bytes = [0u8; 65];
        bytes[0] = COMPACT_HEADER_BASE + recovery_id.to_byte();
        bytes[1..].copy_from_slice(&signature.to_bytes());
        Ok(Self(bytes))
    }

    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// Parse the hex form used in wire JSON.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s).map_err(|_| CryptoError::InvalidSignature)?;
        let bytes: [u8; 65] = bytes.try_into().map_err(|_| CryptoError::InvalidSignature)?;
        Ok(Self(bytes))
    }

    /// Recover the signing public key from the digest that was signed.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<PublicKey, CryptoError> {
        let recovery_id = self.0[0]
            .checked_sub(COMPACT_HEADER_BASE)
            .and_then(RecoveryId::from_byte)
            .ok_or(CryptoError::InvalidSignature)?;
        let signature =
            Signature::from_slice(&self.0[1..]).map_err(|_| CryptoError::InvalidSignature)?;
        let verifying_key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
            .map_err(|_| CryptoError::RecoveryFailed)?;
        let sec1_bytes = verifying_key.to_sec1_bytes();
        let mut raw = [0u8; 33];
        raw.copy_from_slice(&sec1_bytes[..33]);
        Ok(PublicKey::from_bytes(raw))
    }
}

impl fmt::Display for CompactSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for CompactSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactSignature({self})")
    }
}
