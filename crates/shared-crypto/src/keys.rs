//! secp256k1 key material and its text codecs.
//!
//! Private keys travel as WIF (version byte `0x80`, base58check); public
//! keys as a network prefix followed by base58 of the compressed point and
//! a 4-byte double-SHA-256 checksum.

use crate::errors::CryptoError;
use crate::hashing::sha256d;
use crate::signature::CompactSignature;
use k256::ecdsa::{SigningKey, VerifyingKey};
use std::fmt;
use zeroize::Zeroize;

const WIF_VERSION: u8 = 0x80;

/// base58 body of the all-zero public key.
///
/// The zero point is not on the curve, so it carries a fixed textual form
/// instead of a computed checksum.
const NULL_KEY_BODY: &str = "1111111111111111111111111111111114T1Anm";

fn base58check_encode(payload: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&sha256d(payload)[..4]);
    bs58::encode(data).into_string()
}

fn base58check_decode(text: &str) -> Result<Vec<u8>, CryptoError> {
    let data = bs58::decode(text)
        .into_vec()
        .map_err(|_| CryptoError::BadChecksum)?;
    if data.len() < 4 {
        return Err(CryptoError::BadChecksum);
    }
    let (payload, checksum) = data.split_at(data.len() - 4);
    if checksum != &sha256d(payload)[..4] {
        return Err(CryptoError::BadChecksum);
    }
    Ok(payload.to_vec())
}

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    /// Wrap raw compressed bytes.
    ///
    /// The all-zero key is accepted; it is the chain's conventional
    /// "no signing key" marker and never verifies anything.
    pub fn from_bytes(bytes: [u8; 33]) -> Self {
        Self(bytes)
    }

    /// Raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Whether this is the all-zero null key.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 33]
    }

    /// Textual form: `prefix` ‖ base58(point ‖ checksum).
    pub fn to_text(&self, prefix: &str) -> String {
        if self.is_null() {
            return format!("{prefix}{NULL_KEY_BODY}");
        }
        let mut data = self.0.to_vec();
        data.extend_from_slice(&sha256d(&self.0)[..4]);
        format!("{prefix}{}", bs58::encode(data).into_string())
    }

    /// Parse the textual form back into a key.
    pub fn from_text(text: &str, prefix: &str) -> Result<Self, CryptoError> {
        let body = text.strip_prefix(prefix).ok_or(CryptoError::WrongPrefix {
            expected: prefix.to_string(),
        })?;
        if body == NULL_KEY_BODY {
            return Ok(Self([0u8; 33]));
        }
        let data = bs58::decode(body)
            .into_vec()
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        if data.len() != 37 {
            return Err(CryptoError::InvalidPublicKey);
        }
        let (raw, checksum) = data.split_at(33);
        if checksum != &sha256d(raw)[..4] {
            return Err(CryptoError::BadChecksum);
        }
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(raw);
        // Reject off-curve points early; only the null key is exempt.
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.0))
    }
}

/// secp256k1 private key.
///
/// The scalar lives inside [`SigningKey`], which zeroizes itself on
/// drop; intermediate WIF buffers are wiped here.
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Generate a random key.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
        }
    }

    /// Create from raw scalar bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key = SigningKey::from_bytes((&bytes).into())
            .map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Parse a WIF-encoded key.
    pub fn from_wif(wif: &str) -> Result<Self, CryptoError> {
        let payload = base58check_decode(wif).map_err(|e| match e {
            CryptoError::BadChecksum => CryptoError::BadChecksum,
            _ => CryptoError::InvalidWif,
        })?;
        if payload.len() != 33 || payload[0] != WIF_VERSION {
            return Err(CryptoError::InvalidWif);
        }
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&payload[1..]);
        let key = Self::from_bytes(bytes);
        bytes.zeroize();
        key
    }

    /// Export as WIF.
    pub fn to_wif(&self) -> String {
        let mut payload = vec![WIF_VERSION];
        payload.extend_from_slice(&self.signing_key.to_bytes());
        let wif = base58check_encode(&payload);
        payload.zeroize();
        wif
    }

    /// Derive the compressed public key.
    ///
    /// # Panics
    ///
    /// This function will not panic - the SEC1 compressed form is always
    /// exactly 33 bytes.
    pub fn public_key(&self) -> PublicKey {
        let sec1_bytes = self.signing_key.verifying_key().to_sec1_bytes();
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(&sec1_bytes[..33]);
        PublicKey(bytes)
    }

    /// Sign a 32-byte digest, producing a compact recoverable signature.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<CompactSignature, CryptoError> {
        CompactSignature::sign(&self.signing_key, digest)
    }

    /// Raw scalar bytes (for vault serialization).
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print the scalar.
        write!(f, "PrivateKey({:?})", self.public_key())
    }
}
