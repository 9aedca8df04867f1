//! Signature production over the chain-bound digest.
//!
//! Signatures are appended in key resolution order. Re-signing with a
//! key whose public counterpart already signed replaces that signature
//! in place, so repeating a signing pass is idempotent.

use bwc_protocol::{SignedTransaction, UnsignedTransaction};
use shared_crypto::{CryptoError, PrivateKey};

/// Signs an assembled transaction with every resolved key.
pub fn sign_transaction(
    transaction: UnsignedTransaction,
    keys: &[PrivateKey],
    chain_id: &[u8; 32],
) -> Result<SignedTransaction, CryptoError> {
    let mut signed = SignedTransaction::new(transaction, Vec::new());
    resign(&mut signed, keys, chain_id)?;
    Ok(signed)
}

/// Adds signatures for `keys` to an already-signed transaction.
///
/// The signer each existing signature belongs to is recovered from the
/// digest, so stale signatures by the same key are replaced rather
/// than duplicated.
pub fn resign(
    signed: &mut SignedTransaction,
    keys: &[PrivateKey],
    chain_id: &[u8; 32],
) -> Result<(), CryptoError> {
    let digest = signed.transaction.signing_digest(chain_id);
    for key in keys {
        let public = key.public_key();
        let signature = key.sign_digest(&digest)?;
        let existing = signed
            .signatures
            .iter()
            .position(|sig| sig.recover(&digest).ok() == Some(public));
        match existing {
            Some(slot) => signed.signatures[slot] = signature,
            None => signed.signatures.push(signature),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared_types::{BlockId, HeadBlock};

    const CHAIN_ID: [u8; 32] = [0x43; 32];

    fn transaction() -> UnsignedTransaction {
        let head = HeadBlock {
            number: 77,
            id: BlockId([9u8; 20]),
        };
        let expiration = Utc.with_ymd_and_hms(2021, 3, 1, 12, 0, 0).unwrap();
        UnsignedTransaction::new(&head, expiration, Vec::new())
    }

    #[test]
    fn test_one_signature_per_key() {
        let keys = vec![PrivateKey::generate(), PrivateKey::generate()];
        let signed = sign_transaction(transaction(), &keys, &CHAIN_ID).unwrap();
        assert_eq!(signed.signatures.len(), 2);

        let digest = signed.transaction.signing_digest(&CHAIN_ID);
        for (key, sig) in keys.iter().zip(&signed.signatures) {
            assert_eq!(sig.recover(&digest).unwrap(), key.public_key());
        }
    }

    #[test]
    fn test_resign_is_idempotent() {
        let keys = vec![PrivateKey::generate()];
        let mut signed = sign_transaction(transaction(), &keys, &CHAIN_ID).unwrap();
        resign(&mut signed, &keys, &CHAIN_ID).unwrap();
        assert_eq!(signed.signatures.len(), 1);
    }

    #[test]
    fn test_resign_extends_with_new_keys() {
        let first = vec![PrivateKey::generate()];
        let second = vec![PrivateKey::generate()];
        let mut signed = sign_transaction(transaction(), &first, &CHAIN_ID).unwrap();
        resign(&mut signed, &second, &CHAIN_ID).unwrap();
        assert_eq!(signed.signatures.len(), 2);
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let key = PrivateKey::generate();
        let keys = vec![key.clone(), key];
        let signed = sign_transaction(transaction(), &keys, &CHAIN_ID).unwrap();
        assert_eq!(signed.signatures.len(), 1);
    }
}
