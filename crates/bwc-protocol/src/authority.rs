//! Weighted-threshold signer sets.
//!
//! An [`Authority`] lists direct keys and delegated accounts, each with a
//! weight, plus the threshold their combined weight must reach. Canonical
//! ordering (accounts lexicographic, keys by textual form) is enforced
//! here, at construction, so the codec can serialize the maps in given
//! order.

use crate::errors::ProtocolError;
use bwc_codec::{ByteReader, WireDecode, WireEncode};
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};
use shared_crypto::PublicKey;

/// A weighted multi-signature policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    weight_threshold: u32,
    account_auths: Vec<(String, u16)>,
    key_auths: Vec<(PublicKey, u16)>,
    prefix: String,
}

impl Authority {
    /// Build an authority, sorting both auth maps canonically.
    ///
    /// The listed weights need not reach the threshold at authoring time;
    /// the chain enforces sufficiency at execution.
    pub fn new(
        weight_threshold: u32,
        account_auths: Vec<(String, u16)>,
        key_auths: Vec<(PublicKey, u16)>,
        prefix: &str,
    ) -> Result<Self, ProtocolError> {
        if weight_threshold == 0 {
            return Err(ProtocolError::InvalidAuthority(
                "weight_threshold must be positive".to_string(),
            ));
        }
        let mut account_auths = account_auths;
        account_auths.sort_by(|a, b| a.0.cmp(&b.0));
        if account_auths.windows(2).any(|w| w[0].0 == w[1].0) {
            return Err(ProtocolError::InvalidAuthority(
                "duplicate account in account_auths".to_string(),
            ));
        }
        let mut key_auths: Vec<(PublicKey, u16, String)> = key_auths
            .into_iter()
            .map(|(key, weight)| {
                let text = key.to_text(prefix);
                (key, weight, text)
            })
            .collect();
        key_auths.sort_by(|a, b| a.2.cmp(&b.2));
        if key_auths.windows(2).any(|w| w[0].2 == w[1].2) {
            return Err(ProtocolError::InvalidAuthority(
                "duplicate key in key_auths".to_string(),
            ));
        }
        Ok(Self {
            weight_threshold,
            account_auths,
            key_auths: key_auths.into_iter().map(|(k, w, _)| (k, w)).collect(),
            prefix: prefix.to_string(),
        })
    }

    /// Single-key authority with threshold 1.
    pub fn single_key(key: PublicKey, prefix: &str) -> Self {
        // One key, no duplicates possible.
        Self::new(1, Vec::new(), vec![(key, 1)], prefix)
            .unwrap_or_else(|_| unreachable!())
    }

    /// The quorum the matched weights must reach.
    pub fn weight_threshold(&self) -> u32 {
        self.weight_threshold
    }

    /// Delegated accounts, lexicographically sorted.
    pub fn account_auths(&self) -> &[(String, u16)] {
        &self.account_auths
    }

    /// Direct keys, sorted by textual form.
    pub fn key_auths(&self) -> &[(PublicKey, u16)] {
        &self.key_auths
    }

    /// Network prefix used for the keys' textual forms.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Decode from canonical wire bytes.
    pub fn decode(reader: &mut ByteReader<'_>, prefix: &str) -> Result<Self, ProtocolError> {
        let weight_threshold = u32::decode(reader)?;
        let account_auths = Vec::<(String, u16)>::decode(reader)?;
        let key_auths = Vec::<(PublicKey, u16)>::decode(reader)?;
        Self::new(weight_threshold, account_auths, key_auths, prefix)
    }
}

/// Threshold, then the account map, then the key map.
impl WireEncode for Authority {
    fn encode(&self, out: &mut Vec<u8>) {
        self.weight_threshold.encode(out);
        self.account_auths.encode(out);
        self.key_auths.encode(out);
    }
}

impl Serialize for Authority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct KeyAuths<'a>(&'a Authority);
        impl Serialize for KeyAuths<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut seq = serializer.serialize_seq(Some(self.0.key_auths.len()))?;
                for (key, weight) in &self.0.key_auths {
                    seq.serialize_element(&(key.to_text(&self.0.prefix), *weight))?;
                }
                seq.end()
            }
        }

        let mut state = serializer.serialize_struct("Authority", 3)?;
        state.serialize_field("weight_threshold", &self.weight_threshold)?;
        state.serialize_field("account_auths", &self.account_auths)?;
        state.serialize_field("key_auths", &KeyAuths(self))?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bwc_codec::encode_to_vec;
    use shared_crypto::PrivateKey;

    fn key(seed: u8) -> PublicKey {
        PrivateKey::from_bytes([seed; 32]).unwrap().public_key()
    }

    #[test]
    fn test_accounts_sorted_lexicographically() {
        let authority = Authority::new(
            1,
            vec![("zeta".into(), 1), ("alpha".into(), 2)],
            Vec::new(),
            "BEO",
        )
        .unwrap();
        assert_eq!(authority.account_auths()[0].0, "alpha");
        assert_eq!(authority.account_auths()[1].0, "zeta");
    }

    #[test]
    fn test_keys_sorted_by_textual_form() {
        let (a, b) = (key(1), key(2));
        let forward = Authority::new(1, Vec::new(), vec![(a, 1), (b, 2)], "BEO").unwrap();
        let reversed = Authority::new(1, Vec::new(), vec![(b, 2), (a, 1)], "BEO").unwrap();
        assert_eq!(forward, reversed);

        let texts: Vec<String> = forward
            .key_auths()
            .iter()
            .map(|(k, _)| k.to_text("BEO"))
            .collect();
        let mut sorted = texts.clone();
        sorted.sort();
        assert_eq!(texts, sorted);
    }

    #[test]
    fn test_encoding_deterministic_regardless_of_input_order() {
        let (a, b) = (key(3), key(4));
        let one = Authority::new(
            2,
            vec![("bob".into(), 1), ("alice".into(), 1)],
            vec![(a, 1), (b, 1)],
            "BEO",
        )
        .unwrap();
        let two = Authority::new(
            2,
            vec![("alice".into(), 1), ("bob".into(), 1)],
            vec![(b, 1), (a, 1)],
            "BEO",
        )
        .unwrap();
        assert_eq!(encode_to_vec(&one), encode_to_vec(&two));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        assert!(Authority::new(0, Vec::new(), Vec::new(), "BEO").is_err());
    }

    #[test]
    fn test_duplicates_rejected() {
        let k = key(5);
        assert!(Authority::new(1, Vec::new(), vec![(k, 1), (k, 2)], "BEO").is_err());
        assert!(Authority::new(
            1,
            vec![("alice".into(), 1), ("alice".into(), 2)],
            Vec::new(),
            "BEO"
        )
        .is_err());
    }

    #[test]
    fn test_wire_round_trip() {
        let authority = Authority::new(
            3,
            vec![("alice".into(), 1)],
            vec![(key(6), 2), (key(7), 1)],
            "BEO",
        )
        .unwrap();
        let bytes = encode_to_vec(&authority);
        let mut reader = ByteReader::new(&bytes);
        let decoded = Authority::decode(&mut reader, "BEO").unwrap();
        assert!(reader.is_empty());
        assert_eq!(decoded, authority);
    }

    #[test]
    fn test_json_shape() {
        let authority = Authority::single_key(key(8), "BEO");
        let json = serde_json::to_value(&authority).unwrap();
        assert_eq!(json["weight_threshold"], 1);
        assert_eq!(json["account_auths"], serde_json::json!([]));
        assert_eq!(json["key_auths"][0][1], 1);
        assert!(json["key_auths"][0][0]
            .as_str()
            .unwrap()
            .starts_with("BEO"));
    }
}
