//! The transaction envelope.
//!
//! An [`UnsignedTransaction`] anchors itself to a recent block, carries an
//! expiration and the operation list, and hashes into a chain-id-prefixed
//! signing digest. The chain id prefix binds every signature to exactly
//! one network, so a mainnet signature can never replay on testnet.

use crate::operations::Operation;
use crate::errors::ProtocolError;
use bwc_codec::{ByteReader, WireDecode, WireEncode};
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use shared_crypto::{sha256, CompactSignature};
use shared_types::HeadBlock;

/// Wire JSON timestamp format, seconds resolution, no zone suffix.
const EXPIRATION_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

fn serialize_expiration<S: Serializer>(
    value: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(EXPIRATION_FORMAT))
}

fn serialize_signatures<S: Serializer>(
    signatures: &[CompactSignature],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(signatures.iter().map(CompactSignature::to_string))
}

/// A transaction before any signature is attached.
///
/// Immutable once built; signing wraps it into a [`SignedTransaction`]
/// without touching the envelope fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsignedTransaction {
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,
    /// Little-endian u32 from the reference block id.
    pub ref_block_prefix: u32,
    /// Instant after which the chain refuses the transaction.
    #[serde(serialize_with = "serialize_expiration")]
    pub expiration: DateTime<Utc>,
    /// The operations, in execution order.
    pub operations: Vec<Operation>,
    /// Reserved; always empty today.
    pub extensions: Vec<String>,
}

impl UnsignedTransaction {
    /// Build an envelope anchored at `head` and expiring at `expiration`.
    pub fn new(head: &HeadBlock, expiration: DateTime<Utc>, operations: Vec<Operation>) -> Self {
        Self {
            ref_block_num: head.ref_block_num(),
            ref_block_prefix: head.ref_block_prefix(),
            expiration,
            operations,
            extensions: Vec::new(),
        }
    }

    /// The digest signatures are computed over:
    /// SHA-256(chain_id ‖ canonical encoding).
    pub fn signing_digest(&self, chain_id: &[u8; 32]) -> [u8; 32] {
        let mut message = chain_id.to_vec();
        self.encode(&mut message);
        sha256(&message)
    }

    /// Decode from canonical wire bytes.
    pub fn decode(reader: &mut ByteReader<'_>, prefix: &str) -> Result<Self, ProtocolError> {
        let ref_block_num = u16::decode(reader)?;
        let ref_block_prefix = u32::decode(reader)?;
        let epoch = u32::decode(reader)?;
        let expiration =
            DateTime::<Utc>::from_timestamp(i64::from(epoch), 0).unwrap_or(DateTime::UNIX_EPOCH);
        let op_count = reader.read_count()?;
        let mut operations = Vec::with_capacity(op_count);
        for _ in 0..op_count {
            operations.push(Operation::decode(reader, prefix)?);
        }
        let extensions = Vec::<String>::decode(reader)?;
        Ok(Self {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations,
            extensions,
        })
    }
}

impl WireEncode for UnsignedTransaction {
    fn encode(&self, out: &mut Vec<u8>) {
        self.ref_block_num.encode(out);
        self.ref_block_prefix.encode(out);
        // The wire field is a 4-byte epoch; clamp instead of wrapping
        // so an out-of-range expiration cannot alias a valid instant.
        let epoch = self.expiration.timestamp().clamp(0, i64::from(u32::MAX)) as u32;
        epoch.encode(out);
        self.operations.encode(out);
        self.extensions.encode(out);
    }
}

/// The envelope plus its signature list, in resolution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedTransaction {
    /// The immutable envelope.
    #[serde(flatten)]
    pub transaction: UnsignedTransaction,
    /// One compact recoverable signature per resolved key.
    #[serde(serialize_with = "serialize_signatures")]
    pub signatures: Vec<CompactSignature>,
}

impl SignedTransaction {
    /// Wrap an envelope with its signatures.
    pub fn new(transaction: UnsignedTransaction, signatures: Vec<CompactSignature>) -> Self {
        Self {
            transaction,
            signatures,
        }
    }
}
