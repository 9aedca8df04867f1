//! Core domain entities.
//!
//! Immutable value objects fetched from or returned by the remote node.

use crate::errors::TypeError;
use serde::{Deserialize, Serialize};

/// A 20-byte block id as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockId(pub [u8; 20]);

impl BlockId {
    /// Parse from the node's hex representation.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        bytes.try_into().ok().map(Self)
    }
}

/// The latest known chain head, used to anchor new transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadBlock {
    /// Height of the head block.
    pub number: u64,
    /// Its block id.
    pub id: BlockId,
}

impl HeadBlock {
    /// Low 16 bits of the head block number.
    pub fn ref_block_num(&self) -> u16 {
        (self.number & 0xFFFF) as u16
    }

    /// Bytes 4..8 of the block id as a little-endian u32.
    ///
    /// The first four id bytes repeat the block number, so the prefix
    /// starts after them.
    pub fn ref_block_prefix(&self) -> u32 {
        u32::from_le_bytes([self.id.0[4], self.id.0[5], self.id.0[6], self.id.0[7]])
    }
}

/// Receipt returned by a synchronous broadcast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BroadcastReceipt {
    /// Transaction id assigned by the node.
    pub id: String,
    /// Block the transaction was included in, if already known.
    #[serde(default)]
    pub block_num: Option<u64>,
    /// Position within that block.
    #[serde(default)]
    pub trx_num: Option<u32>,
    /// Whether the transaction expired before inclusion.
    #[serde(default)]
    pub expired: bool,
}

/// Validate an account name: 3..=16 chars, lowercase alphanumerics,
/// dots and dashes, starting with a letter.
pub fn validate_account_name(name: &str) -> Result<(), TypeError> {
    let len = name.len();
    if !(3..=16).contains(&len) {
        return Err(TypeError::InvalidAccountName(name.to_string()));
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap_or(' ');
    if !first.is_ascii_lowercase() {
        return Err(TypeError::InvalidAccountName(name.to_string()));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-')
    {
        return Err(TypeError::InvalidAccountName(name.to_string()));
    }
    Ok(())
}
