//! Chain parameters for the known Beowulf networks.
//!
//! The chain id binds every signature to one network; the prefix selects
//! the textual form of public keys.

use crate::asset::SymbolTable;
use crate::errors::TypeError;

/// Textual public-key prefix used on all Beowulf networks.
pub const DEFAULT_PREFIX: &str = "BEO";

/// The all-zero block-signing key in its textual form.
///
/// Supernodes publish this key to signal they have stopped producing.
pub const NULL_SIGNING_KEY: &str = "BEO1111111111111111111111111111111114T1Anm";

const MAINNET_CHAIN_ID: &str = "e2222eeabcf9224632c82ec86ba3d77b359e3b5cb8a089ddd45090c31c98e3f2";
const TESTNET_CHAIN_ID: &str = "430b37f23cf146d42f15376f341d7f8f5a1ad6f4e63affdeb5dc61d55d8c95a7";

/// Known Beowulf networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Production network.
    Mainnet,
    /// Public test network.
    Testnet,
}

/// Parameters of one network: chain id, key prefix and the asset table.
#[derive(Debug, Clone)]
pub struct ChainParams {
    chain_id: [u8; 32],
    prefix: String,
    symbols: SymbolTable,
}

impl ChainParams {
    /// Parameters of a known network.
    pub fn new(network: Network) -> Self {
        let hex_id = match network {
            Network::Mainnet => MAINNET_CHAIN_ID,
            Network::Testnet => TESTNET_CHAIN_ID,
        };
        // The built-in ids are valid 32-byte hex by construction.
        Self::custom(hex_id, DEFAULT_PREFIX).unwrap_or_else(|_| unreachable!())
    }

    /// Mainnet parameters.
    pub fn mainnet() -> Self {
        Self::new(Network::Mainnet)
    }

    /// Testnet parameters.
    pub fn testnet() -> Self {
        Self::new(Network::Testnet)
    }

    /// Parameters of a private or development network.
    pub fn custom(chain_id_hex: &str, prefix: &str) -> Result<Self, TypeError> {
        let bytes =
            hex::decode(chain_id_hex).map_err(|_| TypeError::InvalidChainId(chain_id_hex.into()))?;
        let chain_id: [u8; 32] = bytes
            .try_into()
            .map_err(|_| TypeError::InvalidChainId(chain_id_hex.into()))?;
        Ok(Self {
            chain_id,
            prefix: prefix.to_string(),
            symbols: SymbolTable::default(),
        })
    }

    /// Raw 32-byte chain id, prepended to the transaction encoding when
    /// computing the signing digest.
    pub fn chain_id(&self) -> &[u8; 32] {
        &self.chain_id
    }

    /// Public-key text prefix (`"BEO"`).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Symbol→precision table for this network.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Mutable access to the symbol table, for registering SMT tokens
    /// discovered at runtime.
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }
}

impl Default for ChainParams {
    fn default() -> Self {
        Self::mainnet()
    }
}
