//! Error types shared by the entity layer.

use thiserror::Error;

/// Errors raised while constructing shared value objects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypeError {
    /// Asset symbol absent from the symbol→precision table.
    #[error("Unknown asset symbol: {0}")]
    UnknownSymbol(String),

    /// Amount string not of the form `"<decimal> <SYMBOL>"`.
    #[error("Malformed asset amount: {0}")]
    MalformedAmount(String),

    /// Decimal places in the amount string exceed the symbol precision.
    #[error("Amount {amount} has more than {precision} decimal places")]
    PrecisionExceeded {
        /// The offending amount string.
        amount: String,
        /// The precision the symbol allows.
        precision: u8,
    },

    /// Asset magnitude does not fit a signed 64-bit micro-unit count.
    #[error("Asset amount out of range: {0}")]
    AmountOutOfRange(String),

    /// Symbol longer than the 9-byte wire field.
    #[error("Asset symbol too long: {0}")]
    SymbolTooLong(String),

    /// Account name outside the 3..=16 length bounds or with illegal chars.
    #[error("Invalid account name: {0}")]
    InvalidAccountName(String),

    /// Chain id string is not 32 bytes of hex.
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),
}
