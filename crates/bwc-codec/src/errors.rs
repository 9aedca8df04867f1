//! Codec error types.

use thiserror::Error;

/// Errors that can occur while decoding canonical wire bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Input ended before the value was complete.
    #[error("Unexpected end of input at offset {offset}, needed {needed} more bytes")]
    UnexpectedEof {
        /// Read position when the shortfall was detected.
        offset: usize,
        /// Bytes still required.
        needed: usize,
    },

    /// Bytes remained after the outermost value was decoded.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// Varint ran past the 64-bit range.
    #[error("Varint overflows 64 bits")]
    VarintOverflow,

    /// A string field held invalid UTF-8.
    #[error("Invalid UTF-8 in string field")]
    InvalidUtf8,

    /// A boolean byte was neither 0 nor 1.
    #[error("Invalid boolean byte: {0:#04x}")]
    InvalidBool(u8),

    /// An optional's presence byte was neither 0 nor 1.
    #[error("Invalid optional presence byte: {0:#04x}")]
    InvalidOptionTag(u8),

    /// The 9-byte symbol field was not NUL-padded ASCII.
    #[error("Invalid asset symbol field")]
    InvalidSymbol,

    /// Asset precision outside the u8 range.
    #[error("Asset precision out of range: {0}")]
    PrecisionOutOfRange(u32),

    /// A declared length exceeds the remaining input.
    #[error("Declared length {0} exceeds remaining input")]
    LengthOutOfBounds(u64),
}
