//! # Binary Codec
//!
//! Canonical binary encoding for everything the chain hashes or verifies:
//! fixed-width little-endian integers, varint-prefixed strings and
//! collections, optionals, asset amounts and compressed public keys.
//!
//! The encoding is total and deterministic: one logical value has exactly
//! one byte representation, and [`WireDecode`] is its left inverse for
//! every value this client produces.
//!
//! Producers are responsible for presenting map-like pair lists in their
//! canonical order before encoding; the codec serializes pairs as given.

pub mod decode;
pub mod encode;
pub mod errors;
pub mod varint;

pub use decode::{decode_all, ByteReader, WireDecode};
pub use encode::{encode_to_vec, WireEncode};
pub use errors::CodecError;
