//! Canonical encoding.

use crate::varint::write_varint;
use shared_crypto::PublicKey;
use shared_types::asset::SYMBOL_WIRE_LEN;
use shared_types::Asset;

/// A value with a canonical wire form.
///
/// Encoding is infallible: type construction has already rejected anything
/// without a wire representation (unknown symbols, oversized names).
pub trait WireEncode {
    /// Append the canonical bytes of `self` to `out`.
    fn encode(&self, out: &mut Vec<u8>);
}

/// Encode one value into a fresh buffer.
pub fn encode_to_vec<T: WireEncode + ?Sized>(value: &T) -> Vec<u8> {
    let mut out = Vec::new();
    value.encode(&mut out);
    out
}

impl WireEncode for u8 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(*self);
    }
}

impl WireEncode for u16 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl WireEncode for u32 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl WireEncode for u64 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl WireEncode for i64 {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_le_bytes());
    }
}

impl WireEncode for bool {
    fn encode(&self, out: &mut Vec<u8>) {
        out.push(u8::from(*self));
    }
}

impl WireEncode for str {
    fn encode(&self, out: &mut Vec<u8>) {
        write_varint(out, self.len() as u64);
        out.extend_from_slice(self.as_bytes());
    }
}

impl WireEncode for String {
    fn encode(&self, out: &mut Vec<u8>) {
        self.as_str().encode(out);
    }
}

/// Lists carry a varint element count, then each element in order.
/// `Vec<u8>` therefore doubles as the length-prefixed byte-string form.
impl<T: WireEncode> WireEncode for Vec<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        self.as_slice().encode(out);
    }
}

impl<T: WireEncode> WireEncode for [T] {
    fn encode(&self, out: &mut Vec<u8>) {
        write_varint(out, self.len() as u64);
        for element in self {
            element.encode(out);
        }
    }
}

/// One presence byte, then the inner encoding if present.
impl<T: WireEncode> WireEncode for Option<T> {
    fn encode(&self, out: &mut Vec<u8>) {
        match self {
            None => out.push(0),
            Some(inner) => {
                out.push(1);
                inner.encode(out);
            }
        }
    }
}

/// Map entries are key-then-value pairs, serialized in given order.
impl<A: WireEncode, B: WireEncode> WireEncode for (A, B) {
    fn encode(&self, out: &mut Vec<u8>) {
        self.0.encode(out);
        self.1.encode(out);
    }
}

/// Amount as 8 bytes, precision as 4, symbol NUL-padded to exactly 9.
impl WireEncode for Asset {
    fn encode(&self, out: &mut Vec<u8>) {
        self.amount().encode(out);
        u32::from(self.precision()).encode(out);
        let mut symbol = [0u8; SYMBOL_WIRE_LEN];
        symbol[..self.symbol().len()].copy_from_slice(self.symbol().as_bytes());
        out.extend_from_slice(&symbol);
    }
}

/// Raw 33-byte compressed point, no length prefix.
impl WireEncode for PublicKey {
    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::SymbolTable;

    #[test]
    fn test_fixed_width_little_endian() {
        assert_eq!(encode_to_vec(&0x0102u16), [0x02, 0x01]);
        assert_eq!(encode_to_vec(&0x01020304u32), [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(encode_to_vec(&(-1i64)), [0xFF; 8]);
    }

    #[test]
    fn test_string_length_prefix() {
        assert_eq!(encode_to_vec("abc"), [3, b'a', b'b', b'c']);
        assert_eq!(encode_to_vec(""), [0]);
    }

    #[test]
    fn test_option_presence_byte() {
        assert_eq!(encode_to_vec(&None::<u16>), [0]);
        assert_eq!(encode_to_vec(&Some(0x0102u16)), [1, 0x02, 0x01]);
    }

    #[test]
    fn test_list_count_prefix() {
        let list: Vec<u16> = vec![1, 2];
        assert_eq!(encode_to_vec(&list), [2, 1, 0, 2, 0]);
        let empty: Vec<u16> = vec![];
        assert_eq!(encode_to_vec(&empty), [0]);
    }

    #[test]
    fn test_asset_wire_layout() {
        let table = SymbolTable::default();
        let asset = Asset::parse("10.00000 BWF", &table).unwrap();
        let bytes = encode_to_vec(&asset);
        assert_eq!(bytes.len(), 8 + 4 + 9);
        assert_eq!(&bytes[..8], &1_000_000i64.to_le_bytes());
        assert_eq!(&bytes[8..12], &5u32.to_le_bytes());
        assert_eq!(&bytes[12..], b"BWF\x00\x00\x00\x00\x00\x00");
    }

    #[test]
    fn test_identical_values_identical_bytes() {
        let table = SymbolTable::default();
        let a = Asset::parse("0.10000 W", &table).unwrap();
        let b = Asset::parse("0.10000 W", &table).unwrap();
        assert_eq!(encode_to_vec(&a), encode_to_vec(&b));
    }
}
