//! Chain-style variable-length integers.
//!
//! Unsigned LEB128: 7 data bits per byte, least-significant group first,
//! continuation bit set on every byte except the last. Operation ids and
//! all length prefixes use this form, and it must match the chain's wire
//! convention bit for bit.

use crate::decode::ByteReader;
use crate::errors::CodecError;

/// Append the varint form of `value` to `out`.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Read one varint from the reader.
pub fn read_varint(reader: &mut ByteReader<'_>) -> Result<u64, CodecError> {
    let mut value: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = reader.read_u8()?;
        if shift == 63 && byte > 1 {
            return Err(CodecError::VarintOverflow);
        }
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
        if shift > 63 {
            return Err(CodecError::VarintOverflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint(&mut out, value);
        let mut reader = ByteReader::new(&out);
        assert_eq!(read_varint(&mut reader).unwrap(), value);
        assert!(reader.is_empty());
        out
    }

    #[test]
    fn test_single_byte_values() {
        assert_eq!(round_trip(0), [0x00]);
        assert_eq!(round_trip(1), [0x01]);
        assert_eq!(round_trip(127), [0x7F]);
    }

    #[test]
    fn test_multi_byte_values() {
        assert_eq!(round_trip(128), [0x80, 0x01]);
        assert_eq!(round_trip(300), [0xAC, 0x02]);
        round_trip(u64::MAX);
    }

    #[test]
    fn test_overflow_rejected() {
        // 11 continuation bytes cannot fit in 64 bits.
        let bytes = [0xFFu8; 11];
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            read_varint(&mut reader),
            Err(CodecError::VarintOverflow)
        ));
    }

    #[test]
    fn test_truncated_input() {
        let bytes = [0x80u8];
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            read_varint(&mut reader),
            Err(CodecError::UnexpectedEof { .. })
        ));
    }
}
