//! Decoding, the left inverse of [`crate::encode`].

use crate::errors::CodecError;
use crate::varint::read_varint;
use shared_crypto::PublicKey;
use shared_types::asset::SYMBOL_WIRE_LEN;
use shared_types::Asset;

/// Cursor over canonical wire bytes.
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Start reading at the beginning of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Whether the input is exhausted.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        let slice = self.read_exact(1)?;
        Ok(slice[0])
    }

    /// Read exactly `len` bytes.
    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if self.remaining() < len {
            return Err(CodecError::UnexpectedEof {
                offset: self.pos,
                needed: len - self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a varint-prefixed element count, bounded by the remaining
    /// input so a corrupt prefix cannot drive a huge allocation.
    pub fn read_count(&mut self) -> Result<usize, CodecError> {
        let count = read_varint(self)?;
        if count > self.remaining() as u64 {
            return Err(CodecError::LengthOutOfBounds(count));
        }
        Ok(count as usize)
    }
}

/// A value decodable from its canonical wire form.
pub trait WireDecode: Sized {
    /// Decode one value from the reader.
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError>;
}

/// Decode a single value that must consume the whole input.
pub fn decode_all<T: WireDecode>(bytes: &[u8]) -> Result<T, CodecError> {
    let mut reader = ByteReader::new(bytes);
    let value = T::decode(&mut reader)?;
    if !reader.is_empty() {
        return Err(CodecError::TrailingBytes(reader.remaining()));
    }
    Ok(value)
}

impl WireDecode for u8 {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        reader.read_u8()
    }
}

impl WireDecode for u16 {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let bytes: [u8; 2] = reader.read_exact(2)?.try_into().unwrap_or_default();
        Ok(u16::from_le_bytes(bytes))
    }
}

impl WireDecode for u32 {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let bytes: [u8; 4] = reader.read_exact(4)?.try_into().unwrap_or_default();
        Ok(u32::from_le_bytes(bytes))
    }
}

impl WireDecode for u64 {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let bytes: [u8; 8] = reader.read_exact(8)?.try_into().unwrap_or_default();
        Ok(u64::from_le_bytes(bytes))
    }
}

impl WireDecode for i64 {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let bytes: [u8; 8] = reader.read_exact(8)?.try_into().unwrap_or_default();
        Ok(i64::from_le_bytes(bytes))
    }
}

impl WireDecode for bool {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        match reader.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(CodecError::InvalidBool(other)),
        }
    }
}

impl WireDecode for String {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let len = reader.read_count()?;
        let bytes = reader.read_exact(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8)
    }
}

impl<T: WireDecode> WireDecode for Vec<T> {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let count = reader.read_count()?;
        let mut elements = Vec::with_capacity(count);
        for _ in 0..count {
            elements.push(T::decode(reader)?);
        }
        Ok(elements)
    }
}

impl<T: WireDecode> WireDecode for Option<T> {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        match reader.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(reader)?)),
            other => Err(CodecError::InvalidOptionTag(other)),
        }
    }
}

impl<A: WireDecode, B: WireDecode> WireDecode for (A, B) {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        Ok((A::decode(reader)?, B::decode(reader)?))
    }
}

impl WireDecode for Asset {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let amount = i64::decode(reader)?;
        let precision = u32::decode(reader)?;
        let precision: u8 = precision
            .try_into()
            .map_err(|_| CodecError::PrecisionOutOfRange(precision))?;
        let field = reader.read_exact(SYMBOL_WIRE_LEN)?;
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        if field[end..].iter().any(|&b| b != 0) {
            return Err(CodecError::InvalidSymbol);
        }
        let symbol =
            std::str::from_utf8(&field[..end]).map_err(|_| CodecError::InvalidSymbol)?;
        Asset::from_units(amount, precision, symbol).map_err(|_| CodecError::InvalidSymbol)
    }
}

impl WireDecode for PublicKey {
    fn decode(reader: &mut ByteReader<'_>) -> Result<Self, CodecError> {
        let bytes: [u8; 33] = reader.read_exact(33)?.try_into().unwrap_or([0u8; 33]);
        Ok(PublicKey::from_bytes(bytes))
    }
}
