use std::ops::Range;

use super::error::SectionError;

/// Largest value a SysEx data byte can carry.
const MAX_DATA_BYTE: u8 = 0x7F;
const ASCII_LIMIT: u8 = 0x80;

/// Safe field access within one fixed-width record.
pub struct RecordReader<'a> {
    bytes: &'a [u8],
}

impl<'a> RecordReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), SectionError> {
        if self.bytes.len() < needed {
            return Err(SectionError::OutOfRange {
                needed,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    /// One SysEx data byte; bit 7 must be clear.
    pub fn read_u8(&self, offset: usize) -> Result<u8, SectionError> {
        let value = self
            .bytes
            .get(offset)
            .copied()
            .ok_or(SectionError::OutOfRange {
                needed: offset + 1,
                actual: self.bytes.len(),
            })?;
        if value > MAX_DATA_BYTE {
            return Err(SectionError::InvalidDataByte { offset, value });
        }
        Ok(value)
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], SectionError> {
        self.bytes
            .get(range.clone())
            .ok_or(SectionError::OutOfRange {
                needed: range.end,
                actual: self.bytes.len(),
            })
    }

    /// `width` bits starting at bit `shift` (bit 0 is the least significant).
    pub fn read_bits(&self, offset: usize, shift: u32, width: u32) -> Result<u8, SectionError> {
        let byte = self.read_u8(offset)?;
        let mask = (1u16 << width) - 1;
        Ok(((u16::from(byte) >> shift) & mask) as u8)
    }

    pub fn read_flag(&self, offset: usize, bit: u32) -> Result<bool, SectionError> {
        Ok(self.read_bits(offset, bit, 1)? == 1)
    }

    /// Bipolar parameter stored with an offset, e.g. 0~100 meaning ±50.
    pub fn read_centered(&self, offset: usize, center: i8) -> Result<i8, SectionError> {
        Ok(self.read_u8(offset)? as i8 - center)
    }

    /// Wave numbers are split across bit 0 of one byte and the low seven bits
    /// of another.
    pub fn read_wave(&self, high_offset: usize, low_offset: usize) -> Result<u16, SectionError> {
        let high = u16::from(self.read_bits(high_offset, 0, 1)?);
        let low = u16::from(self.read_u8(low_offset)?);
        Ok((high << 7) | low)
    }

    /// Decode a 7-bit ASCII name without trimming.
    ///
    /// Bytes at or above 0x80 fail in strict mode and decode as U+FFFD
    /// otherwise.
    pub fn read_name(&self, range: Range<usize>, strict: bool) -> Result<String, SectionError> {
        let start = range.start;
        let bytes = self.read_slice(range)?;
        let mut name = String::with_capacity(bytes.len());
        for (i, &value) in bytes.iter().enumerate() {
            if value < ASCII_LIMIT {
                name.push(char::from(value));
            } else if strict {
                return Err(SectionError::InvalidCharacter {
                    offset: start + i,
                    value,
                });
            } else {
                name.push(char::REPLACEMENT_CHARACTER);
            }
        }
        Ok(name)
    }
}
