use super::error::EnvelopeError;
use super::layout;

pub struct EnvelopeReader<'a> {
    bytes: &'a [u8],
}

impl<'a> EnvelopeReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn require_header(&self) -> Result<(), EnvelopeError> {
        if self.bytes.len() < layout::HEADER_SIZE {
            return Err(EnvelopeError::TooShort {
                needed: layout::HEADER_SIZE,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, EnvelopeError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(EnvelopeError::TooShort {
                needed: offset + 1,
                actual: self.bytes.len(),
            })
    }

    /// MIDI channels travel 0-indexed and are shown 1-indexed.
    pub fn read_channel(&self) -> Result<(u8, u8), EnvelopeError> {
        let raw = self.read_u8(layout::CHANNEL_OFFSET)?;
        Ok((raw, raw.saturating_add(1)))
    }
}
