use serde::{Deserialize, Serialize};

use super::error::SectionError;
use super::layout::drum;
use super::reader::RecordReader;
use super::records::decode_records;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrumSource {
    pub wave: u16,
    pub decay: u8,
    pub tune: i8,
    pub level: u8,
}

/// Settings for one key of the drum map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrumNote {
    /// MIDI note number, 36–96.
    pub key: u8,
    pub submix: u8,
    pub sources: [DrumSource; drum::NOTE_SOURCE_COUNT],
}

/// The single drum patch of a bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrumPatch {
    /// 0-indexed MIDI receive channel.
    pub receive_channel: u8,
    pub volume: u8,
    pub velocity_depth: i8,
    pub notes: Vec<DrumNote>,
}

/// Decode the drum block: an 11-byte common part followed by 61 note
/// records of 11 bytes.
pub fn parse_drum(block: &[u8]) -> Result<DrumPatch, SectionError> {
    let reader = RecordReader::new(block);
    reader.require_len(drum::BLOCK_SIZE)?;

    let note_bytes = reader.read_slice(drum::COMMON_SIZE..drum::BLOCK_SIZE)?;
    let notes = decode_records(note_bytes, drum::NOTE_SIZE, drum::NOTE_COUNT)?
        .map(|note| parse_note(note.index, note.bytes))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DrumPatch {
        receive_channel: reader.read_bits(drum::RECEIVE_CHANNEL, 0, 4)?,
        volume: reader.read_u8(drum::VOLUME)?,
        velocity_depth: reader.read_centered(drum::VELOCITY_DEPTH, 50)?,
        notes,
    })
}

fn parse_note(index: usize, bytes: &[u8]) -> Result<DrumNote, SectionError> {
    let reader = RecordReader::new(bytes);
    Ok(DrumNote {
        key: drum::FIRST_NOTE_KEY + index as u8,
        submix: reader.read_bits(drum::NOTE_SUBMIX, 4, 3)?,
        sources: [read_source(&reader, 0)?, read_source(&reader, 1)?],
    })
}

fn read_source(reader: &RecordReader<'_>, s: usize) -> Result<DrumSource, SectionError> {
    Ok(DrumSource {
        wave: reader.read_wave(drum::NOTE_WAVE_HIGH + s, drum::NOTE_WAVE_LOW + s)?,
        decay: reader.read_u8(drum::NOTE_DECAY + s)?,
        tune: reader.read_centered(drum::NOTE_TUNE + s, 50)?,
        level: reader.read_u8(drum::NOTE_LEVEL + s)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Vec<u8> {
        let mut block = vec![0u8; drum::BLOCK_SIZE];
        block[drum::RECEIVE_CHANNEL] = 9;
        block[drum::VOLUME] = 100;
        block[drum::VELOCITY_DEPTH] = 75;
        for i in 0..drum::NOTE_COUNT {
            let base = drum::COMMON_SIZE + i * drum::NOTE_SIZE;
            block[base + drum::NOTE_TUNE] = 50;
            block[base + drum::NOTE_TUNE + 1] = 50;
        }
        block
    }

    #[test]
    fn parse_common_and_61_notes() {
        let patch = parse_drum(&block()).unwrap();
        assert_eq!(patch.receive_channel, 9);
        assert_eq!(patch.volume, 100);
        assert_eq!(patch.velocity_depth, 25);
        assert_eq!(patch.notes.len(), 61);
        assert_eq!(patch.notes.first().unwrap().key, 36);
        assert_eq!(patch.notes.last().unwrap().key, 96);
        assert!(patch.notes.iter().all(|n| n.sources[0].tune == 0));
    }

    #[test]
    fn note_fields_per_source() {
        let mut bytes = block();
        let base = drum::COMMON_SIZE + 4 * drum::NOTE_SIZE;
        bytes[base] = 0b0101_0001;
        bytes[base + 1] = 0b0000_0000;
        bytes[base + drum::NOTE_WAVE_LOW] = 0x10;
        bytes[base + drum::NOTE_WAVE_LOW + 1] = 0x22;
        bytes[base + drum::NOTE_DECAY + 1] = 60;
        bytes[base + drum::NOTE_TUNE] = 40;
        bytes[base + drum::NOTE_LEVEL] = 99;

        let patch = parse_drum(&bytes).unwrap();
        let note = &patch.notes[4];
        assert_eq!(note.key, 40);
        assert_eq!(note.submix, 5);
        assert_eq!(note.sources[0].wave, 0x90);
        assert_eq!(note.sources[1].wave, 0x22);
        assert_eq!(note.sources[1].decay, 60);
        assert_eq!(note.sources[0].tune, -10);
        assert_eq!(note.sources[0].level, 99);
    }

    #[test]
    fn short_block_is_out_of_range() {
        let err = parse_drum(&[0u8; 681]).unwrap_err();
        assert_eq!(
            err,
            SectionError::OutOfRange {
                needed: 682,
                actual: 681
            }
        );
    }
}
