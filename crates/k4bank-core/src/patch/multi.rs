use std::fmt;

use serde::{Deserialize, Serialize};

use super::DecodeOptions;
use super::error::SectionError;
use super::layout::{self, multi};
use super::reader::RecordReader;
use super::records::decode_records;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VelocitySwitch {
    All,
    Soft,
    Loud,
}

impl VelocitySwitch {
    fn from_bits(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::All),
            1 => Some(Self::Soft),
            2 => Some(Self::Loud),
            _ => None,
        }
    }
}

impl fmt::Display for VelocitySwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "ALL",
            Self::Soft => "SOFT",
            Self::Loud => "LOUD",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    Keyboard,
    Midi,
    Mix,
}

impl PlayMode {
    fn from_bits(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Keyboard),
            1 => Some(Self::Midi),
            2 => Some(Self::Mix),
            _ => None,
        }
    }
}

impl fmt::Display for PlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Keyboard => "KEYB",
            Self::Midi => "MIDI",
            Self::Mix => "MIX",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardZone {
    pub low: u8,
    pub high: u8,
}

/// One of the eight instrument sections of a multi patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiSection {
    /// Index into the single patches, 0–63.
    pub single_number: u8,
    pub zone: KeyboardZone,
    /// 0-indexed MIDI receive channel.
    pub receive_channel: u8,
    pub velocity_switch: VelocitySwitch,
    pub muted: bool,
    pub submix: u8,
    pub play_mode: PlayMode,
    pub level: u8,
    pub transpose: i8,
    pub tune: i8,
}

/// A decoded multi (layered/split) patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiPatch {
    pub name: String,
    pub volume: u8,
    pub effect: u8,
    pub sections: Vec<MultiSection>,
}

pub fn parse_multi(record: &[u8], options: &DecodeOptions) -> Result<MultiPatch, SectionError> {
    let reader = RecordReader::new(record);
    reader.require_len(multi::RECORD_SIZE)?;

    let name = reader.read_name(layout::NAME_RANGE, options.strict_names)?;
    let section_bytes = reader.read_slice(multi::SECTIONS_OFFSET..multi::CHECKSUM)?;
    let sections = decode_records(section_bytes, multi::SECTION_SIZE, multi::SECTION_COUNT)?
        .map(|section| parse_section(section.bytes))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MultiPatch {
        name,
        volume: reader.read_u8(multi::VOLUME)?,
        effect: reader.read_u8(multi::EFFECT)?,
        sections,
    })
}

fn parse_section(bytes: &[u8]) -> Result<MultiSection, SectionError> {
    let reader = RecordReader::new(bytes);

    let velocity_bits = reader.read_bits(multi::SECTION_CHANNEL_VELOCITY_MUTE, 4, 2)?;
    let velocity_switch =
        VelocitySwitch::from_bits(velocity_bits).ok_or(SectionError::InvalidField {
            field: "velocity switch",
            value: velocity_bits,
        })?;

    let mode_bits = reader.read_bits(multi::SECTION_SUBMIX_PLAY_MODE, 3, 2)?;
    let play_mode = PlayMode::from_bits(mode_bits).ok_or(SectionError::InvalidField {
        field: "play mode",
        value: mode_bits,
    })?;

    Ok(MultiSection {
        single_number: reader.read_u8(multi::SECTION_SINGLE)?,
        zone: KeyboardZone {
            low: reader.read_u8(multi::SECTION_ZONE_LOW)?,
            high: reader.read_u8(multi::SECTION_ZONE_HIGH)?,
        },
        receive_channel: reader.read_bits(multi::SECTION_CHANNEL_VELOCITY_MUTE, 0, 4)?,
        velocity_switch,
        muted: reader.read_flag(multi::SECTION_CHANNEL_VELOCITY_MUTE, 6)?,
        submix: reader.read_bits(multi::SECTION_SUBMIX_PLAY_MODE, 0, 3)?,
        play_mode,
        level: reader.read_u8(multi::SECTION_LEVEL)?,
        transpose: reader.read_centered(multi::SECTION_TRANSPOSE, 24)?,
        tune: reader.read_centered(multi::SECTION_TUNE, 50)?,
    })
}
