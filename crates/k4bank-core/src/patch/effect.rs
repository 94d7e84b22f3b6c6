use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::SectionError;
use super::layout::effect;
use super::reader::RecordReader;
use super::records::decode_records;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Reverb1,
    Reverb2,
    Reverb3,
    Reverb4,
    GateReverb,
    ReverseGate,
    NormalDelay,
    StereoPanpotDelay,
    Chorus,
    OverdriveFlanger,
    OverdriveNormalDelay,
    OverdriveReverb,
    NormalDelayNormalDelay,
    NormalDelayStereoPanDelay,
    ChorusNormalDelay,
    ChorusStereoPanDelay,
}

impl EffectType {
    const ALL: [Self; 16] = [
        Self::Reverb1,
        Self::Reverb2,
        Self::Reverb3,
        Self::Reverb4,
        Self::GateReverb,
        Self::ReverseGate,
        Self::NormalDelay,
        Self::StereoPanpotDelay,
        Self::Chorus,
        Self::OverdriveFlanger,
        Self::OverdriveNormalDelay,
        Self::OverdriveReverb,
        Self::NormalDelayNormalDelay,
        Self::NormalDelayStereoPanDelay,
        Self::ChorusNormalDelay,
        Self::ChorusStereoPanDelay,
    ];

    fn from_byte(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Reverb1 => "Reverb 1",
            Self::Reverb2 => "Reverb 2",
            Self::Reverb3 => "Reverb 3",
            Self::Reverb4 => "Reverb 4",
            Self::GateReverb => "Gate Reverb",
            Self::ReverseGate => "Reverse Gate",
            Self::NormalDelay => "Normal Delay",
            Self::StereoPanpotDelay => "Stereo Panpot Delay",
            Self::Chorus => "Chorus",
            Self::OverdriveFlanger => "Overdrive + Flanger",
            Self::OverdriveNormalDelay => "Overdrive + Normal Delay",
            Self::OverdriveReverb => "Overdrive + Reverb",
            Self::NormalDelayNormalDelay => "Normal Delay + Normal Delay",
            Self::NormalDelayStereoPanDelay => "Normal Delay + Stereo Pan Delay",
            Self::ChorusNormalDelay => "Chorus + Normal Delay",
            Self::ChorusStereoPanDelay => "Chorus + Stereo Pan Delay",
        };
        f.write_str(label)
    }
}

/// Pan and effect sends of one submix channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmixSend {
    pub pan: i8,
    pub send1: u8,
    pub send2: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectPatch {
    pub effect_type: EffectType,
    pub param1: u8,
    pub param2: u8,
    pub param3: u8,
    /// Submix channels A–H in order.
    pub submixes: Vec<SubmixSend>,
}

pub fn parse_effect(record: &[u8]) -> Result<EffectPatch, SectionError> {
    let reader = RecordReader::new(record);
    reader.require_len(effect::RECORD_SIZE)?;

    let type_byte = reader.read_u8(effect::EFFECT_TYPE)?;
    let effect_type = EffectType::from_byte(type_byte).ok_or(SectionError::InvalidField {
        field: "effect type",
        value: type_byte,
    })?;

    let submix_bytes = reader.read_slice(effect::SUBMIX_OFFSET..effect::CHECKSUM)?;
    let submixes = decode_records(submix_bytes, effect::SUBMIX_SIZE, effect::SUBMIX_COUNT)?
        .map(|submix| -> Result<SubmixSend, SectionError> {
            let reader = RecordReader::new(submix.bytes);
            Ok(SubmixSend {
                pan: reader.read_centered(effect::SUBMIX_PAN, 7)?,
                send1: reader.read_u8(effect::SUBMIX_SEND1)?,
                send2: reader.read_u8(effect::SUBMIX_SEND2)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(EffectPatch {
        effect_type,
        param1: reader.read_bits(effect::PARAM1, 0, 3)?,
        param2: reader.read_bits(effect::PARAM2, 0, 3)?,
        param3: reader.read_bits(effect::PARAM3, 0, 5)?,
        submixes,
    })
}
