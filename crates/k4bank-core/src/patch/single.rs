use std::fmt;

use serde::{Deserialize, Serialize};

use super::DecodeOptions;
use super::error::SectionError;
use super::layout::{self, single};
use super::reader::RecordReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    Normal,
    Twin,
    Double,
}

impl SourceMode {
    fn from_bits(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Normal),
            1 => Some(Self::Twin),
            2 => Some(Self::Double),
            _ => None,
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "NORM",
            Self::Twin => "TWIN",
            Self::Double => "DBL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolyphonyMode {
    Poly1,
    Poly2,
    Solo1,
    Solo2,
}

impl PolyphonyMode {
    fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Poly1,
            1 => Self::Poly2,
            2 => Self::Solo1,
            _ => Self::Solo2,
        }
    }
}

impl fmt::Display for PolyphonyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Poly1 => "PL1",
            Self::Poly2 => "PL2",
            Self::Solo1 => "SOLO1",
            Self::Solo2 => "SOLO2",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelAssign {
    Vibrato,
    Lfo,
    Dcf,
}

impl WheelAssign {
    fn from_bits(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Vibrato),
            1 => Some(Self::Lfo),
            2 => Some(Self::Dcf),
            _ => None,
        }
    }
}

impl fmt::Display for WheelAssign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Vibrato => "VIB",
            Self::Lfo => "LFO",
            Self::Dcf => "DCF",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LfoShape {
    Triangle,
    Sawtooth,
    Square,
    Random,
}

impl LfoShape {
    fn from_bits(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Triangle,
            1 => Self::Sawtooth,
            2 => Self::Square,
            _ => Self::Random,
        }
    }
}

impl fmt::Display for LfoShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Triangle => "TRI",
            Self::Sawtooth => "SAW",
            Self::Square => "SQR",
            Self::Random => "RND",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoBend {
    pub time: u8,
    pub depth: i8,
    pub key_scaling_time: i8,
    pub velocity_depth: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vibrato {
    pub shape: LfoShape,
    pub speed: u8,
    pub pressure: i8,
    pub depth: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lfo {
    pub shape: LfoShape,
    pub speed: u8,
    pub delay: u8,
    pub depth: i8,
    pub pressure_depth: i8,
}

/// Oscillator (DCO) settings of one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub delay: u8,
    /// 0–255; the front panel shows 1–256.
    pub wave: u16,
    pub key_scaling_curve: u8,
    pub coarse: i8,
    pub key_track: bool,
    pub fixed_key: u8,
    pub fine: i8,
    pub pressure_frequency: bool,
    pub vibrato: bool,
    pub velocity_curve: u8,
}

impl Source {
    pub fn wave_number(&self) -> u16 {
        self.wave + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub attack: u8,
    pub decay: u8,
    pub sustain: u8,
    pub release: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelModulation {
    pub velocity_depth: i8,
    pub pressure_depth: i8,
    pub key_scaling_depth: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeModulation {
    pub attack_velocity: i8,
    pub release_velocity: i8,
    pub key_scaling: i8,
}

/// DCA settings of one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amplifier {
    pub envelope_level: u8,
    pub envelope: Envelope,
    pub level_mod: LevelModulation,
    pub time_mod: TimeModulation,
}

/// DCF settings; filter 1 serves sources 1–2, filter 2 sources 3–4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub cutoff: u8,
    /// 0–7; the front panel shows 1–8.
    pub resonance: u8,
    pub lfo: bool,
    pub cutoff_mod: LevelModulation,
    pub envelope_depth: i8,
    pub envelope_velocity_depth: i8,
    pub envelope: Envelope,
    pub time_mod: TimeModulation,
}

/// A decoded single (one voice) patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinglePatch {
    pub name: String,
    pub volume: u8,
    /// Effect patch 0–31; shown 1–32.
    pub effect: u8,
    /// Submix channel 0–7; shown A–H.
    pub submix: u8,
    pub source_mode: SourceMode,
    pub polyphony_mode: PolyphonyMode,
    pub am_s1_to_s2: bool,
    pub am_s3_to_s4: bool,
    pub source_mutes: [bool; single::SOURCE_COUNT],
    pub pitch_bend_range: u8,
    pub wheel_assign: WheelAssign,
    pub wheel_depth: i8,
    pub auto_bend: AutoBend,
    pub vibrato: Vibrato,
    pub lfo: Lfo,
    pub pressure_freq: i8,
    pub sources: [Source; single::SOURCE_COUNT],
    pub amplifiers: [Amplifier; single::SOURCE_COUNT],
    pub filters: [Filter; single::FILTER_COUNT],
}

pub fn parse_single(record: &[u8], options: &DecodeOptions) -> Result<SinglePatch, SectionError> {
    let reader = RecordReader::new(record);
    reader.require_len(single::RECORD_SIZE)?;

    let name = reader.read_name(layout::NAME_RANGE, options.strict_names)?;

    let mode_bits = reader.read_bits(single::MODES, 0, 2)?;
    let source_mode = SourceMode::from_bits(mode_bits).ok_or(SectionError::InvalidField {
        field: "source mode",
        value: mode_bits,
    })?;
    let polyphony_mode = PolyphonyMode::from_bits(reader.read_bits(single::MODES, 2, 2)?);

    let mut source_mutes = [false; single::SOURCE_COUNT];
    for (s, muted) in source_mutes.iter_mut().enumerate() {
        *muted = reader.read_flag(single::MUTES_VIBRATO_SHAPE, s as u32)?;
    }

    let wheel_bits = reader.read_bits(single::BEND_WHEEL_ASSIGN, 4, 2)?;
    let wheel_assign = WheelAssign::from_bits(wheel_bits).ok_or(SectionError::InvalidField {
        field: "wheel assign",
        value: wheel_bits,
    })?;

    Ok(SinglePatch {
        name,
        volume: reader.read_u8(single::VOLUME)?,
        effect: reader.read_u8(single::EFFECT)?,
        submix: reader.read_bits(single::SUBMIX, 0, 3)?,
        source_mode,
        polyphony_mode,
        am_s1_to_s2: reader.read_flag(single::MODES, 4)?,
        am_s3_to_s4: reader.read_flag(single::MODES, 5)?,
        source_mutes,
        pitch_bend_range: reader.read_bits(single::BEND_WHEEL_ASSIGN, 0, 4)?,
        wheel_assign,
        wheel_depth: reader.read_centered(single::WHEEL_DEPTH, 50)?,
        auto_bend: AutoBend {
            time: reader.read_u8(single::AUTO_BEND_TIME)?,
            depth: reader.read_centered(single::AUTO_BEND_DEPTH, 50)?,
            key_scaling_time: reader.read_centered(single::AUTO_BEND_KS_TIME, 50)?,
            velocity_depth: reader.read_centered(single::AUTO_BEND_VELOCITY_DEPTH, 50)?,
        },
        vibrato: Vibrato {
            shape: LfoShape::from_bits(reader.read_bits(single::MUTES_VIBRATO_SHAPE, 4, 2)?),
            speed: reader.read_u8(single::VIBRATO_SPEED)?,
            pressure: reader.read_centered(single::VIBRATO_PRESSURE, 50)?,
            depth: reader.read_centered(single::VIBRATO_DEPTH, 50)?,
        },
        lfo: Lfo {
            shape: LfoShape::from_bits(reader.read_bits(single::LFO_SHAPE, 0, 2)?),
            speed: reader.read_u8(single::LFO_SPEED)?,
            delay: reader.read_u8(single::LFO_DELAY)?,
            depth: reader.read_centered(single::LFO_DEPTH, 50)?,
            pressure_depth: reader.read_centered(single::LFO_PRESSURE_DEPTH, 50)?,
        },
        pressure_freq: reader.read_centered(single::PRESSURE_FREQ, 50)?,
        sources: [
            read_source(&reader, 0)?,
            read_source(&reader, 1)?,
            read_source(&reader, 2)?,
            read_source(&reader, 3)?,
        ],
        amplifiers: [
            read_amplifier(&reader, 0)?,
            read_amplifier(&reader, 1)?,
            read_amplifier(&reader, 2)?,
            read_amplifier(&reader, 3)?,
        ],
        filters: [read_filter(&reader, 0)?, read_filter(&reader, 1)?],
    })
}

fn read_source(reader: &RecordReader<'_>, s: usize) -> Result<Source, SectionError> {
    let switches = single::SOURCE_SWITCHES_VELOCITY_CURVE + s;
    Ok(Source {
        delay: reader.read_u8(single::SOURCE_DELAY + s)?,
        wave: reader.read_wave(
            single::SOURCE_WAVE_HIGH_KS_CURVE + s,
            single::SOURCE_WAVE_LOW + s,
        )?,
        key_scaling_curve: reader.read_bits(single::SOURCE_WAVE_HIGH_KS_CURVE + s, 4, 3)?,
        coarse: reader.read_bits(single::SOURCE_COARSE_KEY_TRACK + s, 0, 6)? as i8 - 24,
        key_track: reader.read_flag(single::SOURCE_COARSE_KEY_TRACK + s, 6)?,
        fixed_key: reader.read_u8(single::SOURCE_FIXED_KEY + s)?,
        fine: reader.read_centered(single::SOURCE_FINE + s, 50)?,
        pressure_frequency: reader.read_flag(switches, 0)?,
        vibrato: reader.read_flag(switches, 1)?,
        velocity_curve: reader.read_bits(switches, 2, 3)?,
    })
}

fn read_amplifier(reader: &RecordReader<'_>, s: usize) -> Result<Amplifier, SectionError> {
    Ok(Amplifier {
        envelope_level: reader.read_u8(single::DCA_ENVELOPE_LEVEL + s)?,
        envelope: Envelope {
            attack: reader.read_u8(single::DCA_ATTACK + s)?,
            decay: reader.read_u8(single::DCA_DECAY + s)?,
            sustain: reader.read_u8(single::DCA_SUSTAIN + s)?,
            release: reader.read_u8(single::DCA_RELEASE + s)?,
        },
        level_mod: LevelModulation {
            velocity_depth: reader.read_centered(single::DCA_LEVEL_MOD_VELOCITY + s, 50)?,
            pressure_depth: reader.read_centered(single::DCA_LEVEL_MOD_PRESSURE + s, 50)?,
            key_scaling_depth: reader.read_centered(single::DCA_LEVEL_MOD_KEY_SCALING + s, 50)?,
        },
        time_mod: TimeModulation {
            attack_velocity: reader.read_centered(single::DCA_TIME_MOD_ON_VELOCITY + s, 50)?,
            release_velocity: reader.read_centered(single::DCA_TIME_MOD_OFF_VELOCITY + s, 50)?,
            key_scaling: reader.read_centered(single::DCA_TIME_MOD_KEY_SCALING + s, 50)?,
        },
    })
}

fn read_filter(reader: &RecordReader<'_>, f: usize) -> Result<Filter, SectionError> {
    Ok(Filter {
        cutoff: reader.read_u8(single::DCF_CUTOFF + f)?,
        resonance: reader.read_bits(single::DCF_RESONANCE_LFO + f, 0, 3)?,
        lfo: reader.read_flag(single::DCF_RESONANCE_LFO + f, 3)?,
        cutoff_mod: LevelModulation {
            velocity_depth: reader.read_centered(single::DCF_CUTOFF_MOD_VELOCITY + f, 50)?,
            pressure_depth: reader.read_centered(single::DCF_CUTOFF_MOD_PRESSURE + f, 50)?,
            key_scaling_depth: reader.read_centered(single::DCF_CUTOFF_MOD_KEY_SCALING + f, 50)?,
        },
        envelope_depth: reader.read_centered(single::DCF_ENVELOPE_DEPTH + f, 50)?,
        envelope_velocity_depth: reader
            .read_centered(single::DCF_ENVELOPE_VELOCITY_DEPTH + f, 50)?,
        envelope: Envelope {
            attack: reader.read_u8(single::DCF_ATTACK + f)?,
            decay: reader.read_u8(single::DCF_DECAY + f)?,
            sustain: reader.read_u8(single::DCF_SUSTAIN + f)?,
            release: reader.read_u8(single::DCF_RELEASE + f)?,
        },
        time_mod: TimeModulation {
            attack_velocity: reader.read_centered(single::DCF_TIME_MOD_ON_VELOCITY + f, 50)?,
            release_velocity: reader.read_centered(single::DCF_TIME_MOD_OFF_VELOCITY + f, 50)?,
            key_scaling: reader.read_centered(single::DCF_TIME_MOD_KEY_SCALING + f, 50)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A record with every bipolar parameter at its center value.
    fn neutral_record(name: &[u8; 10]) -> Vec<u8> {
        let mut record = vec![50u8; single::RECORD_SIZE];
        record[layout::NAME_RANGE].copy_from_slice(name);
        for offset in [
            single::SUBMIX,
            single::MODES,
            single::MUTES_VIBRATO_SHAPE,
            single::BEND_WHEEL_ASSIGN,
            single::LFO_SHAPE,
        ] {
            record[offset] = 0;
        }
        for s in 0..single::SOURCE_COUNT {
            record[single::SOURCE_WAVE_HIGH_KS_CURVE + s] = 0;
            record[single::SOURCE_WAVE_LOW + s] = 0;
            record[single::SOURCE_COARSE_KEY_TRACK + s] = 24;
            record[single::SOURCE_SWITCHES_VELOCITY_CURVE + s] = 0;
        }
        for f in 0..single::FILTER_COUNT {
            record[single::DCF_RESONANCE_LFO + f] = 0;
        }
        record
    }

    #[test]
    fn name_is_preserved_with_trailing_space() {
        let record = neutral_record(b"TestPatch ");
        let patch = parse_single(&record, &DecodeOptions::default()).unwrap();
        assert_eq!(patch.name, "TestPatch ");
    }

    #[test]
    fn neutral_record_decodes_to_centered_values() {
        let record = neutral_record(b"Init      ");
        let patch = parse_single(&record, &DecodeOptions::default()).unwrap();
        assert_eq!(patch.volume, 50);
        assert_eq!(patch.source_mode, SourceMode::Normal);
        assert_eq!(patch.polyphony_mode, PolyphonyMode::Poly1);
        assert_eq!(patch.wheel_assign, WheelAssign::Vibrato);
        assert_eq!(patch.wheel_depth, 0);
        assert_eq!(patch.auto_bend.depth, 0);
        assert_eq!(patch.pressure_freq, 0);
        assert!(patch.sources.iter().all(|s| s.coarse == 0 && s.fine == 0));
        assert!(patch.filters.iter().all(|f| f.envelope_depth == 0));
    }

    #[test]
    fn sources_read_delay_and_wave_at_their_own_offsets() {
        let mut record = neutral_record(b"Sources   ");
        for s in 0..single::SOURCE_COUNT {
            record[single::SOURCE_DELAY + s] = 10 * s as u8;
            record[single::SOURCE_WAVE_LOW + s] = s as u8 + 1;
        }
        record[single::SOURCE_WAVE_HIGH_KS_CURVE + 3] = 0b0011_0001;

        let patch = parse_single(&record, &DecodeOptions::default()).unwrap();
        let delays: Vec<u8> = patch.sources.iter().map(|s| s.delay).collect();
        let waves: Vec<u16> = patch.sources.iter().map(|s| s.wave).collect();
        assert_eq!(delays, vec![0, 10, 20, 30]);
        assert_eq!(waves, vec![1, 2, 3, 132]);
        assert_eq!(patch.sources[3].key_scaling_curve, 3);
        assert_eq!(patch.sources[3].wave_number(), 133);
    }

    #[test]
    fn common_bitfields() {
        let mut record = neutral_record(b"Bits      ");
        record[single::MODES] = 0b0011_0110;
        record[single::MUTES_VIBRATO_SHAPE] = 0b0010_0101;
        record[single::BEND_WHEEL_ASSIGN] = 0b0010_1100;
        record[single::LFO_SHAPE] = 3;

        let patch = parse_single(&record, &DecodeOptions::default()).unwrap();
        assert_eq!(patch.source_mode, SourceMode::Double);
        assert_eq!(patch.polyphony_mode, PolyphonyMode::Poly2);
        assert!(patch.am_s1_to_s2);
        assert!(patch.am_s3_to_s4);
        assert_eq!(patch.source_mutes, [true, false, true, false]);
        assert_eq!(patch.vibrato.shape, LfoShape::Square);
        assert_eq!(patch.pitch_bend_range, 12);
        assert_eq!(patch.wheel_assign, WheelAssign::Dcf);
        assert_eq!(patch.lfo.shape, LfoShape::Random);
    }

    #[test]
    fn source_switches_and_filters() {
        let mut record = neutral_record(b"Switches  ");
        record[single::SOURCE_COARSE_KEY_TRACK + 1] = 0b0100_0000 | 48;
        record[single::SOURCE_SWITCHES_VELOCITY_CURVE + 2] = 0b0001_1111;
        record[single::DCF_RESONANCE_LFO + 1] = 0b0000_1111;
        record[single::DCF_CUTOFF] = 88;

        let patch = parse_single(&record, &DecodeOptions::default()).unwrap();
        assert_eq!(patch.sources[1].coarse, 24);
        assert!(patch.sources[1].key_track);
        assert!(patch.sources[2].pressure_frequency);
        assert!(patch.sources[2].vibrato);
        assert_eq!(patch.sources[2].velocity_curve, 7);
        assert_eq!(patch.filters[0].cutoff, 88);
        assert_eq!(patch.filters[1].resonance, 7);
        assert!(patch.filters[1].lfo);
    }

    #[test]
    fn amplifier_fields_use_four_byte_stride() {
        let mut record = neutral_record(b"Amps      ");
        record[single::DCA_ATTACK + 2] = 7;
        record[single::DCA_LEVEL_MOD_VELOCITY + 3] = 100;
        record[single::DCA_TIME_MOD_KEY_SCALING] = 0;

        let patch = parse_single(&record, &DecodeOptions::default()).unwrap();
        assert_eq!(patch.amplifiers[2].envelope.attack, 7);
        assert_eq!(patch.amplifiers[3].level_mod.velocity_depth, 50);
        assert_eq!(patch.amplifiers[0].time_mod.key_scaling, -50);
    }

    #[test]
    fn invalid_source_mode_is_rejected() {
        let mut record = neutral_record(b"BadMode   ");
        record[single::MODES] = 0b11;
        let err = parse_single(&record, &DecodeOptions::default()).unwrap_err();
        assert_eq!(
            err,
            SectionError::InvalidField {
                field: "source mode",
                value: 3
            }
        );
    }

    #[test]
    fn high_bytes_in_name_follow_options() {
        let mut record = neutral_record(b"Caf\xe9      ");
        let err = parse_single(&record, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, SectionError::InvalidCharacter { offset: 3, .. }));

        let lenient = DecodeOptions {
            strict_names: false,
        };
        let patch = parse_single(&record, &lenient).unwrap();
        assert_eq!(patch.name, "Caf\u{FFFD}      ");

        record[3] = b'e';
        assert_eq!(
            parse_single(&record, &DecodeOptions::default())
                .unwrap()
                .name,
            "Cafe      "
        );
    }

    #[test]
    fn short_record_is_out_of_range() {
        let record = vec![0u8; single::RECORD_SIZE - 1];
        let err = parse_single(&record, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, SectionError::OutOfRange { .. }));
    }
}
