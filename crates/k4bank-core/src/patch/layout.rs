//! Field offsets relative to the start of each record.
//!
//! Per-source and per-filter parameters are stored as runs: the field for
//! source `s` lives at `BASE + s`, for filter `f` at `BASE + f`.

use std::ops::Range;

pub const NAME_LEN: usize = 10;
pub const NAME_RANGE: Range<usize> = 0..NAME_LEN;

pub mod single {
    pub const VOLUME: usize = 10;
    pub const EFFECT: usize = 11;
    pub const SUBMIX: usize = 12;
    /// b0-1 source mode, b2-3 poly mode, b4 AM S1>S2, b5 AM S3>S4.
    pub const MODES: usize = 13;
    /// b0-3 source mutes, b4-5 vibrato shape.
    pub const MUTES_VIBRATO_SHAPE: usize = 14;
    /// b0-3 pitch bend range, b4-5 wheel assign.
    pub const BEND_WHEEL_ASSIGN: usize = 15;
    pub const VIBRATO_SPEED: usize = 16;
    pub const WHEEL_DEPTH: usize = 17;
    pub const AUTO_BEND_TIME: usize = 18;
    pub const AUTO_BEND_DEPTH: usize = 19;
    pub const AUTO_BEND_KS_TIME: usize = 20;
    pub const AUTO_BEND_VELOCITY_DEPTH: usize = 21;
    pub const VIBRATO_PRESSURE: usize = 22;
    pub const VIBRATO_DEPTH: usize = 23;
    pub const LFO_SHAPE: usize = 24;
    pub const LFO_SPEED: usize = 25;
    pub const LFO_DELAY: usize = 26;
    pub const LFO_DEPTH: usize = 27;
    pub const LFO_PRESSURE_DEPTH: usize = 28;
    pub const PRESSURE_FREQ: usize = 29;

    pub const SOURCE_COUNT: usize = 4;
    pub const SOURCE_DELAY: usize = 30;
    /// b0 wave high bit, b4-6 key scaling curve.
    pub const SOURCE_WAVE_HIGH_KS_CURVE: usize = 34;
    pub const SOURCE_WAVE_LOW: usize = 38;
    /// b0-5 coarse, b6 key track.
    pub const SOURCE_COARSE_KEY_TRACK: usize = 42;
    pub const SOURCE_FIXED_KEY: usize = 46;
    pub const SOURCE_FINE: usize = 50;
    /// b0 pressure to frequency, b1 vibrato/auto bend, b2-4 velocity curve.
    pub const SOURCE_SWITCHES_VELOCITY_CURVE: usize = 54;

    pub const DCA_ENVELOPE_LEVEL: usize = 58;
    pub const DCA_ATTACK: usize = 62;
    pub const DCA_DECAY: usize = 66;
    pub const DCA_SUSTAIN: usize = 70;
    pub const DCA_RELEASE: usize = 74;
    pub const DCA_LEVEL_MOD_VELOCITY: usize = 78;
    pub const DCA_LEVEL_MOD_PRESSURE: usize = 82;
    pub const DCA_LEVEL_MOD_KEY_SCALING: usize = 86;
    pub const DCA_TIME_MOD_ON_VELOCITY: usize = 90;
    pub const DCA_TIME_MOD_OFF_VELOCITY: usize = 94;
    pub const DCA_TIME_MOD_KEY_SCALING: usize = 98;

    pub const FILTER_COUNT: usize = 2;
    pub const DCF_CUTOFF: usize = 102;
    /// b0-2 resonance, b3 LFO switch.
    pub const DCF_RESONANCE_LFO: usize = 104;
    pub const DCF_CUTOFF_MOD_VELOCITY: usize = 106;
    pub const DCF_CUTOFF_MOD_PRESSURE: usize = 108;
    pub const DCF_CUTOFF_MOD_KEY_SCALING: usize = 110;
    pub const DCF_ENVELOPE_DEPTH: usize = 112;
    pub const DCF_ENVELOPE_VELOCITY_DEPTH: usize = 114;
    pub const DCF_ATTACK: usize = 116;
    pub const DCF_DECAY: usize = 118;
    pub const DCF_SUSTAIN: usize = 120;
    pub const DCF_RELEASE: usize = 122;
    pub const DCF_TIME_MOD_ON_VELOCITY: usize = 124;
    pub const DCF_TIME_MOD_OFF_VELOCITY: usize = 126;
    pub const DCF_TIME_MOD_KEY_SCALING: usize = 128;

    pub const CHECKSUM: usize = 130;
    pub const RECORD_SIZE: usize = CHECKSUM + 1;
}

pub mod multi {
    pub const VOLUME: usize = 10;
    pub const EFFECT: usize = 11;

    pub const SECTIONS_OFFSET: usize = 12;
    pub const SECTION_COUNT: usize = 8;
    pub const SECTION_SIZE: usize = 8;

    pub const SECTION_SINGLE: usize = 0;
    pub const SECTION_ZONE_LOW: usize = 1;
    pub const SECTION_ZONE_HIGH: usize = 2;
    /// b0-3 receive channel, b4-5 velocity switch, b6 mute.
    pub const SECTION_CHANNEL_VELOCITY_MUTE: usize = 3;
    /// b0-2 submix, b3-4 play mode.
    pub const SECTION_SUBMIX_PLAY_MODE: usize = 4;
    pub const SECTION_LEVEL: usize = 5;
    pub const SECTION_TRANSPOSE: usize = 6;
    pub const SECTION_TUNE: usize = 7;

    pub const CHECKSUM: usize = SECTIONS_OFFSET + SECTION_COUNT * SECTION_SIZE;
    pub const RECORD_SIZE: usize = CHECKSUM + 1;
}

pub mod drum {
    pub const RECEIVE_CHANNEL: usize = 0;
    pub const VOLUME: usize = 1;
    pub const VELOCITY_DEPTH: usize = 2;
    pub const COMMON_SIZE: usize = 11;

    pub const NOTE_COUNT: usize = 61;
    pub const NOTE_SIZE: usize = 11;
    /// C1, the lowest key of the drum map.
    pub const FIRST_NOTE_KEY: u8 = 36;

    pub const NOTE_SOURCE_COUNT: usize = 2;
    /// b0 wave high bit; on the first source byte b4-6 also hold the submix.
    pub const NOTE_WAVE_HIGH: usize = 0;
    pub const NOTE_SUBMIX: usize = 0;
    pub const NOTE_WAVE_LOW: usize = 2;
    pub const NOTE_DECAY: usize = 4;
    pub const NOTE_TUNE: usize = 6;
    pub const NOTE_LEVEL: usize = 8;

    pub const BLOCK_SIZE: usize = COMMON_SIZE + NOTE_COUNT * NOTE_SIZE;
}

pub mod effect {
    pub const EFFECT_TYPE: usize = 0;
    pub const PARAM1: usize = 1;
    pub const PARAM2: usize = 2;
    pub const PARAM3: usize = 3;

    pub const SUBMIX_OFFSET: usize = 10;
    pub const SUBMIX_COUNT: usize = 8;
    pub const SUBMIX_SIZE: usize = 3;
    pub const SUBMIX_PAN: usize = 0;
    pub const SUBMIX_SEND1: usize = 1;
    pub const SUBMIX_SEND2: usize = 2;

    pub const CHECKSUM: usize = SUBMIX_OFFSET + SUBMIX_COUNT * SUBMIX_SIZE;
    pub const RECORD_SIZE: usize = CHECKSUM + 1;
}

#[cfg(test)]
mod tests {
    use crate::bank::BankFormat;

    #[test]
    fn record_sizes_match_bank_format() {
        let format = BankFormat::K4;
        assert_eq!(super::single::RECORD_SIZE, format.single_size);
        assert_eq!(super::multi::RECORD_SIZE, format.multi_size);
        assert_eq!(super::drum::BLOCK_SIZE, format.drum_size);
        assert_eq!(super::effect::RECORD_SIZE, format.effect_size);
    }

    #[test]
    fn names_precede_the_first_parameter() {
        assert_eq!(super::NAME_RANGE.len(), super::NAME_LEN);
        assert_eq!(super::single::VOLUME, super::NAME_LEN);
        assert_eq!(super::multi::VOLUME, super::NAME_LEN);
    }
}
