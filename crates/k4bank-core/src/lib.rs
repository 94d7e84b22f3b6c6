//! K4 bank core library for decoding Kawai K4 SysEx bank dumps.
//!
//! This crate implements the decoding pipeline used by the CLI: a dump
//! source supplies raw bytes, the envelope is validated, section offsets are
//! computed from the bank format, and each section is split into fixed-width
//! records decoded into typed patches. Decoding is byte-oriented and side-effect
//! free; all I/O is isolated in the `source` module.
//!
//! Invariants:
//! - Section offsets derive from `BankFormat` alone, never from dump content.
//! - Records are positional: record `i` starts at `i * record_size`.
//! - Every decode step fails fast; no partially decoded bank is returned.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use k4bank_core::{DecodeOptions, decode_bank_file};
//!
//! let report = decode_bank_file(Path::new("bank.syx"), &DecodeOptions::default())?;
//! println!("first single: {}", report.bank.singles[0].name);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

mod bank;
mod decode;
mod envelope;
mod patch;
mod source;

pub use bank::{
    BankFormat, BankLayout, LayoutError, PATCHES_PER_BANK, SectionSpan, compute_layout,
};
pub use decode::{DecodeError, decode_bank, decode_bank_file, decode_source};
pub use envelope::{
    Cardinality, DumpIdentity, DumpKind, EnvelopeError, Function, Locality, SysExEnvelope,
    validate_envelope,
};
pub use patch::{
    Amplifier, AutoBend, DecodeOptions, DrumNote, DrumPatch, DrumSource, EffectPatch, EffectType,
    Envelope, Filter, KeyboardZone, LevelModulation, Lfo, LfoShape, MultiPatch, MultiSection,
    PatchRecord, PlayMode, PolyphonyMode, Records, SectionError, SinglePatch, Source, SourceMode,
    SubmixSend, TimeModulation, Vibrato, VelocitySwitch, WheelAssign, decode_records,
    parse_drum, parse_effect, parse_multi, parse_single, patch_index, patch_label,
};
pub use source::{BytesSource, DumpSource, SourceError, SyxFileSource};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// A fully decoded all-patch data dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub envelope: SysExEnvelope,
    /// Dump classification; absent for sub-status values the K4 never sends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<DumpIdentity>,
    pub layout: BankLayout,
    /// Singles A-1 through D-16.
    pub singles: Vec<SinglePatch>,
    /// Multis A-1 through D-16.
    pub multis: Vec<MultiPatch>,
    pub drum: DrumPatch,
    /// Effects E-1 through E-32.
    pub effects: Vec<EffectPatch>,
}

/// Decoded bank with tool and input metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Input dump metadata.
    pub input: InputInfo,
    pub bank: Bank,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use k4bank_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "k4tool".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "k4tool");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name (e.g., "k4tool").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input dump metadata embedded in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// Wrap a decoded bank with report metadata.
pub fn make_report(input_path: &str, input_bytes: u64, bank: Bank) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "k4tool".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        bank,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> Bank {
        let envelope = validate_envelope(&[0xF0, 0x40, 0x00, 0x22, 0x01, 0x04, 0x00, 0x00])
            .expect("envelope");
        Bank {
            envelope,
            identity: None,
            layout: BankLayout::for_format(&BankFormat::K4).expect("layout"),
            singles: Vec::new(),
            multis: Vec::new(),
            drum: DrumPatch {
                receive_channel: 9,
                volume: 100,
                velocity_depth: 0,
                notes: Vec::new(),
            },
            effects: Vec::new(),
        }
    }

    #[test]
    fn report_omits_identity_when_none() {
        let report = make_report("bank.syx", 15123, bank());
        let value = serde_json::to_value(&report).expect("report json");
        assert_eq!(value["report_version"], REPORT_VERSION);
        assert_eq!(value["tool"]["name"], "k4tool");
        assert_eq!(value["input"]["bytes"], 15123);
        assert!(value["bank"].get("identity").is_none());
        assert_eq!(value["bank"]["envelope"]["channel"], 1);
        assert_eq!(value["bank"]["envelope"]["raw_channel"], 0);
        assert_eq!(value["bank"]["layout"]["eox_offset"], 15122);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = make_report("bank.syx", 15123, bank());
        let json = serde_json::to_string(&report).expect("serialize");
        let parsed: Report = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, report);
    }
}
