//! Section decoding.
//!
//! Each section of the bank is a run of fixed-width records with no
//! self-describing lengths. `records` splits a section slice positionally;
//! the per-kind parsers (`single`, `multi`, `drum`, `effect`) read typed
//! fields through `reader` using the offsets in `layout`.
//!
//! The trailing checksum byte of each record is not verified.

pub mod drum;
pub mod effect;
pub mod error;
pub mod layout;
pub mod multi;
pub mod reader;
pub mod records;
pub mod single;

pub use drum::{DrumNote, DrumPatch, DrumSource, parse_drum};
pub use effect::{EffectPatch, EffectType, SubmixSend, parse_effect};
pub use error::SectionError;
pub use multi::{KeyboardZone, MultiPatch, MultiSection, PlayMode, VelocitySwitch, parse_multi};
pub use records::{PatchRecord, Records, decode_records};
pub use single::{
    Amplifier, AutoBend, Envelope, Filter, LevelModulation, Lfo, LfoShape, PolyphonyMode,
    SinglePatch, Source, SourceMode, TimeModulation, Vibrato, WheelAssign, parse_single,
};

use crate::bank::{BankFormat, PATCHES_PER_BANK};

/// Decoder switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject name bytes at or above 0x80 instead of decoding them as U+FFFD.
    pub strict_names: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { strict_names: true }
    }
}

/// Front-panel label of a single or multi patch: `A-1` through `D-16`.
///
/// # Examples
/// ```
/// use k4bank_core::patch_label;
///
/// assert_eq!(patch_label(0), "A-1");
/// assert_eq!(patch_label(17), "B-2");
/// assert_eq!(patch_label(63), "D-16");
/// ```
pub fn patch_label(index: usize) -> String {
    let bank = (index / PATCHES_PER_BANK) % 26;
    let letter = char::from(b'A' + bank as u8);
    format!("{}-{}", letter, index % PATCHES_PER_BANK + 1)
}

/// Parse a label produced by `patch_label` back into a patch index.
///
/// The bank letter is case-insensitive; only banks `A` through `D` exist.
///
/// # Examples
/// ```
/// use k4bank_core::patch_index;
///
/// assert_eq!(patch_index("B-2"), Some(17));
/// assert_eq!(patch_index("e-1"), None);
/// ```
pub fn patch_index(label: &str) -> Option<usize> {
    let (bank, number) = label.split_once('-')?;
    let &[letter] = bank.as_bytes() else {
        return None;
    };
    let bank = usize::from(letter.to_ascii_uppercase().checked_sub(b'A')?);
    if bank >= BankFormat::K4.single_count / PATCHES_PER_BANK {
        return None;
    }
    let number: usize = number.parse().ok()?;
    if !(1..=PATCHES_PER_BANK).contains(&number) {
        return None;
    }
    Some(bank * PATCHES_PER_BANK + number - 1)
}
