use std::path::Path;

use log::{debug, warn};
use thiserror::Error;

use crate::bank::{BankFormat, LayoutError, SectionSpan, compute_layout};
use crate::envelope::layout::SYSEX_END;
use crate::envelope::{EnvelopeError, Function, validate_envelope};
use crate::patch::{
    DecodeOptions, SectionError, decode_records, parse_drum, parse_effect, parse_multi,
    parse_single,
};
use crate::source::{DumpSource, SourceError, SyxFileSource};
use crate::{Bank, Report, make_report};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("not an all-patch data dump (function {function:#04x})")]
    NotBankDump { function: u8 },
    #[error("missing end-of-exclusive marker at offset {offset}: found {found:#04x}")]
    MissingEndOfExclusive { offset: usize, found: u8 },
    #[error("{section} record {index}: {source}")]
    Section {
        section: &'static str,
        index: usize,
        source: SectionError,
    },
}

/// Read a `.syx` file and decode it into a report.
pub fn decode_bank_file(path: &Path, options: &DecodeOptions) -> Result<Report, DecodeError> {
    let mut source = SyxFileSource::open(path)?;
    let bytes = source.read_dump()?;
    let bank = decode_bank(&bytes, options)?;
    Ok(make_report(
        &path.display().to_string(),
        bytes.len() as u64,
        bank,
    ))
}

pub fn decode_source<S: DumpSource>(
    mut source: S,
    options: &DecodeOptions,
) -> Result<Bank, DecodeError> {
    let bytes = source.read_dump()?;
    decode_bank(&bytes, options)
}

/// Decode a complete K4 all-patch data dump.
///
/// Every step validates its own preconditions and stops at the first
/// failure; no partially decoded bank is returned.
pub fn decode_bank(bytes: &[u8], options: &DecodeOptions) -> Result<Bank, DecodeError> {
    let format = BankFormat::K4;

    let envelope = validate_envelope(bytes)?;
    if envelope.function_kind() != Some(Function::AllPatchDataDump) {
        return Err(DecodeError::NotBankDump {
            function: envelope.function,
        });
    }

    let layout = compute_layout(bytes.len(), &format)?;
    let found = bytes
        .get(layout.eox_offset)
        .copied()
        .ok_or(LayoutError::TruncatedData {
            needed: layout.required_len(),
            actual: bytes.len(),
        })?;
    if found != SYSEX_END {
        return Err(DecodeError::MissingEndOfExclusive {
            offset: layout.eox_offset,
            found,
        });
    }
    if bytes.len() > layout.required_len() {
        warn!(
            "ignoring {} trailing bytes after end-of-exclusive",
            bytes.len() - layout.required_len()
        );
    }

    debug!(
        "section offsets: single={:#06x} multi={:#06x} drum={:#06x} effect={:#06x} eox={:#06x}",
        layout.single.offset,
        layout.multi.offset,
        layout.drum.offset,
        layout.effect.offset,
        layout.eox_offset
    );

    let singles = decode_section(
        bytes,
        layout.single,
        format.single_size,
        format.single_count,
        "single",
        |record| parse_single(record, options),
    )?;
    let multis = decode_section(
        bytes,
        layout.multi,
        format.multi_size,
        format.multi_count,
        "multi",
        |record| parse_multi(record, options),
    )?;
    let drum = parse_drum(section_slice(bytes, layout.drum)?).map_err(|source| {
        DecodeError::Section {
            section: "drum",
            index: 0,
            source,
        }
    })?;
    let effects = decode_section(
        bytes,
        layout.effect,
        format.effect_size,
        format.effect_count,
        "effect",
        parse_effect,
    )?;

    debug!(
        "decoded {} singles, {} multis, {} drum notes, {} effects",
        singles.len(),
        multis.len(),
        drum.notes.len(),
        effects.len()
    );

    Ok(Bank {
        identity: envelope.identify(),
        envelope,
        layout,
        singles,
        multis,
        drum,
        effects,
    })
}

fn decode_section<T>(
    bytes: &[u8],
    span: SectionSpan,
    record_size: usize,
    count: usize,
    section: &'static str,
    parse: impl Fn(&[u8]) -> Result<T, SectionError>,
) -> Result<Vec<T>, DecodeError> {
    let wrap = |index: usize, source: SectionError| DecodeError::Section {
        section,
        index,
        source,
    };

    let slice = section_slice(bytes, span)?;
    let records = decode_records(slice, record_size, count).map_err(|err| wrap(0, err))?;

    records
        .map(|record| parse(record.bytes).map_err(|err| wrap(record.index, err)))
        .collect()
}

fn section_slice(bytes: &[u8], span: SectionSpan) -> Result<&[u8], DecodeError> {
    bytes.get(span.range()).ok_or_else(|| {
        DecodeError::Layout(LayoutError::TruncatedData {
            needed: span.end(),
            actual: bytes.len(),
        })
    })
}
