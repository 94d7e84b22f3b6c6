use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use super::format::BankFormat;

/// Absolute position of one section within the dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpan {
    pub offset: usize,
    pub len: usize,
}

impl SectionSpan {
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// Section offsets of an all-patch data dump.
///
/// Depends only on the format constants; the dump contents are consulted
/// solely to confirm that the EOX byte is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankLayout {
    pub single: SectionSpan,
    pub multi: SectionSpan,
    pub drum: SectionSpan,
    pub effect: SectionSpan,
    pub eox_offset: usize,
}

impl BankLayout {
    /// Running sum of section sizes starting after the header.
    ///
    /// # Errors
    /// Returns `LayoutError::Overflow` when `count * size` or an offset does
    /// not fit in `usize`.
    pub fn for_format(format: &BankFormat) -> Result<Self, LayoutError> {
        let single = span(format.header_size, format.single_count, format.single_size)?;
        let multi = span(single.end(), format.multi_count, format.multi_size)?;
        let drum = span(multi.end(), 1, format.drum_size)?;
        let effect = span(drum.end(), format.effect_count, format.effect_size)?;
        let eox_offset = effect
            .offset
            .checked_add(effect.len)
            .ok_or(LayoutError::Overflow)?;

        Ok(Self {
            single,
            multi,
            drum,
            effect,
            eox_offset,
        })
    }

    /// Minimum dump length, EOX byte included.
    pub fn required_len(&self) -> usize {
        self.eox_offset + 1
    }
}

fn span(offset: usize, count: usize, size: usize) -> Result<SectionSpan, LayoutError> {
    let len = count.checked_mul(size).ok_or(LayoutError::Overflow)?;
    offset.checked_add(len).ok_or(LayoutError::Overflow)?;
    Ok(SectionSpan { offset, len })
}

/// Compute section offsets and confirm `total_len` reaches the EOX marker.
///
/// # Examples
/// ```
/// use k4bank_core::{BankFormat, compute_layout};
///
/// let layout = compute_layout(15123, &BankFormat::K4)?;
/// assert_eq!(layout.multi.offset, 8392);
/// assert_eq!(layout.eox_offset, 15122);
/// # Ok::<(), k4bank_core::LayoutError>(())
/// ```
///
/// # Errors
/// `TruncatedData` when `total_len < eox_offset + 1`.
pub fn compute_layout(total_len: usize, format: &BankFormat) -> Result<BankLayout, LayoutError> {
    let layout = BankLayout::for_format(format)?;
    let needed = layout
        .eox_offset
        .checked_add(1)
        .ok_or(LayoutError::Overflow)?;
    if total_len < needed {
        return Err(LayoutError::TruncatedData {
            needed,
            actual: total_len,
        });
    }
    Ok(layout)
}
