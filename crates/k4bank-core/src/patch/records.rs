use std::iter::FusedIterator;
use std::ops::Range;

use super::error::SectionError;

/// One fixed-width record within a section slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchRecord<'a> {
    pub index: usize,
    /// Offset relative to the start of the section slice.
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl PatchRecord<'_> {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.bytes.len()
    }
}

/// Lazy, restartable sequence of fixed-width records.
///
/// Cloning yields an independent cursor over the same records.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    bytes: &'a [u8],
    record_size: usize,
    count: usize,
    next: usize,
}

impl<'a> Records<'a> {
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    /// Random access without advancing the cursor.
    pub fn get(&self, index: usize) -> Option<PatchRecord<'a>> {
        if index >= self.count {
            return None;
        }
        let offset = index * self.record_size;
        let bytes = self.bytes.get(offset..offset + self.record_size)?;
        Some(PatchRecord {
            index,
            offset,
            bytes,
        })
    }
}

impl<'a> Iterator for Records<'a> {
    type Item = PatchRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.get(self.next)?;
        self.next += 1;
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Records<'_> {}

impl FusedIterator for Records<'_> {}

/// Split `bytes` into `count` records of `record_size` bytes each.
///
/// Record `i` spans `i * record_size .. (i + 1) * record_size`; trailing bytes
/// beyond `count * record_size` are ignored.
///
/// # Examples
/// ```
/// use k4bank_core::decode_records;
///
/// let bytes = [1, 2, 3, 4, 5, 6];
/// let records: Vec<_> = decode_records(&bytes, 2, 3)?.map(|r| r.bytes).collect();
/// assert_eq!(records, vec![&[1, 2][..], &[3, 4][..], &[5, 6][..]]);
/// # Ok::<(), k4bank_core::SectionError>(())
/// ```
///
/// # Errors
/// `OutOfRange` when the slice holds fewer than `count * record_size` bytes.
pub fn decode_records(
    bytes: &[u8],
    record_size: usize,
    count: usize,
) -> Result<Records<'_>, SectionError> {
    let needed = count
        .checked_mul(record_size)
        .ok_or(SectionError::OutOfRange {
            needed: usize::MAX,
            actual: bytes.len(),
        })?;
    if bytes.len() < needed {
        return Err(SectionError::OutOfRange {
            needed,
            actual: bytes.len(),
        });
    }
    Ok(Records {
        bytes,
        record_size,
        count,
        next: 0,
    })
}
