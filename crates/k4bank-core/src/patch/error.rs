use thiserror::Error;

/// Errors returned by section and record decoding.
///
/// # Examples
/// ```
/// use k4bank_core::SectionError;
///
/// let err = SectionError::InvalidCharacter { offset: 3, value: 0xE9 };
/// assert!(err.to_string().contains("invalid character"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SectionError {
    #[error("section out of range: need {needed} bytes, got {actual}")]
    OutOfRange { needed: usize, actual: usize },
    #[error("invalid character {value:#04x} in name at offset {offset}")]
    InvalidCharacter { offset: usize, value: u8 },
    #[error("data byte {value:#04x} at offset {offset} has bit 7 set")]
    InvalidDataByte { offset: usize, value: u8 },
    #[error("invalid {field} value: {value}")]
    InvalidField { field: &'static str, value: u8 },
}
