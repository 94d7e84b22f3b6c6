use thiserror::Error;

/// Errors returned by SysEx envelope validation.
///
/// # Examples
/// ```
/// use k4bank_core::EnvelopeError;
///
/// let err = EnvelopeError::BadStartByte { value: 0x90 };
/// assert!(err.to_string().contains("invalid start byte"));
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("header too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("invalid start byte: {value:#04x} (expected 0xf0)")]
    BadStartByte { value: u8 },
    #[error("invalid manufacturer ID: {value:#04x} (expected 0x40, Kawai)")]
    BadManufacturerId { value: u8 },
}
