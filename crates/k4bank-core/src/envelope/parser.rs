use serde::{Deserialize, Serialize};

use super::error::EnvelopeError;
use super::layout;
use super::reader::EnvelopeReader;

/// Transport metadata carried by the 8-byte SysEx header.
///
/// `raw_channel` is the 0-indexed value as sent on the wire; `channel` is the
/// 1-indexed value shown on the instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysExEnvelope {
    pub start_byte: u8,
    pub manufacturer_id: u8,
    pub raw_channel: u8,
    pub channel: u8,
    pub function: u8,
    pub group: u8,
    pub machine: u8,
    pub sub_status1: u8,
    pub sub_status2: u8,
}

/// SysEx function codes understood by the K4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Function {
    OnePatchDumpRequest,
    BlockPatchDumpRequest,
    AllPatchDumpRequest,
    ParameterSend,
    OnePatchDataDump,
    BlockPatchDataDump,
    AllPatchDataDump,
    EditBufferDump,
    ProgramChange,
    WriteComplete,
    WriteError,
    WriteErrorProtect,
    WriteErrorNoCard,
}

impl Function {
    pub fn from_byte(value: u8) -> Option<Self> {
        let function = match value {
            0x00 => Self::OnePatchDumpRequest,
            0x01 => Self::BlockPatchDumpRequest,
            0x02 => Self::AllPatchDumpRequest,
            0x10 => Self::ParameterSend,
            0x20 => Self::OnePatchDataDump,
            0x21 => Self::BlockPatchDataDump,
            0x22 => Self::AllPatchDataDump,
            0x23 => Self::EditBufferDump,
            0x30 => Self::ProgramChange,
            0x40 => Self::WriteComplete,
            0x41 => Self::WriteError,
            0x42 => Self::WriteErrorProtect,
            0x43 => Self::WriteErrorNoCard,
            _ => return None,
        };
        Some(function)
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Self::OnePatchDumpRequest => 0x00,
            Self::BlockPatchDumpRequest => 0x01,
            Self::AllPatchDumpRequest => 0x02,
            Self::ParameterSend => 0x10,
            Self::OnePatchDataDump => 0x20,
            Self::BlockPatchDataDump => 0x21,
            Self::AllPatchDataDump => 0x22,
            Self::EditBufferDump => 0x23,
            Self::ProgramChange => 0x30,
            Self::WriteComplete => 0x40,
            Self::WriteError => 0x41,
            Self::WriteErrorProtect => 0x42,
            Self::WriteErrorNoCard => 0x43,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpKind {
    Single,
    Multi,
    All,
}

/// Internal memory or memory card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locality {
    Internal,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    One,
    Block,
}

/// What a data dump contains, derived from the function and sub-status bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpIdentity {
    pub kind: DumpKind,
    pub locality: Locality,
    pub cardinality: Cardinality,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_number: Option<u8>,
}

impl SysExEnvelope {
    pub fn function_kind(&self) -> Option<Function> {
        Function::from_byte(self.function)
    }

    /// Classify the dump. Returns `None` for requests, parameter sends and
    /// sub-status combinations the K4 does not emit.
    pub fn identify(&self) -> Option<DumpIdentity> {
        let locality = match self.sub_status1 {
            layout::SUB_STATUS_INTERNAL => Locality::Internal,
            layout::SUB_STATUS_EXTERNAL => Locality::External,
            _ => return None,
        };

        match (self.function_kind()?, self.sub_status2) {
            (Function::OnePatchDataDump, number) if number <= layout::MAX_PATCH_NUMBER => {
                let kind = if number < layout::FIRST_MULTI_NUMBER {
                    DumpKind::Single
                } else {
                    DumpKind::Multi
                };
                Some(DumpIdentity {
                    kind,
                    locality,
                    cardinality: Cardinality::One,
                    patch_number: Some(number),
                })
            }
            (Function::AllPatchDataDump, 0x00) => Some(DumpIdentity {
                kind: DumpKind::All,
                locality,
                cardinality: Cardinality::Block,
                patch_number: None,
            }),
            _ => None,
        }
    }
}

/// Validate the fixed SysEx header and extract its transport metadata.
///
/// Only the start byte and manufacturer ID are checked; the remaining bytes
/// are returned as-is for the caller to interpret.
///
/// # Examples
/// ```
/// use k4bank_core::validate_envelope;
///
/// let header = [0xF0, 0x40, 0x00, 0x22, 0x00, 0x04, 0x00, 0x00];
/// let envelope = validate_envelope(&header)?;
/// assert_eq!(envelope.channel, 1);
/// assert_eq!(envelope.machine, 4);
/// # Ok::<(), k4bank_core::EnvelopeError>(())
/// ```
///
/// # Errors
/// `TooShort` below 8 bytes, `BadStartByte` when byte 0 is not 0xF0,
/// `BadManufacturerId` when byte 1 is not Kawai's 0x40.
pub fn validate_envelope(bytes: &[u8]) -> Result<SysExEnvelope, EnvelopeError> {
    let reader = EnvelopeReader::new(bytes);
    reader.require_header()?;

    let start_byte = reader.read_u8(layout::START_BYTE_OFFSET)?;
    if start_byte != layout::SYSEX_START {
        return Err(EnvelopeError::BadStartByte { value: start_byte });
    }

    let manufacturer_id = reader.read_u8(layout::MANUFACTURER_OFFSET)?;
    if manufacturer_id != layout::KAWAI_ID {
        return Err(EnvelopeError::BadManufacturerId {
            value: manufacturer_id,
        });
    }

    let (raw_channel, channel) = reader.read_channel()?;

    Ok(SysExEnvelope {
        start_byte,
        manufacturer_id,
        raw_channel,
        channel,
        function: reader.read_u8(layout::FUNCTION_OFFSET)?,
        group: reader.read_u8(layout::GROUP_OFFSET)?,
        machine: reader.read_u8(layout::MACHINE_OFFSET)?,
        sub_status1: reader.read_u8(layout::SUB_STATUS1_OFFSET)?,
        sub_status2: reader.read_u8(layout::SUB_STATUS2_OFFSET)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(function: u8, sub_status1: u8, sub_status2: u8) -> [u8; 8] {
        [0xF0, 0x40, 0x00, function, 0x00, 0x04, sub_status1, sub_status2]
    }

    #[test]
    fn parse_valid_header() {
        let bytes = [0xF0, 0x40, 0x00, 0x20, 0x00, 0x04, 0x00, 0x00];
        let envelope = validate_envelope(&bytes).unwrap();
        assert_eq!(envelope.channel, 1);
        assert_eq!(envelope.raw_channel, 0);
        assert_eq!(envelope.function, 0x20);
        assert_eq!(envelope.group, 0);
        assert_eq!(envelope.machine, 4);
        assert_eq!(envelope.sub_status1, 0);
        assert_eq!(envelope.sub_status2, 0);
    }

    #[test]
    fn channel_is_reported_one_indexed_for_every_raw_value() {
        for raw in 0u8..16 {
            let mut bytes = header(0x22, 0x00, 0x00);
            bytes[2] = raw;
            let envelope = validate_envelope(&bytes).unwrap();
            assert_eq!(envelope.raw_channel, raw);
            assert_eq!(envelope.channel, raw + 1);
        }
    }

    #[test]
    fn short_buffers_are_rejected() {
        let bytes = header(0x22, 0x00, 0x00);
        for len in 0..8 {
            let err = validate_envelope(&bytes[..len]).unwrap_err();
            assert!(matches!(err, EnvelopeError::TooShort { actual, .. } if actual == len));
        }
    }

    #[test]
    fn bad_start_byte() {
        let mut bytes = header(0x22, 0x00, 0x00);
        bytes[0] = 0x90;
        let err = validate_envelope(&bytes).unwrap_err();
        assert_eq!(err, EnvelopeError::BadStartByte { value: 0x90 });
    }

    #[test]
    fn bad_manufacturer_id() {
        let mut bytes = header(0x22, 0x00, 0x00);
        bytes[1] = 0x43;
        let err = validate_envelope(&bytes).unwrap_err();
        assert_eq!(err, EnvelopeError::BadManufacturerId { value: 0x43 });
        assert!(err.to_string().contains("manufacturer"));
    }

    #[test]
    fn identify_all_patch_dump() {
        let envelope = validate_envelope(&header(0x22, 0x02, 0x00)).unwrap();
        assert_eq!(envelope.function_kind(), Some(Function::AllPatchDataDump));
        let identity = envelope.identify().unwrap();
        assert_eq!(identity.kind, DumpKind::All);
        assert_eq!(identity.locality, Locality::External);
        assert_eq!(identity.cardinality, Cardinality::Block);
        assert_eq!(identity.patch_number, None);
    }

    #[test]
    fn identify_one_patch_dump_splits_singles_and_multis() {
        let single = validate_envelope(&header(0x20, 0x00, 63)).unwrap();
        let identity = single.identify().unwrap();
        assert_eq!(identity.kind, DumpKind::Single);
        assert_eq!(identity.patch_number, Some(63));

        let multi = validate_envelope(&header(0x20, 0x00, 64)).unwrap();
        let identity = multi.identify().unwrap();
        assert_eq!(identity.kind, DumpKind::Multi);
        assert_eq!(identity.cardinality, Cardinality::One);
    }

    #[test]
    fn identify_rejects_unknown_combinations() {
        let request = validate_envelope(&header(0x02, 0x00, 0x00)).unwrap();
        assert!(request.identify().is_none());

        let odd_locality = validate_envelope(&header(0x22, 0x01, 0x00)).unwrap();
        assert!(odd_locality.identify().is_none());

        let unknown = validate_envelope(&header(0x7F, 0x00, 0x00)).unwrap();
        assert_eq!(unknown.function_kind(), None);
    }

    #[test]
    fn function_byte_round_trips() {
        for byte in [0x00, 0x10, 0x22, 0x43] {
            let function = Function::from_byte(byte).unwrap();
            assert_eq!(function.as_byte(), byte);
        }
    }
}
