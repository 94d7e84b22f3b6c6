//! `.syx` file source.
//!
//! Loads the whole file into memory; decoding never touches the file again.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{DumpSource, SourceError};

pub struct SyxFileSource {
    reader: BufReader<File>,
}

impl SyxFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
        })
    }
}

impl DumpSource for SyxFileSource {
    fn read_dump(&mut self) -> Result<Vec<u8>, SourceError> {
        let mut bytes = Vec::new();
        self.reader.read_to_end(&mut bytes)?;
        non_empty(bytes)
    }
}

/// In-memory source, e.g. for dumps received by another tool.
pub struct BytesSource {
    bytes: Vec<u8>,
}

impl BytesSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl DumpSource for BytesSource {
    fn read_dump(&mut self) -> Result<Vec<u8>, SourceError> {
        non_empty(std::mem::take(&mut self.bytes))
    }
}

fn non_empty(bytes: Vec<u8>) -> Result<Vec<u8>, SourceError> {
    if bytes.is_empty() {
        return Err(SourceError::Empty);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_source_yields_its_buffer() {
        let mut source = BytesSource::new(vec![0xF0, 0x40, 0xF7]);
        assert_eq!(source.read_dump().unwrap(), vec![0xF0, 0x40, 0xF7]);
    }

    #[test]
    fn empty_buffer_is_rejected() {
        let mut source = BytesSource::new(Vec::new());
        assert!(matches!(source.read_dump(), Err(SourceError::Empty)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("k4bank_missing_dump_does_not_exist.syx");
        let err = match SyxFileSource::open(&path) {
            Ok(_) => panic!("expected missing file to be rejected"),
            Err(err) => err,
        };
        assert!(matches!(err, SourceError::Io(_)));
    }
}
