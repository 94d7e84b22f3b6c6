mod syx;

pub use syx::{BytesSource, SyxFileSource};

use thiserror::Error;

/// Supplies one complete SysEx dump to the decoder.
pub trait DumpSource {
    fn read_dump(&mut self) -> Result<Vec<u8>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("dump is empty")]
    Empty,
}
