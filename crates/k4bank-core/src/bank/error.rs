use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("truncated bank data: need {needed} bytes, got {actual}")]
    TruncatedData { needed: usize, actual: usize },
    #[error("bank format sizes overflow the address space")]
    Overflow,
}
