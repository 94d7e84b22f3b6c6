//! SysEx envelope validation.
//!
//! The K4 header is eight single-byte fields: start byte, manufacturer ID,
//! channel, function, group, machine ID and two sub-status bytes. Only the
//! start byte and manufacturer ID are validated; function and sub-status are
//! classified on request through `SysExEnvelope::identify`.
//!
//! Offsets live in `layout`, byte access in `reader`, decoding in `parser`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::EnvelopeError;
pub use parser::{
    Cardinality, DumpIdentity, DumpKind, Function, Locality, SysExEnvelope, validate_envelope,
};
