//! Bank layout calculation.
//!
//! Section offsets are pure arithmetic over `BankFormat`: header, singles,
//! multis, the drum block, effects, then the EOX byte.

pub mod error;
pub mod format;
pub mod layout;

pub use error::LayoutError;
pub use format::{BankFormat, PATCHES_PER_BANK};
pub use layout::{BankLayout, SectionSpan, compute_layout};
