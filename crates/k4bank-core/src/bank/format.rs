use serde::{Deserialize, Serialize};

/// Record counts and sizes of an all-patch data dump.
///
/// Shared by the layout calculation and the section decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankFormat {
    pub header_size: usize,
    pub single_count: usize,
    pub single_size: usize,
    pub multi_count: usize,
    pub multi_size: usize,
    /// The drum section is one block, not a counted run of records.
    pub drum_size: usize,
    pub effect_count: usize,
    pub effect_size: usize,
}

impl BankFormat {
    /// Kawai K4 / K4r internal bank.
    pub const K4: Self = Self {
        header_size: 8,
        single_count: 64,
        single_size: 131,
        multi_count: 64,
        multi_size: 77,
        drum_size: 682,
        effect_count: 32,
        effect_size: 35,
    };
}

impl Default for BankFormat {
    fn default() -> Self {
        Self::K4
    }
}

/// Patches per bank letter (A–D) on the front panel.
pub const PATCHES_PER_BANK: usize = 16;
