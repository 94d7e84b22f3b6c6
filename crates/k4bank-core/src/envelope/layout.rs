pub const START_BYTE_OFFSET: usize = 0;
pub const MANUFACTURER_OFFSET: usize = 1;
pub const CHANNEL_OFFSET: usize = 2;
pub const FUNCTION_OFFSET: usize = 3;
pub const GROUP_OFFSET: usize = 4;
pub const MACHINE_OFFSET: usize = 5;
pub const SUB_STATUS1_OFFSET: usize = 6;
pub const SUB_STATUS2_OFFSET: usize = 7;

pub const HEADER_SIZE: usize = 8;

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;
pub const KAWAI_ID: u8 = 0x40;

pub const SUB_STATUS_INTERNAL: u8 = 0x00;
pub const SUB_STATUS_EXTERNAL: u8 = 0x02;

/// Sub-status 2 values below this address single patches; the rest are multis.
pub const FIRST_MULTI_NUMBER: u8 = 64;
pub const MAX_PATCH_NUMBER: u8 = 127;
