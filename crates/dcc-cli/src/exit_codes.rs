//! Process exit codes. Part of the CLI contract.

pub const OK: i32 = 0;
pub const DECODE_FAILED: i32 = 1; // Token rejected by the decoder
pub const CONFIG_ERROR: i32 = 2; // Bad flags, unreadable input or reference data
