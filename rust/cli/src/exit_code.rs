//! Exit code constants for the agent binary.

/// Input ended normally, or `--print-config` succeeded.
pub const SUCCESS: i32 = 0;

/// Bad arguments, bad configuration, or the reply stream closed.
pub const ERROR: i32 = 2;
