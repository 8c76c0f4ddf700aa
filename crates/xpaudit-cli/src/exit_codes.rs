//! Exit codes for `xpaudit`.
//! These codes are part of the public contract; CI jobs branch on them.

pub const OK: i32 = 0;
pub const FLAGGED: i32 = 1; // Flagged compositions found and --fail-on-flagged set
pub const CONFIG_ERROR: i32 = 2; // Bad config, unreadable or undecodable input
