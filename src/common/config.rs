use crate::temporal::TimeParseMode;

/// Default charset id (utf8mb4) used when a column does not name one.
pub const DEFAULT_CHARSET_ID: u16 = 45;

/// Maximum fractional seconds precision
pub const MAX_FSP: u8 = 6;

/// Largest sub-second part a temporal value can carry
pub const MAX_MICROSECOND: u32 = 999_999;

/// Largest payload a 1-byte length prefix can describe
pub const MAX_SHORT_PREFIX_LEN: usize = u8::MAX as usize;

/// Largest payload a 2-byte length prefix can describe
pub const MAX_LONG_PREFIX_LEN: usize = u16::MAX as usize;

/// Runtime options for a [`ColumnCodec`](crate::codec::ColumnCodec).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    /// How strings written into TIME and DATETIME columns are parsed.
    pub time_parse_mode: TimeParseMode,
}
