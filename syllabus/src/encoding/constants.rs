// escape prefixes
pub(crate) const ESCAPE_LOW: u8 = 0x00;
pub(crate) const ESCAPE_HIGH: u8 = 0xFF;

// continuations after ESCAPE_LOW
pub(crate) const LITERAL_LOW: u8 = 0xFF;
pub(crate) const SENTINEL_MIN: u8 = 0x01;

// continuations after ESCAPE_HIGH
pub(crate) const LITERAL_HIGH: u8 = 0x00;
pub(crate) const SENTINEL_MAX: u8 = 0xFF;

/// Separator of ascending encodings, below every escaped byte.
pub const MIN_SEPARATOR: [u8; 2] = [ESCAPE_LOW, SENTINEL_MIN];
/// Separator of descending encodings, above every escaped byte.
pub const MAX_SEPARATOR: [u8; 2] = [ESCAPE_HIGH, SENTINEL_MAX];

pub(crate) const SIGN_BIT: u64 = 0x8000_0000_0000_0000;

/// Deepest list or object nesting the decoder accepts.
pub const MAX_NESTING_DEPTH: usize = 128;
