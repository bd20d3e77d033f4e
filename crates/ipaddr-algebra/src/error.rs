//! Error types for address value algebra

use crate::kind::AddressKind;
use thiserror::Error;

/// Result type for address algebra operations
pub type Result<T> = std::result::Result<T, Error>;

/// Address algebra errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Range errors
    #[error("range {lower}-{upper} cannot be {operation} as a contiguous block")]
    IncompatibleRange {
        operation: &'static str,
        lower: String,
        upper: String,
    },

    #[error("invalid range: lower {lower} exceeds upper {upper}")]
    InvalidRange { lower: String, upper: String },

    #[error("value {value} does not fit in {bit_count} bits")]
    ValueTooLarge { value: String, bit_count: u32 },

    // Shape errors
    #[error("size mismatch: expected {expected} divisions, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("{kind} sections require {expected}-bit divisions, found {actual} bits at index {index}")]
    DivisionWidthMismatch {
        kind: AddressKind,
        index: usize,
        expected: u32,
        actual: u32,
    },

    #[error("{kind} sections hold at most {max} divisions, found {actual}")]
    TooManyDivisions {
        kind: AddressKind,
        max: usize,
        actual: usize,
    },

    #[error("division index {index} out of range for {count} divisions")]
    IndexOutOfRange { index: usize, count: usize },

    // Parameter errors
    #[error("prefix length {prefix_len} exceeds bit count {bit_count}")]
    PrefixLenOutOfRange { prefix_len: u32, bit_count: u32 },

    #[error("invalid bit count: {0}")]
    InvalidBitCount(u32),

    #[error("radix {0} is outside 2..=85")]
    InvalidRadix(u32),

    #[error("configuration error: {0}")]
    Config(String),

    // Conversion errors
    #[error("not convertible: {0}")]
    NotConvertible(String),
}

impl Error {
    /// Build an incompatible-range error from any displayable bounds
    pub(crate) fn incompatible(
        operation: &'static str,
        lower: impl ToString,
        upper: impl ToString,
    ) -> Self {
        Error::IncompatibleRange {
            operation,
            lower: lower.to_string(),
            upper: upper.to_string(),
        }
    }

    /// Whether this error was caused by the request rather than the inputs' shape
    pub fn is_incompatible_range(&self) -> bool {
        matches!(self, Error::IncompatibleRange { .. })
    }
}

impl From<ipnet::PrefixLenError> for Error {
    fn from(e: ipnet::PrefixLenError) -> Self {
        Error::NotConvertible(e.to_string())
    }
}
