//! Fixed-width range values

use super::cache;
use crate::config;
use crate::prefix;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Widest division a [`RangeValue`] can hold
pub const MAX_FIXED_BIT_COUNT: u32 = u64::BITS;

/// A contiguous range of `bit_count`-bit integers with an optional prefix length
///
/// Values are immutable. Construction validates `lower <= upper <= max_value`
/// and applies the configured prefix length policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeValue {
    lower: u64,
    upper: u64,
    bit_count: u8,
    prefix_len: Option<u8>,
}

impl RangeValue {
    /// Create a range value
    pub fn new(lower: u64, upper: u64, bit_count: u32, prefix_len: Option<u32>) -> Result<Self> {
        if bit_count == 0 || bit_count > MAX_FIXED_BIT_COUNT {
            return Err(Error::InvalidBitCount(bit_count));
        }
        if lower > upper {
            return Err(Error::InvalidRange {
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        if upper > prefix::max_value(bit_count) {
            return Err(Error::ValueTooLarge {
                value: upper.to_string(),
                bit_count,
            });
        }
        let prefix_len = prefix_len
            .map(|p| config::check_prefix_len(p, bit_count))
            .transpose()?;
        Ok(Self::new_unchecked(lower, upper, bit_count, prefix_len))
    }

    /// Create a single-valued range
    pub fn single(value: u64, bit_count: u32) -> Result<Self> {
        Self::new(value, value, bit_count, None)
    }

    /// Create from already validated parts
    pub(crate) fn new_unchecked(
        lower: u64,
        upper: u64,
        bit_count: u32,
        prefix_len: Option<u32>,
    ) -> Self {
        debug_assert!(bit_count > 0 && bit_count <= MAX_FIXED_BIT_COUNT);
        debug_assert!(lower <= upper && upper <= prefix::max_value(bit_count));
        debug_assert!(prefix_len.map_or(true, |p| p <= bit_count));
        Self {
            lower,
            upper,
            bit_count: bit_count as u8,
            prefix_len: prefix_len.map(|p| p as u8),
        }
    }

    pub fn lower(&self) -> u64 {
        self.lower
    }

    pub fn upper(&self) -> u64 {
        self.upper
    }

    pub fn bit_count(&self) -> u32 {
        u32::from(self.bit_count)
    }

    /// Division-local prefix length
    pub fn prefix_len(&self) -> Option<u32> {
        self.prefix_len.map(u32::from)
    }

    pub fn is_prefixed(&self) -> bool {
        self.prefix_len.is_some()
    }

    /// Largest value of this width
    pub fn max_value(&self) -> u64 {
        prefix::max_value(self.bit_count())
    }

    /// Number of bytes in the byte forms
    pub fn byte_count(&self) -> usize {
        (self.bit_count() as usize + 7) / 8
    }

    pub fn is_multiple(&self) -> bool {
        self.lower != self.upper
    }

    /// Number of values in the range
    pub fn count(&self) -> u128 {
        u128::from(self.upper - self.lower) + 1
    }

    pub fn is_zero(&self) -> bool {
        self.upper == 0
    }

    pub fn includes_zero(&self) -> bool {
        self.lower == 0
    }

    pub fn is_max(&self) -> bool {
        self.lower == self.max_value()
    }

    pub fn includes_max(&self) -> bool {
        self.upper == self.max_value()
    }

    /// Whether the range spans every value of its width
    pub fn is_full_range(&self) -> bool {
        self.includes_zero() && self.includes_max()
    }

    pub fn contains_value(&self, value: u64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Whether every value of `other` is in this range
    pub fn contains(&self, other: &RangeValue) -> bool {
        self.bit_count == other.bit_count
            && self.lower <= other.lower
            && other.upper <= self.upper
    }

    pub fn overlaps(&self, other: &RangeValue) -> bool {
        self.bit_count == other.bit_count
            && self.lower <= other.upper
            && other.lower <= self.upper
    }

    /// Big-endian bytes of the lower value
    pub fn bytes(&self) -> Vec<u8> {
        self.lower.to_be_bytes()[8 - self.byte_count()..].to_vec()
    }

    /// Big-endian bytes of the upper value
    pub fn upper_bytes(&self) -> Vec<u8> {
        self.upper.to_be_bytes()[8 - self.byte_count()..].to_vec()
    }

    pub fn contains_prefix_block(&self, prefix_len: u32) -> bool {
        prefix::contains_prefix_block(self.lower, self.upper, self.bit_count(), prefix_len)
    }

    pub fn contains_single_prefix_block(&self, prefix_len: u32) -> bool {
        prefix::contains_single_prefix_block(self.lower, self.upper, self.bit_count(), prefix_len)
    }

    pub fn min_prefix_len_for_block(&self) -> u32 {
        prefix::min_prefix_len_for_block(self.lower, self.upper, self.bit_count())
    }

    pub fn prefix_len_for_single_block(&self) -> Option<u32> {
        prefix::prefix_len_for_single_block(self.lower, self.upper, self.bit_count())
    }

    /// Number of distinct prefixes of the given length
    pub fn prefix_count_len(&self, prefix_len: u32) -> u128 {
        prefix::prefix_count(self.lower, self.upper, self.bit_count(), prefix_len)
    }

    /// Whether the range is the set of blocks for its own prefix length
    pub fn is_prefix_block(&self) -> bool {
        self.prefix_len()
            .map_or(false, |p| self.contains_prefix_block(p))
    }

    /// Whether the range is exactly the one block for its own prefix length
    pub fn is_single_prefix_block(&self) -> bool {
        self.prefix_len()
            .map_or(false, |p| self.contains_single_prefix_block(p))
    }

    /// Expand to the prefix blocks of the given length and carry that length
    pub fn to_prefix_block_len(&self, prefix_len: u32) -> Result<Self> {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count())?;
        let host = prefix::host_mask(prefix_len, self.bit_count());
        Ok(Self::new_unchecked(
            self.lower & !host,
            self.upper | host,
            self.bit_count(),
            Some(prefix_len),
        ))
    }

    /// Derive a value of the same width, shared with the segment cache when possible
    pub fn derive(
        &self,
        lower: u64,
        upper: u64,
        prefix_len: Option<u32>,
    ) -> Result<Arc<RangeValue>> {
        let value = Self::new(lower, upper, self.bit_count(), prefix_len)?;
        Ok(cache::intern(value))
    }

    pub fn with_prefix_len(&self, prefix_len: u32) -> Result<Self> {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count())?;
        Ok(Self {
            prefix_len: Some(prefix_len as u8),
            ..*self
        })
    }

    pub fn without_prefix_len(&self) -> Self {
        Self {
            prefix_len: None,
            ..*self
        }
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_multiple() {
            write!(f, "{}-{}", self.lower, self.upper)?;
        } else {
            write!(f, "{}", self.lower)?;
        }
        if let Some(p) = self.prefix_len {
            write!(f, "/{}", p)?;
        }
        Ok(())
    }
}
