//! Arbitrary-width range values

use crate::config;
use crate::prefix::large as prefix;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use std::sync::Arc;

/// A contiguous range of `bit_count`-bit integers backed by `BigUint`
///
/// Mirrors [`RangeValue`](super::RangeValue) for widths beyond 64 bits; for
/// widths both can hold the two give identical answers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LargeRangeValue {
    lower: BigUint,
    upper: BigUint,
    bit_count: u32,
    prefix_len: Option<u32>,
}

impl LargeRangeValue {
    /// Create a range value
    pub fn new(
        lower: BigUint,
        upper: BigUint,
        bit_count: u32,
        prefix_len: Option<u32>,
    ) -> Result<Self> {
        if bit_count == 0 {
            return Err(Error::InvalidBitCount(bit_count));
        }
        if lower > upper {
            return Err(Error::InvalidRange {
                lower: lower.to_string(),
                upper: upper.to_string(),
            });
        }
        if upper.bits() > u64::from(bit_count) {
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

    pub(crate) fn new_unchecked(
        lower: BigUint,
        upper: BigUint,
        bit_count: u32,
        prefix_len: Option<u32>,
    ) -> Self {
        debug_assert!(lower <= upper && upper.bits() <= u64::from(bit_count));
        Self {
            lower,
            upper,
            bit_count,
            prefix_len,
        }
    }

    pub fn lower(&self) -> &BigUint {
        &self.lower
    }

    pub fn upper(&self) -> &BigUint {
        &self.upper
    }

    pub fn bit_count(&self) -> u32 {
        self.bit_count
    }

    pub fn prefix_len(&self) -> Option<u32> {
        self.prefix_len
    }

    pub fn is_prefixed(&self) -> bool {
        self.prefix_len.is_some()
    }

    pub fn max_value(&self) -> BigUint {
        prefix::max_value(self.bit_count)
    }

    pub fn byte_count(&self) -> usize {
        (self.bit_count as usize + 7) / 8
    }

    pub fn is_multiple(&self) -> bool {
        self.lower != self.upper
    }

    pub fn count(&self) -> BigUint {
        &self.upper - &self.lower + 1u32
    }

    pub fn is_zero(&self) -> bool {
        self.upper.is_zero()
    }

    pub fn includes_zero(&self) -> bool {
        self.lower.is_zero()
    }

    pub fn is_max(&self) -> bool {
        self.lower == self.max_value()
    }

    pub fn includes_max(&self) -> bool {
        self.upper == self.max_value()
    }

    pub fn is_full_range(&self) -> bool {
        prefix::is_full_range(&self.lower, &self.upper, self.bit_count)
    }

    pub fn contains_value(&self, value: &BigUint) -> bool {
        &self.lower <= value && value <= &self.upper
    }

    pub fn contains(&self, other: &LargeRangeValue) -> bool {
        self.bit_count == other.bit_count
            && self.lower <= other.lower
            && other.upper <= self.upper
    }

    pub fn overlaps(&self, other: &LargeRangeValue) -> bool {
        self.bit_count == other.bit_count
            && self.lower <= other.upper
            && other.lower <= self.upper
    }

    fn padded_bytes(&self, value: &BigUint) -> Vec<u8> {
        let raw = if value.is_zero() {
            Vec::new()
        } else {
            value.to_bytes_be()
        };
        let mut bytes = vec![0u8; self.byte_count() - raw.len()];
        bytes.extend_from_slice(&raw);
        bytes
    }

    /// Big-endian bytes of the lower value
    pub fn bytes(&self) -> Vec<u8> {
        self.padded_bytes(&self.lower)
    }

    /// Big-endian bytes of the upper value
    pub fn upper_bytes(&self) -> Vec<u8> {
        self.padded_bytes(&self.upper)
    }

    pub fn contains_prefix_block(&self, prefix_len: u32) -> bool {
        prefix::contains_prefix_block(&self.lower, &self.upper, self.bit_count, prefix_len)
    }

    pub fn contains_single_prefix_block(&self, prefix_len: u32) -> bool {
        prefix::contains_single_prefix_block(&self.lower, &self.upper, self.bit_count, prefix_len)
    }

    pub fn min_prefix_len_for_block(&self) -> u32 {
        prefix::min_prefix_len_for_block(&self.lower, &self.upper, self.bit_count)
    }

    pub fn prefix_len_for_single_block(&self) -> Option<u32> {
        prefix::prefix_len_for_single_block(&self.lower, &self.upper, self.bit_count)
    }

    pub fn prefix_count_len(&self, prefix_len: u32) -> BigUint {
        prefix::prefix_count(&self.lower, &self.upper, self.bit_count, prefix_len)
    }

    pub fn is_prefix_block(&self) -> bool {
        self.prefix_len
            .map_or(false, |p| self.contains_prefix_block(p))
    }

    pub fn is_single_prefix_block(&self) -> bool {
        self.prefix_len
            .map_or(false, |p| self.contains_single_prefix_block(p))
    }

    pub fn to_prefix_block_len(&self, prefix_len: u32) -> Result<Self> {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count)?;
        let host = prefix::host_mask(prefix_len, self.bit_count);
        let lower = &self.lower - (&self.lower & &host);
        let upper = &self.upper | &host;
        Ok(Self::new_unchecked(lower, upper, self.bit_count, Some(prefix_len)))
    }

    /// Derive a value of the same width
    pub fn derive(
        &self,
        lower: BigUint,
        upper: BigUint,
        prefix_len: Option<u32>,
    ) -> Result<Arc<LargeRangeValue>> {
        Self::new(lower, upper, self.bit_count, prefix_len).map(Arc::new)
    }

    pub fn with_prefix_len(&self, prefix_len: u32) -> Result<Self> {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count)?;
        Ok(Self {
            prefix_len: Some(prefix_len),
            ..self.clone()
        })
    }

    pub fn without_prefix_len(&self) -> Self {
        Self {
            prefix_len: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for LargeRangeValue {
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
