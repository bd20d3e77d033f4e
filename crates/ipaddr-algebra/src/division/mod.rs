//! Address divisions
//!
//! A division is one component of an address section: a contiguous range of
//! integers of a fixed bit width. [`Division`] is a closed enum over the
//! native-width [`RangeValue`] and the arbitrary-width [`LargeRangeValue`];
//! both variants are reference counted so groupings share divisions freely.

pub mod cache;
pub mod large;
pub mod range;

pub use large::LargeRangeValue;
pub use range::{RangeValue, MAX_FIXED_BIT_COUNT};

use crate::mask;
use crate::prefix;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One division of an address section
#[derive(Debug, Clone)]
pub enum Division {
    /// Up to 64 bits wide
    Fixed(Arc<RangeValue>),
    /// Any width
    Large(Arc<LargeRangeValue>),
}

impl Division {
    /// Create a native-width division
    pub fn new(lower: u64, upper: u64, prefix_len: Option<u32>, bit_count: u32) -> Result<Self> {
        let value = RangeValue::new(lower, upper, bit_count, prefix_len)?;
        Ok(Division::Fixed(cache::intern(value)))
    }

    /// Create a single-valued native-width division
    pub fn single(value: u64, bit_count: u32) -> Result<Self> {
        Self::new(value, value, None, bit_count)
    }

    /// Create an arbitrary-width division
    pub fn new_large(
        lower: BigUint,
        upper: BigUint,
        prefix_len: Option<u32>,
        bit_count: u32,
    ) -> Result<Self> {
        let value = LargeRangeValue::new(lower, upper, bit_count, prefix_len)?;
        Ok(Division::Large(Arc::new(value)))
    }

    /// Create a division of any width, native when the width allows
    pub fn from_big(
        lower: &BigUint,
        upper: &BigUint,
        prefix_len: Option<u32>,
        bit_count: u32,
    ) -> Result<Self> {
        if bit_count <= MAX_FIXED_BIT_COUNT {
            if let (Some(l), Some(u)) = (to_u64(lower), to_u64(upper)) {
                return Self::new(l, u, prefix_len, bit_count);
            }
        }
        Self::new_large(lower.clone(), upper.clone(), prefix_len, bit_count)
    }

    pub fn as_fixed(&self) -> Option<&RangeValue> {
        match self {
            Division::Fixed(value) => Some(value),
            Division::Large(_) => None,
        }
    }

    pub fn as_large(&self) -> Option<&LargeRangeValue> {
        match self {
            Division::Fixed(_) => None,
            Division::Large(value) => Some(value),
        }
    }

    pub fn is_large(&self) -> bool {
        matches!(self, Division::Large(_))
    }

    /// Whether both handles point at the same shared value
    pub fn ptr_eq(&self, other: &Division) -> bool {
        match (self, other) {
            (Division::Fixed(a), Division::Fixed(b)) => Arc::ptr_eq(a, b),
            (Division::Large(a), Division::Large(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn bit_count(&self) -> u32 {
        match self {
            Division::Fixed(v) => v.bit_count(),
            Division::Large(v) => v.bit_count(),
        }
    }

    pub fn byte_count(&self) -> usize {
        match self {
            Division::Fixed(v) => v.byte_count(),
            Division::Large(v) => v.byte_count(),
        }
    }

    /// Division-local prefix length
    pub fn prefix_len(&self) -> Option<u32> {
        match self {
            Division::Fixed(v) => v.prefix_len(),
            Division::Large(v) => v.prefix_len(),
        }
    }

    pub fn is_prefixed(&self) -> bool {
        self.prefix_len().is_some()
    }

    pub fn lower_value(&self) -> BigUint {
        match self {
            Division::Fixed(v) => BigUint::from(v.lower()),
            Division::Large(v) => v.lower().clone(),
        }
    }

    pub fn upper_value(&self) -> BigUint {
        match self {
            Division::Fixed(v) => BigUint::from(v.upper()),
            Division::Large(v) => v.upper().clone(),
        }
    }

    pub fn max_value(&self) -> BigUint {
        prefix::large::max_value(self.bit_count())
    }

    pub fn is_multiple(&self) -> bool {
        match self {
            Division::Fixed(v) => v.is_multiple(),
            Division::Large(v) => v.is_multiple(),
        }
    }

    pub fn count(&self) -> BigUint {
        match self {
            Division::Fixed(v) => BigUint::from(v.count()),
            Division::Large(v) => v.count(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Division::Fixed(v) => v.is_zero(),
            Division::Large(v) => v.is_zero(),
        }
    }

    pub fn includes_zero(&self) -> bool {
        match self {
            Division::Fixed(v) => v.includes_zero(),
            Division::Large(v) => v.includes_zero(),
        }
    }

    pub fn is_max(&self) -> bool {
        match self {
            Division::Fixed(v) => v.is_max(),
            Division::Large(v) => v.is_max(),
        }
    }

    pub fn includes_max(&self) -> bool {
        match self {
            Division::Fixed(v) => v.includes_max(),
            Division::Large(v) => v.includes_max(),
        }
    }

    pub fn is_full_range(&self) -> bool {
        match self {
            Division::Fixed(v) => v.is_full_range(),
            Division::Large(v) => v.is_full_range(),
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        match self {
            Division::Fixed(v) => v.bytes(),
            Division::Large(v) => v.bytes(),
        }
    }

    pub fn upper_bytes(&self) -> Vec<u8> {
        match self {
            Division::Fixed(v) => v.upper_bytes(),
            Division::Large(v) => v.upper_bytes(),
        }
    }

    pub fn contains_prefix_block(&self, prefix_len: u32) -> bool {
        match self {
            Division::Fixed(v) => v.contains_prefix_block(prefix_len),
            Division::Large(v) => v.contains_prefix_block(prefix_len),
        }
    }

    pub fn contains_single_prefix_block(&self, prefix_len: u32) -> bool {
        match self {
            Division::Fixed(v) => v.contains_single_prefix_block(prefix_len),
            Division::Large(v) => v.contains_single_prefix_block(prefix_len),
        }
    }

    pub fn min_prefix_len_for_block(&self) -> u32 {
        match self {
            Division::Fixed(v) => v.min_prefix_len_for_block(),
            Division::Large(v) => v.min_prefix_len_for_block(),
        }
    }

    pub fn prefix_len_for_single_block(&self) -> Option<u32> {
        match self {
            Division::Fixed(v) => v.prefix_len_for_single_block(),
            Division::Large(v) => v.prefix_len_for_single_block(),
        }
    }

    pub fn prefix_count_len(&self, prefix_len: u32) -> BigUint {
        match self {
            Division::Fixed(v) => BigUint::from(v.prefix_count_len(prefix_len)),
            Division::Large(v) => v.prefix_count_len(prefix_len),
        }
    }

    pub fn is_prefix_block(&self) -> bool {
        self.prefix_len()
            .map_or(false, |p| self.contains_prefix_block(p))
    }

    pub fn is_single_prefix_block(&self) -> bool {
        self.prefix_len()
            .map_or(false, |p| self.contains_single_prefix_block(p))
    }

    /// Whether every value of `other` is in this division
    pub fn contains(&self, other: &Division) -> bool {
        match (self, other) {
            (Division::Fixed(a), Division::Fixed(b)) => a.contains(b),
            _ => {
                self.bit_count() == other.bit_count()
                    && self.lower_value() <= other.lower_value()
                    && other.upper_value() <= self.upper_value()
            }
        }
    }

    pub fn overlaps(&self, other: &Division) -> bool {
        match (self, other) {
            (Division::Fixed(a), Division::Fixed(b)) => a.overlaps(b),
            _ => {
                self.bit_count() == other.bit_count()
                    && self.lower_value() <= other.upper_value()
                    && other.lower_value() <= self.upper_value()
            }
        }
    }

    /// Whether both hold the same values at the same width, ignoring prefixes
    pub fn same_values(&self, other: &Division) -> bool {
        match (self, other) {
            (Division::Fixed(a), Division::Fixed(b)) => {
                a.bit_count() == b.bit_count() && a.lower() == b.lower() && a.upper() == b.upper()
            }
            _ => {
                self.bit_count() == other.bit_count()
                    && self.lower_value() == other.lower_value()
                    && self.upper_value() == other.upper_value()
            }
        }
    }

    // Derivations used by groupings. Inputs are trusted: prefix lengths are
    // already within the division's width.

    fn derive_fixed(
        &self,
        lower: u64,
        upper: u64,
        bit_count: u32,
        prefix_len: Option<u32>,
    ) -> Division {
        Division::Fixed(cache::fixed(lower, upper, bit_count, prefix_len))
    }

    fn derive_large(&self, lower: BigUint, upper: BigUint, prefix_len: Option<u32>) -> Division {
        Division::Large(Arc::new(LargeRangeValue::new_unchecked(
            lower,
            upper,
            self.bit_count(),
            prefix_len,
        )))
    }

    /// Same values with the given division-local prefix length
    pub(crate) fn with_local_prefix(&self, prefix_len: Option<u32>) -> Division {
        if self.prefix_len() == prefix_len {
            return self.clone();
        }
        match self {
            Division::Fixed(v) => self.derive_fixed(v.lower(), v.upper(), v.bit_count(), prefix_len),
            Division::Large(v) => self.derive_large(v.lower().clone(), v.upper().clone(), prefix_len),
        }
    }

    /// Expand to the prefix blocks of a division-local prefix length
    pub(crate) fn to_prefix_block_local(&self, prefix_len: u32) -> Division {
        match self {
            Division::Fixed(v) => {
                let host = prefix::host_mask(prefix_len, v.bit_count());
                self.derive_fixed(v.lower() & !host, v.upper() | host, v.bit_count(), Some(prefix_len))
            }
            Division::Large(v) => {
                let host = prefix::large::host_mask(prefix_len, v.bit_count());
                let lower = v.lower() - (v.lower() & &host);
                self.derive_large(lower, v.upper() | &host, Some(prefix_len))
            }
        }
    }

    /// Bounds of the host bits of every value; the result may be a superset
    /// of the masked values when they are not contiguous
    pub(crate) fn to_host_local(&self, prefix_len: u32) -> Division {
        match self {
            Division::Fixed(v) => {
                let host = prefix::host_mask(prefix_len, v.bit_count());
                let masked = mask::mask_range(v.lower(), v.upper(), host);
                self.derive_fixed(masked.lower, masked.upper, v.bit_count(), Some(prefix_len))
            }
            Division::Large(v) => {
                let host = prefix::large::host_mask(prefix_len, v.bit_count());
                let masked = mask::mask_large_range(v.lower(), v.upper(), &host);
                self.derive_large(masked.lower, masked.upper, Some(prefix_len))
            }
        }
    }

    /// Zero the bits after a division-local prefix length
    pub(crate) fn zero_host_local(&self, prefix_len: u32, keep: Option<u32>) -> Result<Division> {
        match self {
            Division::Fixed(v) => {
                let network = prefix::network_mask(prefix_len, v.bit_count());
                let masked = mask::mask_range(v.lower(), v.upper(), network);
                if !masked.sequential {
                    return Err(Error::incompatible("zero-host masked", v.lower(), v.upper()));
                }
                Ok(self.derive_fixed(masked.lower, masked.upper, v.bit_count(), keep))
            }
            Division::Large(v) => {
                let network = prefix::large::network_mask(prefix_len, v.bit_count());
                let masked = mask::mask_large_range(v.lower(), v.upper(), &network);
                if !masked.sequential {
                    return Err(Error::incompatible("zero-host masked", v.lower(), v.upper()));
                }
                Ok(self.derive_large(masked.lower, masked.upper, keep))
            }
        }
    }

    /// Set the bits after a division-local prefix length
    pub(crate) fn max_host_local(&self, prefix_len: u32, keep: Option<u32>) -> Result<Division> {
        match self {
            Division::Fixed(v) => {
                let host = prefix::host_mask(prefix_len, v.bit_count());
                let ored = mask::or_range(v.lower(), v.upper(), host, v.bit_count());
                if !ored.sequential {
                    return Err(Error::incompatible("max-host masked", v.lower(), v.upper()));
                }
                Ok(self.derive_fixed(ored.lower, ored.upper, v.bit_count(), keep))
            }
            Division::Large(v) => {
                let host = prefix::large::host_mask(prefix_len, v.bit_count());
                let ored = mask::or_large_range(v.lower(), v.upper(), &host, v.bit_count());
                if !ored.sequential {
                    return Err(Error::incompatible("max-host masked", v.lower(), v.upper()));
                }
                Ok(self.derive_large(ored.lower, ored.upper, keep))
            }
        }
    }

    /// All-zero single value of the same width
    pub(crate) fn zeroed(&self, prefix_len: Option<u32>) -> Division {
        match self {
            Division::Fixed(v) => self.derive_fixed(0, 0, v.bit_count(), prefix_len),
            Division::Large(_) => self.derive_large(BigUint::zero(), BigUint::zero(), prefix_len),
        }
    }

    /// All-ones single value of the same width
    pub(crate) fn maxed(&self, prefix_len: Option<u32>) -> Division {
        match self {
            Division::Fixed(v) => {
                let max = v.max_value();
                self.derive_fixed(max, max, v.bit_count(), prefix_len)
            }
            Division::Large(v) => self.derive_large(v.max_value(), v.max_value(), prefix_len),
        }
    }

    /// Every value of the same width
    pub(crate) fn full(&self, prefix_len: Option<u32>) -> Division {
        match self {
            Division::Fixed(v) => self.derive_fixed(0, v.max_value(), v.bit_count(), prefix_len),
            Division::Large(v) => self.derive_large(BigUint::zero(), v.max_value(), prefix_len),
        }
    }

    /// Whether the host bits after a division-local prefix length are zero in
    /// every value
    pub(crate) fn is_zero_host_local(&self, prefix_len: u32) -> bool {
        if prefix_len >= self.bit_count() {
            return true;
        }
        match self {
            Division::Fixed(v) => {
                !v.is_multiple() && v.lower() & prefix::host_mask(prefix_len, v.bit_count()) == 0
            }
            Division::Large(v) => {
                let host = prefix::large::host_mask(prefix_len, v.bit_count());
                !v.is_multiple() && (v.lower() & &host).is_zero()
            }
        }
    }

    /// Whether the host bits after a division-local prefix length are all one
    /// in every value
    pub(crate) fn is_max_host_local(&self, prefix_len: u32) -> bool {
        if prefix_len >= self.bit_count() {
            return true;
        }
        match self {
            Division::Fixed(v) => {
                let host = prefix::host_mask(prefix_len, v.bit_count());
                !v.is_multiple() && v.lower() & host == host
            }
            Division::Large(v) => {
                let host = prefix::large::host_mask(prefix_len, v.bit_count());
                !v.is_multiple() && (v.lower() & &host) == host
            }
        }
    }

    /// Mask every value with the lower value of `mask`
    pub(crate) fn mask_with(&self, mask: &Division) -> Result<Division> {
        match (self, mask) {
            (Division::Fixed(v), Division::Fixed(m)) => {
                let masked = mask::mask_range(v.lower(), v.upper(), m.lower());
                if !masked.sequential {
                    return Err(Error::incompatible("masked", v.lower(), v.upper()));
                }
                Ok(self.derive_fixed(masked.lower, masked.upper, v.bit_count(), None))
            }
            _ => {
                let (lower, upper) = (self.lower_value(), self.upper_value());
                let masked = mask::mask_large_range(&lower, &upper, &mask.lower_value());
                if !masked.sequential {
                    return Err(Error::incompatible("masked", lower, upper));
                }
                Division::from_big(&masked.lower, &masked.upper, None, self.bit_count())
            }
        }
    }

    /// Or every value with the lower value of `bits`
    pub(crate) fn or_with(&self, bits: &Division) -> Result<Division> {
        match (self, bits) {
            (Division::Fixed(v), Division::Fixed(b)) => {
                let ored = mask::or_range(v.lower(), v.upper(), b.lower(), v.bit_count());
                if !ored.sequential {
                    return Err(Error::incompatible("or-ed", v.lower(), v.upper()));
                }
                Ok(self.derive_fixed(ored.lower, ored.upper, v.bit_count(), None))
            }
            _ => {
                let (lower, upper) = (self.lower_value(), self.upper_value());
                let ored =
                    mask::or_large_range(&lower, &upper, &bits.lower_value(), self.bit_count());
                if !ored.sequential {
                    return Err(Error::incompatible("or-ed", lower, upper));
                }
                Division::from_big(&ored.lower, &ored.upper, None, self.bit_count())
            }
        }
    }
}

fn to_u64(value: &BigUint) -> Option<u64> {
    num_traits::ToPrimitive::to_u64(value)
}

impl From<RangeValue> for Division {
    fn from(value: RangeValue) -> Self {
        Division::Fixed(cache::intern(value))
    }
}

impl From<LargeRangeValue> for Division {
    fn from(value: LargeRangeValue) -> Self {
        Division::Large(Arc::new(value))
    }
}

impl PartialEq for Division {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Division::Fixed(a), Division::Fixed(b)) => a == b,
            _ => self.prefix_len() == other.prefix_len() && self.same_values(other),
        }
    }
}

impl Eq for Division {}

impl Hash for Division {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash both variants through the same digit form so equal values hash
        // alike regardless of representation.
        self.bit_count().hash(state);
        self.prefix_len().hash(state);
        match self {
            Division::Fixed(v) => {
                digits(v.lower()).hash(state);
                digits(v.upper()).hash(state);
            }
            Division::Large(v) => {
                v.lower().to_u64_digits().hash(state);
                v.upper().to_u64_digits().hash(state);
            }
        }
    }
}

fn digits(value: u64) -> Vec<u64> {
    if value == 0 {
        Vec::new()
    } else {
        vec![value]
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Division::Fixed(v) => fmt::Display::fmt(&**v, f),
            Division::Large(v) => fmt::Display::fmt(&**v, f),
        }
    }
}
