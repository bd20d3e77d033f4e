//! Prefix block algebra over arbitrary-precision values
//!
//! Same contracts as the `u64` functions in the parent module.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Largest value representable in `bit_count` bits
pub fn max_value(bit_count: u32) -> BigUint {
    (BigUint::one() << bit_count) - 1u32
}

/// Mask with the low `bit_count - prefix_len` bits set
pub fn host_mask(prefix_len: u32, bit_count: u32) -> BigUint {
    max_value(bit_count - prefix_len.min(bit_count))
}

/// Mask with the high `prefix_len` of `bit_count` bits set
pub fn network_mask(prefix_len: u32, bit_count: u32) -> BigUint {
    max_value(bit_count) ^ host_mask(prefix_len, bit_count)
}

fn trailing_zeros(value: &BigUint, bit_count: u32) -> u32 {
    value
        .trailing_zeros()
        .map_or(bit_count, |zeros| zeros.min(u64::from(bit_count)) as u32)
}

fn trailing_ones(value: &BigUint, bit_count: u32) -> u32 {
    trailing_zeros(&(value + 1u32), bit_count)
}

/// Whether the range includes every value of each prefix block it touches
pub fn contains_prefix_block(
    lower: &BigUint,
    upper: &BigUint,
    bit_count: u32,
    prefix_len: u32,
) -> bool {
    let host_bits = bit_count - prefix_len.min(bit_count);
    trailing_zeros(lower, bit_count) >= host_bits && trailing_ones(upper, bit_count) >= host_bits
}

/// Whether the range is exactly one prefix block of the given length
pub fn contains_single_prefix_block(
    lower: &BigUint,
    upper: &BigUint,
    bit_count: u32,
    prefix_len: u32,
) -> bool {
    if !contains_prefix_block(lower, upper, bit_count, prefix_len) {
        return false;
    }
    let shift = bit_count - prefix_len.min(bit_count);
    (lower >> shift) == (upper >> shift)
}

/// Shortest prefix length for which the range contains its prefix blocks
pub fn min_prefix_len_for_block(lower: &BigUint, upper: &BigUint, bit_count: u32) -> u32 {
    let host_bits = trailing_zeros(lower, bit_count).min(trailing_ones(upper, bit_count));
    bit_count - host_bits
}

/// Prefix length for which the range is exactly one prefix block, if any
pub fn prefix_len_for_single_block(
    lower: &BigUint,
    upper: &BigUint,
    bit_count: u32,
) -> Option<u32> {
    let prefix_len = min_prefix_len_for_block(lower, upper, bit_count);
    let shift = bit_count - prefix_len;
    ((lower >> shift) == (upper >> shift)).then_some(prefix_len)
}

/// Number of distinct `prefix_len`-bit prefixes in the range
pub fn prefix_count(lower: &BigUint, upper: &BigUint, bit_count: u32, prefix_len: u32) -> BigUint {
    let shift = bit_count - prefix_len.min(bit_count);
    (upper >> shift) - (lower >> shift) + 1u32
}

/// Whether the range covers every `bit_count`-bit value
pub fn is_full_range(lower: &BigUint, upper: &BigUint, bit_count: u32) -> bool {
    lower.is_zero() && *upper == max_value(bit_count)
}
