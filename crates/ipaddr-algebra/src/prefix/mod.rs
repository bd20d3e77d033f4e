//! Prefix block algebra
//!
//! Closed-form answers to block questions about a range `[lower, upper]` of
//! `bit_count`-bit values: does it contain every block of a given prefix
//! length, what is the shortest prefix for which it does, and is it exactly one
//! block. Nothing here iterates over the values of a range, only over bits or
//! divisions.
//!
//! The functions at module level work on `u64` values; [`large`] mirrors them
//! for `BigUint`. The `divisions_*` functions apply the single-division tests
//! across a sequence of divisions of any widths (the prefix-subnet rule).

pub mod large;

use crate::division::Division;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Largest value representable in `bit_count` bits
#[inline]
pub fn max_value(bit_count: u32) -> u64 {
    if bit_count >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bit_count) - 1
    }
}

/// Mask with the low `bit_count - prefix_len` bits set
#[inline]
pub fn host_mask(prefix_len: u32, bit_count: u32) -> u64 {
    max_value(bit_count - prefix_len.min(bit_count))
}

/// Mask with the high `prefix_len` of `bit_count` bits set
#[inline]
pub fn network_mask(prefix_len: u32, bit_count: u32) -> u64 {
    max_value(bit_count) & !host_mask(prefix_len, bit_count)
}

#[inline]
fn shift_right(value: u64, shift: u32) -> u64 {
    value.checked_shr(shift).unwrap_or(0)
}

/// Whether the range includes every value of each prefix block it touches
///
/// Holds iff the host bits of `lower` are all zero and those of `upper` all one.
/// A prefix length at or beyond the bit count leaves no host bits.
#[inline]
pub fn contains_prefix_block(lower: u64, upper: u64, bit_count: u32, prefix_len: u32) -> bool {
    let mask = host_mask(prefix_len, bit_count);
    lower & mask == 0 && upper & mask == mask
}

/// Whether the range is exactly one prefix block of the given length
#[inline]
pub fn contains_single_prefix_block(
    lower: u64,
    upper: u64,
    bit_count: u32,
    prefix_len: u32,
) -> bool {
    if !contains_prefix_block(lower, upper, bit_count, prefix_len) {
        return false;
    }
    let shift = bit_count - prefix_len.min(bit_count);
    shift_right(lower, shift) == shift_right(upper, shift)
}

/// Shortest prefix length for which the range contains its prefix blocks
#[inline]
pub fn min_prefix_len_for_block(lower: u64, upper: u64, bit_count: u32) -> u32 {
    let host_bits = lower
        .trailing_zeros()
        .min(upper.trailing_ones())
        .min(bit_count);
    bit_count - host_bits
}

/// Prefix length for which the range is exactly one prefix block, if any
#[inline]
pub fn prefix_len_for_single_block(lower: u64, upper: u64, bit_count: u32) -> Option<u32> {
    let prefix_len = min_prefix_len_for_block(lower, upper, bit_count);
    let shift = bit_count - prefix_len;
    (shift_right(lower, shift) == shift_right(upper, shift)).then_some(prefix_len)
}

/// Number of distinct `prefix_len`-bit prefixes in the range
#[inline]
pub fn prefix_count(lower: u64, upper: u64, bit_count: u32, prefix_len: u32) -> u128 {
    let shift = bit_count - prefix_len.min(bit_count);
    u128::from(shift_right(upper, shift) - shift_right(lower, shift)) + 1
}

/// Division index and division-local prefix length holding bit `prefix_len`
///
/// Returns `None` when the prefix length reaches past the last division, that
/// is when no host bits remain.
pub fn locate_prefix(divisions: &[Division], prefix_len: u32) -> Option<(usize, u32)> {
    let mut start = 0u32;
    for (index, division) in divisions.iter().enumerate() {
        let end = start + division.bit_count();
        if prefix_len < end {
            return Some((index, prefix_len.saturating_sub(start)));
        }
        start = end;
    }
    None
}

/// Total bit count of a division sequence
pub fn total_bit_count(divisions: &[Division]) -> u32 {
    divisions.iter().map(Division::bit_count).sum()
}

/// Multi-division form of [`contains_prefix_block`]
pub fn divisions_contain_prefix_block(divisions: &[Division], prefix_len: u32) -> bool {
    match locate_prefix(divisions, prefix_len) {
        None => true,
        Some((index, local)) => {
            divisions[index].contains_prefix_block(local)
                && divisions[index + 1..].iter().all(Division::is_full_range)
        }
    }
}

/// Multi-division form of [`contains_single_prefix_block`]
pub fn divisions_contain_single_prefix_block(divisions: &[Division], prefix_len: u32) -> bool {
    match locate_prefix(divisions, prefix_len) {
        None => !divisions.iter().any(Division::is_multiple),
        Some((index, local)) => {
            !divisions[..index].iter().any(Division::is_multiple)
                && divisions[index].contains_single_prefix_block(local)
                && divisions[index + 1..].iter().all(Division::is_full_range)
        }
    }
}

/// Multi-division form of [`min_prefix_len_for_block`]
///
/// Walks from the least significant division: full-range divisions contribute
/// all of their bits to the host, the first other division contributes its own
/// host bits and ends the walk.
pub fn divisions_min_prefix_len_for_block(divisions: &[Division]) -> u32 {
    let mut total = total_bit_count(divisions);
    for division in divisions.iter().rev() {
        let local = division.min_prefix_len_for_block();
        total -= division.bit_count() - local;
        if local != 0 {
            break;
        }
    }
    total
}

/// Multi-division form of [`prefix_len_for_single_block`]
pub fn divisions_prefix_len_for_single_block(divisions: &[Division]) -> Option<u32> {
    let mut total = total_bit_count(divisions);
    for (index, division) in divisions.iter().enumerate().rev() {
        let local = division.prefix_len_for_single_block()?;
        total -= division.bit_count() - local;
        if local != 0 {
            if divisions[..index].iter().any(Division::is_multiple) {
                return None;
            }
            return Some(total);
        }
    }
    Some(total)
}

/// Multi-division form of [`prefix_count`]
pub fn divisions_prefix_count(divisions: &[Division], prefix_len: u32) -> BigUint {
    if divisions.is_empty() {
        return BigUint::zero();
    }
    match locate_prefix(divisions, prefix_len) {
        None => divisions
            .iter()
            .fold(BigUint::one(), |acc, division| acc * division.count()),
        Some((index, local)) => divisions[..index]
            .iter()
            .fold(divisions[index].prefix_count_len(local), |acc, division| {
                acc * division.count()
            }),
    }
}
