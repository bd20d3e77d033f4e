//! Masking and or-ing of value ranges
//!
//! Applying a mask to every value of a contiguous range does not in general
//! produce a contiguous range: `[0x0f, 0x10] & 0x0f` is `{0x00, 0x0f}`. These
//! functions compute the bounds of the masked set and whether the set is
//! exactly the range between those bounds, without visiting the values.
//!
//! Let `h` be the highest bit where `lower` and `upper` differ and `k` the
//! highest mask bit at or below `h`. Bits above `h` are shared by every value.
//! When `k == h` the masked set is contiguous iff the mask has every bit below
//! `k`; otherwise the bounds come from a greedy walk over the mask bits. When
//! `k < h` the range wraps every residue class below `k`, so the result spans
//! the full masked residue range and is contiguous only if the range covers a
//! complete `2^(k+1)` cycle and the mask bits below `k` are all set.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Bounds of a masked `u64` range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedRange {
    pub lower: u64,
    pub upper: u64,
    /// Every value between `lower` and `upper` is produced by the mask
    pub sequential: bool,
}

impl MaskedRange {
    fn single(value: u64) -> Self {
        Self {
            lower: value,
            upper: value,
            sequential: true,
        }
    }
}

/// Bounds of a masked `BigUint` range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeMaskedRange {
    pub lower: BigUint,
    pub upper: BigUint,
    pub sequential: bool,
}

impl LargeMaskedRange {
    fn single(value: BigUint) -> Self {
        Self {
            lower: value.clone(),
            upper: value,
            sequential: true,
        }
    }
}

#[inline]
fn ones(count: u32) -> u64 {
    crate::prefix::max_value(count)
}

/// Mask every value of `[lower, upper]`
pub fn mask_range(lower: u64, upper: u64, mask: u64) -> MaskedRange {
    if lower == upper {
        return MaskedRange::single(lower & mask);
    }
    let high = u64::BITS - 1 - (lower ^ upper).leading_zeros();
    let through_high = ones(high + 1);
    let masked = mask & through_high;
    if masked == 0 {
        return MaskedRange::single(lower & mask);
    }
    let top = u64::BITS - 1 - masked.leading_zeros();
    let below_top = ones(top);
    let fills_below = masked & below_top == below_top;

    if top < high {
        let base = lower & mask & !through_high;
        let cycle = ones(top + 1);
        return MaskedRange {
            lower: base,
            upper: base | masked,
            sequential: fills_below && upper - lower >= cycle,
        };
    }

    if fills_below {
        return MaskedRange {
            lower: lower & mask,
            upper: upper & mask,
            sequential: true,
        };
    }

    // The top mask bit splits the range into a lower half (bit clear) holding
    // the minimum and an upper half (bit set) holding the maximum.
    let shared = lower & !through_high;
    let upper_low = upper & below_top;
    let mut max_low = 0u64;
    let lower_low = lower & below_top;
    let mut min_low = below_top;
    for bit in (0..top).rev() {
        let bit = 1u64 << bit;
        if mask & bit != 0 {
            if max_low | bit <= upper_low {
                max_low |= bit;
            }
            if min_low & !bit >= lower_low {
                min_low &= !bit;
            }
        }
    }
    MaskedRange {
        lower: (shared | min_low) & mask,
        upper: (shared | (1u64 << top) | max_low) & mask,
        sequential: false,
    }
}

/// Or every value of `[lower, upper]` with `bits`, within `bit_count` bits
///
/// Computed as the complement of masking the complemented range.
pub fn or_range(lower: u64, upper: u64, bits: u64, bit_count: u32) -> MaskedRange {
    let max = ones(bit_count);
    let complement = mask_range(!upper & max, !lower & max, !bits & max);
    MaskedRange {
        lower: !complement.upper & max,
        upper: !complement.lower & max,
        sequential: complement.sequential,
    }
}

fn large_ones(count: u64) -> BigUint {
    (BigUint::one() << count) - 1u32
}

/// Mask every value of `[lower, upper]`
pub fn mask_large_range(lower: &BigUint, upper: &BigUint, mask: &BigUint) -> LargeMaskedRange {
    if lower == upper {
        return LargeMaskedRange::single(lower & mask);
    }
    let high = (lower ^ upper).bits() - 1;
    let through_high = large_ones(high + 1);
    let masked = mask & &through_high;
    if masked.is_zero() {
        return LargeMaskedRange::single(lower & mask);
    }
    let top = masked.bits() - 1;
    let below_top = large_ones(top);
    let fills_below = (&masked & &below_top) == below_top;

    if top < high {
        let base = (lower & mask) - (lower & mask & &through_high);
        let cycle = large_ones(top + 1);
        let sequential = fills_below && (upper - lower) >= cycle;
        return LargeMaskedRange {
            upper: &base | &masked,
            lower: base,
            sequential,
        };
    }

    if fills_below {
        return LargeMaskedRange {
            lower: lower & mask,
            upper: upper & mask,
            sequential: true,
        };
    }

    let shared = lower - (lower & &through_high);
    let upper_low = upper & &below_top;
    let lower_low = lower & &below_top;
    let mut max_low = BigUint::zero();
    let mut min_low = below_top;
    for bit in (0..top).rev() {
        if mask.bit(bit) {
            max_low.set_bit(bit, true);
            if max_low > upper_low {
                max_low.set_bit(bit, false);
            }
            min_low.set_bit(bit, false);
            if min_low < lower_low {
                min_low.set_bit(bit, true);
            }
        }
    }
    let mut max = shared.clone() | max_low;
    max.set_bit(top, true);
    LargeMaskedRange {
        lower: (shared | min_low) & mask,
        upper: max & mask,
        sequential: false,
    }
}

/// Or every value of `[lower, upper]` with `bits`, within `bit_count` bits
pub fn or_large_range(
    lower: &BigUint,
    upper: &BigUint,
    bits: &BigUint,
    bit_count: u32,
) -> LargeMaskedRange {
    let max = large_ones(u64::from(bit_count));
    let complement = mask_large_range(&(&max ^ upper), &(&max ^ lower), &(&max ^ bits));
    LargeMaskedRange {
        lower: &max ^ &complement.upper,
        upper: &max ^ &complement.lower,
        sequential: complement.sequential,
    }
}
