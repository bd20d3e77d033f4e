//! Digit alphabets and memo tables
//!
//! The digit-count and radix-power tables are process-wide snapshots behind
//! [`ArcSwap`]. Readers load the current map without locking; a miss computes
//! the entry and publishes a copy of the map with the entry added. Entries are
//! only ever added, so a lost race just repeats the computation.

use arc_swap::ArcSwap;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// Smallest supported radix
pub const MIN_RADIX: u32 = 2;
/// Largest supported radix
pub const MAX_RADIX: u32 = 85;

const LOWER_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const UPPER_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// RFC 1924 alphabet
const EXTENDED_DIGITS: &[u8; 85] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!#$%&()*+-;<=>?@^_`{|}~";

type DigitCounts = HashMap<(u32, u32), usize>;
type RadixPowers = HashMap<(u32, u32), Arc<BigUint>>;

static DIGIT_COUNTS: OnceLock<ArcSwap<DigitCounts>> = OnceLock::new();
static RADIX_POWERS: OnceLock<ArcSwap<RadixPowers>> = OnceLock::new();

/// Digit characters for a radix; the RFC 1924 alphabet above 36
pub fn alphabet(radix: u32, uppercase: bool) -> &'static [u8] {
    if radix > 36 {
        EXTENDED_DIGITS
    } else if uppercase {
        UPPER_DIGITS
    } else {
        LOWER_DIGITS
    }
}

fn digit_counts() -> &'static ArcSwap<DigitCounts> {
    DIGIT_COUNTS.get_or_init(|| ArcSwap::from_pointee(HashMap::new()))
}

fn radix_powers() -> &'static ArcSwap<RadixPowers> {
    RADIX_POWERS.get_or_init(|| ArcSwap::from_pointee(HashMap::new()))
}

/// Digits needed for the largest `bit_count`-bit value in `radix`
pub fn max_digit_count(radix: u32, bit_count: u32) -> usize {
    let key = (radix, bit_count);
    let table = digit_counts();
    if let Some(&count) = table.load().get(&key) {
        return count;
    }
    let count = if bit_count == 0 {
        1
    } else {
        let max = (BigUint::one() << bit_count) - 1u32;
        max.to_radix_be(radix).len()
    };
    table.rcu(|current| {
        let mut next = DigitCounts::clone(current);
        next.insert(key, count);
        next
    });
    trace!(radix, bit_count, count, "Published digit count");
    count
}

/// `radix` raised to `exponent`
pub fn radix_power(radix: u32, exponent: u32) -> Arc<BigUint> {
    let key = (radix, exponent);
    let table = radix_powers();
    if let Some(power) = table.load().get(&key) {
        return Arc::clone(power);
    }
    let power = Arc::new(num_traits::pow(BigUint::from(radix), exponent as usize));
    table.rcu(|current| {
        let mut next = RadixPowers::clone(current);
        next.entry(key).or_insert_with(|| Arc::clone(&power));
        next
    });
    trace!(radix, exponent, "Published radix power");
    power
}

/// Number of digits `value` has in `radix`
pub fn digit_count(value: &BigUint, radix: u32) -> usize {
    if value.is_zero() {
        return 1;
    }
    let bits = value.bits() as u32;
    let upper_bound = max_digit_count(radix, bits);
    // A value with `bits` bits has the bound's digit count or one fewer.
    if *value >= *radix_power(radix, upper_bound as u32 - 1) {
        upper_bound
    } else {
        upper_bound - 1
    }
}
