//! Digit rendering for big integers
//!
//! Values wider than 64 bits are split in half by `radix^(digits / 2)` until
//! the halves fit a `u64`, so a value with `n` digits takes `O(log n)` big
//! divisions instead of `n`.

use super::digits;
use super::fixed;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

/// Append the digits of `value` to `out`, padded with zeros to `width`
pub(crate) fn write_big(
    value: &BigUint,
    radix: u32,
    alphabet: &[u8],
    width: usize,
    out: &mut String,
) {
    if let Some(small) = value.to_u64() {
        fixed::write_u64(small, radix, alphabet, width, out);
        return;
    }
    let digit_count = digits::digit_count(value, radix);
    for _ in digit_count..width {
        out.push(char::from(alphabet[0]));
    }
    split(value, radix, alphabet, digit_count, false, out);
}

/// Render `value`, which has at most `digit_count` digits; `pad` renders
/// exactly `digit_count` digits
fn split(
    value: &BigUint,
    radix: u32,
    alphabet: &[u8],
    digit_count: usize,
    pad: bool,
    out: &mut String,
) {
    if let Some(small) = value.to_u64() {
        fixed::write_u64(small, radix, alphabet, if pad { digit_count } else { 0 }, out);
        return;
    }
    let low_count = digit_count / 2;
    let divisor = digits::radix_power(radix, low_count as u32);
    let (high, low) = value.div_rem(&*divisor);
    if pad || !high.is_zero() {
        split(&high, radix, alphabet, digit_count - low_count, pad, out);
        split(&low, radix, alphabet, low_count, true, out);
    } else {
        split(&low, radix, alphabet, low_count, false, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::digits::alphabet;
    use num_traits::One;

    fn render(value: &BigUint, radix: u32, width: usize) -> String {
        let mut out = String::new();
        write_big(value, radix, alphabet(radix, false), width, &mut out);
        out
    }

    #[test]
    fn test_matches_to_str_radix() {
        let values = [
            BigUint::one() << 64u32,
            (BigUint::one() << 128u32) - 1u32,
            BigUint::parse_bytes(b"20010db8000000000000000000000001", 16).unwrap(),
            BigUint::parse_bytes(b"100000000000000000000000000000000000001", 10).unwrap(),
        ];
        for value in &values {
            for radix in [2, 8, 10, 16, 36] {
                assert_eq!(render(value, radix, 0), value.to_str_radix(radix), "radix {radix}");
            }
        }
    }

    #[test]
    fn test_inner_zero_runs_padded() {
        // Low half of zero digits must keep its width.
        let value = BigUint::parse_bytes(b"1000000000000000000000000000000", 10).unwrap();
        assert_eq!(render(&value, 10, 0), "1000000000000000000000000000000");
    }

    #[test]
    fn test_width() {
        let value = BigUint::one() << 100u32;
        let text = render(&value, 16, 40);
        assert_eq!(text.len(), 40);
        assert!(text.starts_with("0000000000000"));
        assert!(text.ends_with(&value.to_str_radix(16)));
    }

    #[test]
    fn test_extended_radix() {
        let value = BigUint::one() << 127u32;
        let text = render(&value, 85, 0);
        let parsed = text.bytes().fold(BigUint::zero(), |acc, b| {
            let digit = alphabet(85, false).iter().position(|&c| c == b).unwrap();
            acc * 85u32 + digit as u32
        });
        assert_eq!(parsed, value);
    }
}
