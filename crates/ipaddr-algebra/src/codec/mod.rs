//! Numeric string codec
//!
//! Renders divisions as text in any radix from 2 to 85. `u64` values take
//! the shift-and-mask paths for radix 2, 8 and 16 and a constant-divisor
//! path for radix 10; wider values are split recursively by radix powers.
//! Ranges render either as `lower-upper` blocks (a wildcard for full-range
//! divisions) or digit by digit.

pub mod digits;
mod fixed;
mod large;
mod options;
mod split;

pub use options::RenderOptions;

use crate::division::Division;
use crate::{Error, Result};
use num_bigint::BigUint;
use tracing::debug;

/// One bound of a division being rendered
#[derive(Clone, Copy)]
enum Bound<'a> {
    Fixed(u64),
    Large(&'a BigUint),
}

impl Bound<'_> {
    fn write(self, radix: u32, alphabet: &[u8], width: usize, out: &mut String) {
        match self {
            Bound::Fixed(value) => fixed::write_u64(value, radix, alphabet, width, out),
            Bound::Large(value) => large::write_big(value, radix, alphabet, width, out),
        }
    }

    fn digits(self, radix: u32, alphabet: &[u8], width: usize) -> String {
        let mut out = String::new();
        self.write(radix, alphabet, width, &mut out);
        out
    }
}

fn check_radix(radix: u32) -> Result<()> {
    if (digits::MIN_RADIX..=digits::MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(Error::InvalidRadix(radix))
    }
}

/// Render a division
///
/// Fails with `InvalidRadix` for a radix outside `2..=85`, and with
/// `IncompatibleRange` when split-digit rendering is requested for a range
/// that cannot be split and `split_fallback` is off. A full-range division
/// only splits when its size is a power of the radix: `0-255` splits in hex
/// but not in decimal.
pub fn render_division(division: &Division, options: &RenderOptions) -> Result<String> {
    match division {
        Division::Fixed(value) => render_bounds(
            Bound::Fixed(value.lower()),
            Bound::Fixed(value.upper()),
            value.is_multiple(),
            value.is_full_range(),
            value.bit_count(),
            options,
        ),
        Division::Large(value) => render_bounds(
            Bound::Large(value.lower()),
            Bound::Large(value.upper()),
            value.is_multiple(),
            value.is_full_range(),
            value.bit_count(),
            options,
        ),
    }
}

/// Render the range `[lower, upper]` of `bit_count`-bit values
pub fn render_range(
    lower: &BigUint,
    upper: &BigUint,
    bit_count: u32,
    options: &RenderOptions,
) -> Result<String> {
    let division = Division::from_big(lower, upper, None, bit_count)?;
    render_division(&division, options)
}

fn render_bounds(
    lower: Bound<'_>,
    upper: Bound<'_>,
    multiple: bool,
    full_range: bool,
    bit_count: u32,
    options: &RenderOptions,
) -> Result<String> {
    check_radix(options.radix)?;
    let radix = options.radix;
    let alphabet = digits::alphabet(radix, options.uppercase);
    let width = if options.expand {
        options
            .leading_zero_width
            .max(digits::max_digit_count(radix, bit_count))
    } else {
        options.leading_zero_width
    };

    if options.split_digits {
        let upper_digits = upper.digits(radix, alphabet, width);
        let lower_digits = lower.digits(radix, alphabet, upper_digits.len());
        match split::render(&lower_digits, &upper_digits, alphabet, radix, options) {
            Ok(text) => return Ok(text),
            Err(_) if options.split_fallback => {
                debug!(
                    radix,
                    lower = %lower_digits,
                    upper = %upper_digits,
                    "Range cannot be split by digit, rendering as a block"
                );
            }
            Err(err) => return Err(err),
        }
    }

    if multiple && full_range && !options.wildcard.is_empty() {
        return Ok(options.wildcard.clone());
    }
    let mut out = String::new();
    out.push_str(&options.prefix);
    lower.write(radix, alphabet, width, &mut out);
    if multiple {
        out.push_str(&options.range_separator);
        out.push_str(&options.prefix);
        upper.write(radix, alphabet, width, &mut out);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn div(lower: u64, upper: u64, bits: u32) -> Division {
        Division::new(lower, upper, None, bits).unwrap()
    }

    #[test]
    fn test_block_mode() {
        let options = RenderOptions::default();
        assert_eq!(render_division(&div(7, 7, 8), &options).unwrap(), "7");
        assert_eq!(render_division(&div(1, 5, 8), &options).unwrap(), "1-5");
        assert_eq!(render_division(&div(0, 255, 8), &options).unwrap(), "*");

        let no_wildcard = options.clone().with_wildcard("");
        assert_eq!(render_division(&div(0, 255, 8), &no_wildcard).unwrap(), "0-255");
    }

    #[test]
    fn test_radix_case_and_prefix() {
        let options = RenderOptions::default()
            .with_radix(16)
            .with_uppercase(true)
            .with_prefix("0x");
        assert_eq!(render_division(&div(0xab, 0xcd, 8), &options).unwrap(), "0xAB-0xCD");
    }

    #[test]
    fn test_expand_and_width() {
        let expand = RenderOptions::default().with_radix(16).with_expand(true);
        assert_eq!(render_division(&div(0xa, 0xa, 16), &expand).unwrap(), "000a");
        let width = RenderOptions::default().with_leading_zero_width(3);
        assert_eq!(render_division(&div(7, 42, 8), &width).unwrap(), "007-042");
    }

    #[test]
    fn test_invalid_radix() {
        for radix in [0, 1, 86] {
            let options = RenderOptions::default().with_radix(radix);
            assert_eq!(
                render_division(&div(1, 1, 8), &options).unwrap_err(),
                Error::InvalidRadix(radix)
            );
        }
    }

    #[test]
    fn test_split_mode() {
        let options = RenderOptions::default().with_split_digits(true);
        assert_eq!(render_division(&div(120, 129, 8), &options).unwrap(), "1.2.*");

        let err = render_division(&div(456, 789, 10), &options).unwrap_err();
        assert!(err.is_incompatible_range());

        let fallback = options.clone().with_split_fallback(true);
        assert_eq!(render_division(&div(456, 789, 10), &fallback).unwrap(), "456-789");
    }

    #[test]
    fn test_split_full_range_needs_power_of_radix() {
        let decimal = RenderOptions::default().with_split_digits(true);
        let err = render_division(&div(0, 255, 8), &decimal).unwrap_err();
        assert!(err.is_incompatible_range());

        let fallback = decimal.clone().with_split_fallback(true);
        assert_eq!(render_division(&div(0, 255, 8), &fallback).unwrap(), "*");

        let hex = RenderOptions::default().with_radix(16).with_split_digits(true);
        assert_eq!(render_division(&div(0, 255, 8), &hex).unwrap(), "*.*");
    }

    #[test]
    fn test_split_reverse_nibbles() {
        let options = RenderOptions::default()
            .with_radix(16)
            .with_split_digits(true)
            .with_reverse_digits(true)
            .with_expand(true);
        assert_eq!(render_division(&div(0x0db8, 0x0db8, 16), &options).unwrap(), "8.b.d.0");
        assert_eq!(render_division(&div(0x1200, 0x12ff, 16), &options).unwrap(), "*.*.2.1");
    }

    #[test]
    fn test_large_division() {
        let upper = (BigUint::one() << 128u32) - 1u32;
        let division = Division::new_large(BigUint::from(0u32), upper, None, 128).unwrap();
        let options = RenderOptions::default().with_radix(16).with_wildcard("");
        let text = render_division(&division, &options).unwrap();
        assert_eq!(text, format!("0-{}", "f".repeat(32)));

        let text = render_range(&BigUint::from(255u32), &BigUint::from(255u32), 96, &options)
            .unwrap();
        assert_eq!(text, "ff");
    }
}
