//! Split-digit rendering
//!
//! A range renders digit by digit when it is the product of per-position
//! digit ranges. Scanning from the least significant position, positions
//! spanning every digit come first, then at most one position holding a
//! sub-range, then positions holding a single digit. Anything else, such as
//! decimal `456-789`, cannot be written this way. Neither can a full range
//! whose size is not a power of the radix, such as decimal `0-255`.

use super::RenderOptions;
use crate::{Error, Result};

enum Scan {
    /// Every position so far spans all digits
    Full,
    /// A sub-range or single digit has been seen
    Fixed,
}

/// Render equal-length digit strings of `lower` and `upper` position by
/// position
pub(crate) fn render(
    lower: &str,
    upper: &str,
    alphabet: &[u8],
    radix: u32,
    options: &RenderOptions,
) -> Result<String> {
    debug_assert_eq!(lower.len(), upper.len());
    let zero = alphabet[0];
    let top = alphabet[radix as usize - 1];
    let mut positions = Vec::with_capacity(lower.len());
    let mut scan = Scan::Full;
    for (&l, &u) in lower.as_bytes().iter().zip(upper.as_bytes()).rev() {
        match scan {
            Scan::Full if l == zero && u == top && !options.wildcard.is_empty() => {
                positions.push(options.wildcard.clone());
            }
            Scan::Full if l == zero && u == top => {
                positions.push(digit_range(l, u, options));
            }
            Scan::Full => {
                positions.push(if l == u {
                    char::from(l).to_string()
                } else {
                    digit_range(l, u, options)
                });
                scan = Scan::Fixed;
            }
            Scan::Fixed if l == u => positions.push(char::from(l).to_string()),
            Scan::Fixed => return Err(Error::incompatible("split by digit", lower, upper)),
        }
    }
    if !options.reverse_digits {
        positions.reverse();
    }
    let mut buf = [0u8; 4];
    let separator: &str = options.split_separator.encode_utf8(&mut buf);
    Ok(positions.join(separator))
}

fn digit_range(lower: u8, upper: u8, options: &RenderOptions) -> String {
    format!(
        "{}{}{}",
        char::from(lower),
        options.range_separator,
        char::from(upper)
    )
}
