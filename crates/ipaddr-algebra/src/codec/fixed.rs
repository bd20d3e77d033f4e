//! Digit rendering for native integers

/// Enough for a `u64` in radix 2
const MAX_DIGITS: usize = 64;

/// Append the digits of `value` to `out`, padded with zeros to `width`
pub(crate) fn write_u64(value: u64, radix: u32, alphabet: &[u8], width: usize, out: &mut String) {
    let mut buf = [0u8; MAX_DIGITS];
    let mut pos = MAX_DIGITS;
    match radix {
        2 | 8 | 16 => {
            let shift = radix.trailing_zeros();
            let mask = u64::from(radix - 1);
            let mut rest = value;
            loop {
                pos -= 1;
                buf[pos] = alphabet[(rest & mask) as usize];
                rest >>= shift;
                if rest == 0 {
                    break;
                }
            }
        }
        10 => {
            let mut rest = value;
            loop {
                pos -= 1;
                buf[pos] = alphabet[(rest % 10) as usize];
                rest /= 10;
                if rest == 0 {
                    break;
                }
            }
        }
        _ => {
            let radix = u64::from(radix);
            let mut rest = value;
            loop {
                pos -= 1;
                buf[pos] = alphabet[(rest % radix) as usize];
                rest /= radix;
                if rest == 0 {
                    break;
                }
            }
        }
    }
    let digits = MAX_DIGITS - pos;
    for _ in digits..width {
        out.push(char::from(alphabet[0]));
    }
    out.extend(buf[pos..].iter().map(|&b| char::from(b)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::digits::alphabet;

    fn render(value: u64, radix: u32, width: usize) -> String {
        let mut out = String::new();
        write_u64(value, radix, alphabet(radix, false), width, &mut out);
        out
    }

    #[test]
    fn test_fast_paths() {
        assert_eq!(render(0, 2, 0), "0");
        assert_eq!(render(5, 2, 0), "101");
        assert_eq!(render(0o755, 8, 0), "755");
        assert_eq!(render(0xfe80, 16, 0), "fe80");
        assert_eq!(render(255, 10, 0), "255");
        assert_eq!(render(u64::MAX, 2, 0).len(), 64);
        assert_eq!(render(u64::MAX, 10, 0), u64::MAX.to_string());
    }

    #[test]
    fn test_generic_radix() {
        assert_eq!(render(35, 36, 0), "z");
        assert_eq!(render(80, 3, 0), "2222");
        let mut out = String::new();
        write_u64(84, 85, alphabet(85, false), 0, &mut out);
        assert_eq!(out, "~");
    }

    #[test]
    fn test_padding() {
        assert_eq!(render(7, 16, 2), "07");
        assert_eq!(render(0x123, 16, 2), "123");
        assert_eq!(render(0, 10, 3), "000");
    }
}
