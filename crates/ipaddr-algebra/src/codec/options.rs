//! Rendering options

use crate::kind::AddressKind;
use serde::{Deserialize, Serialize};

/// Options for rendering divisions and groupings as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Radix in `2..=85`
    pub radix: u32,
    /// Upper case letters for radixes up to 36
    pub uppercase: bool,
    /// Minimum digit count, padded with zeros
    pub leading_zero_width: usize,
    /// Pad to the digit count of the largest value of the division's width
    pub expand: bool,
    /// Placed between lower and upper values
    pub range_separator: String,
    /// Rendered in place of a full-range division; empty disables it
    pub wildcard: String,
    /// Render each digit position separately
    pub split_digits: bool,
    /// Placed between digit positions in split-digit mode
    pub split_separator: char,
    /// Least significant digit (or division) first
    pub reverse_digits: bool,
    /// Placed before every rendered value in block mode, e.g. `0x`
    pub prefix: String,
    /// Render in block mode when a range cannot be split by digit
    pub split_fallback: bool,
    /// Placed between divisions when rendering a grouping
    pub division_separator: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            radix: 10,
            uppercase: false,
            leading_zero_width: 0,
            expand: false,
            range_separator: "-".to_string(),
            wildcard: "*".to_string(),
            split_digits: false,
            split_separator: '.',
            reverse_digits: false,
            prefix: String::new(),
            split_fallback: false,
            division_separator: ".".to_string(),
        }
    }
}

impl RenderOptions {
    /// Options for the canonical form of the division at `index` of a kind
    pub fn canonical(kind: AddressKind, index: usize, ipv6_count: usize) -> Self {
        let mut options = Self::default().with_radix(kind.default_radix(index, ipv6_count));
        match kind {
            AddressKind::Mac => {
                options.leading_zero_width = 2;
                options.division_separator = ":".to_string();
            }
            AddressKind::V6 => options.division_separator = ":".to_string(),
            _ => {}
        }
        options
    }

    pub fn with_radix(mut self, radix: u32) -> Self {
        self.radix = radix;
        self
    }

    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    pub fn with_leading_zero_width(mut self, width: usize) -> Self {
        self.leading_zero_width = width;
        self
    }

    pub fn with_expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn with_range_separator(mut self, separator: impl Into<String>) -> Self {
        self.range_separator = separator.into();
        self
    }

    pub fn with_wildcard(mut self, wildcard: impl Into<String>) -> Self {
        self.wildcard = wildcard.into();
        self
    }

    pub fn with_split_digits(mut self, split_digits: bool) -> Self {
        self.split_digits = split_digits;
        self
    }

    pub fn with_split_separator(mut self, separator: char) -> Self {
        self.split_separator = separator;
        self
    }

    pub fn with_reverse_digits(mut self, reverse: bool) -> Self {
        self.reverse_digits = reverse;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_split_fallback(mut self, fallback: bool) -> Self {
        self.split_fallback = fallback;
        self
    }

    pub fn with_division_separator(mut self, separator: impl Into<String>) -> Self {
        self.division_separator = separator.into();
        self
    }
}
