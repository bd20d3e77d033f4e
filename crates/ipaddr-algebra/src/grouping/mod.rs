//! Address sections
//!
//! A [`DivisionGrouping`] is an ordered, immutable sequence of divisions, most
//! significant first, with an optional prefix length counted from the start
//! of the grouping. The grouping prefix is projected onto the divisions as
//! division-local prefix lengths: the division holding the prefix boundary
//! carries the local offset, earlier divisions carry none and later divisions
//! carry zero. Every constructor and derivation re-establishes that projection.

mod derive;

pub use derive::MaskLengths;

use crate::codec::{self, RenderOptions};
use crate::config;
use crate::division::Division;
use crate::kind::{
    AddressKind, IPV4_DIVISION_COUNT, IPV6_BITS_PER_DIVISION, MIXED_IPV6_DIVISION_COUNT,
};
use crate::prefix;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// Lazily computed properties shared by clones of a grouping
#[derive(Debug, Default)]
struct Derived {
    count: OnceLock<BigUint>,
    bytes: OnceLock<Vec<u8>>,
    upper_bytes: OnceLock<Vec<u8>>,
    is_multiple: OnceLock<bool>,
    sequential_block_index: OnceLock<usize>,
}

/// An address section: divisions, prefix length and address kind
#[derive(Debug, Clone)]
pub struct DivisionGrouping {
    divisions: Arc<[Division]>,
    prefix_len: Option<u32>,
    kind: AddressKind,
    derived: Arc<Derived>,
}

impl DivisionGrouping {
    /// Assemble a grouping from divisions
    ///
    /// Division widths and counts are checked against `kind`. When
    /// `prefix_len` is `None` the prefix is taken from the first division that
    /// carries a local prefix, if any. Division-local prefixes are then
    /// rewritten to match the grouping prefix.
    pub fn new(
        divisions: Vec<Division>,
        prefix_len: Option<u32>,
        kind: AddressKind,
    ) -> Result<Self> {
        validate_shape(kind, &divisions)?;
        let bit_count = prefix::total_bit_count(&divisions);
        let prefix_len = prefix_len
            .or_else(|| implied_prefix_len(&divisions))
            .map(|p| config::check_prefix_len(p, bit_count))
            .transpose()?;
        Ok(Self::from_parts(divisions, prefix_len, kind))
    }

    /// Build a grouping of `count` fixed-width divisions from value callbacks
    ///
    /// `lower` and `upper` are called with each division index; pass the same
    /// callback twice for single-valued sections. Division widths come from
    /// `kind`, so untyped sections must be built with [`DivisionGrouping::new`].
    pub fn from_values<L, U>(
        kind: AddressKind,
        count: usize,
        lower: L,
        upper: U,
        prefix_len: Option<u32>,
    ) -> Result<Self>
    where
        L: Fn(usize) -> u64,
        U: Fn(usize) -> u64,
    {
        let ipv6_count = match kind {
            AddressKind::Mixed => count.min(MIXED_IPV6_DIVISION_COUNT),
            _ => 0,
        };
        let mut divisions = Vec::with_capacity(count);
        for index in 0..count {
            let bit_count = kind.expected_bits(index, ipv6_count).ok_or_else(|| {
                Error::NotConvertible(format!("{} sections have no fixed division width", kind))
            })?;
            divisions.push(Division::new(lower(index), upper(index), None, bit_count)?);
        }
        Self::new(divisions, prefix_len, kind)
    }

    /// The adaptive zero-length grouping
    pub fn zero() -> Self {
        Self::empty(AddressKind::Zero)
    }

    /// A zero-length grouping of the given kind
    pub fn empty(kind: AddressKind) -> Self {
        Self::from_parts(Vec::new(), None, kind)
    }

    /// Build from trusted parts, re-deriving division-local prefixes
    pub(crate) fn from_parts(
        divisions: Vec<Division>,
        prefix_len: Option<u32>,
        kind: AddressKind,
    ) -> Self {
        Self {
            divisions: normalize_prefixes(divisions, prefix_len).into(),
            prefix_len,
            kind,
            derived: Arc::default(),
        }
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    /// Division at `index`
    pub fn division(&self, index: usize) -> Result<&Division> {
        self.divisions.get(index).ok_or(Error::IndexOutOfRange {
            index,
            count: self.divisions.len(),
        })
    }

    pub fn division_count(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }

    pub fn bit_count(&self) -> u32 {
        prefix::total_bit_count(&self.divisions)
    }

    pub fn byte_count(&self) -> usize {
        (self.bit_count() as usize + 7) / 8
    }

    /// Grouping prefix length
    pub fn prefix_len(&self) -> Option<u32> {
        self.prefix_len
    }

    pub fn is_prefixed(&self) -> bool {
        self.prefix_len.is_some()
    }

    /// Whether both share the same division storage and prefix
    pub fn ptr_eq(&self, other: &DivisionGrouping) -> bool {
        Arc::ptr_eq(&self.divisions, &other.divisions) && self.prefix_len == other.prefix_len
    }

    /// Number of IPv6 divisions ahead of the IPv4 part of a mixed section
    pub(crate) fn ipv6_division_count(&self) -> usize {
        ipv6_division_count(self.kind, &self.divisions)
    }

    /// Number of distinct values; zero for an empty grouping
    pub fn count(&self) -> BigUint {
        self.derived
            .count
            .get_or_init(|| {
                if self.divisions.is_empty() {
                    return BigUint::zero();
                }
                self.divisions
                    .iter()
                    .fold(BigUint::one(), |acc, division| acc * division.count())
            })
            .clone()
    }

    pub fn is_multiple(&self) -> bool {
        *self
            .derived
            .is_multiple
            .get_or_init(|| self.divisions.iter().any(Division::is_multiple))
    }

    /// Lowest value as a single integer
    pub fn value(&self) -> BigUint {
        self.divisions.iter().fold(BigUint::zero(), |acc, division| {
            (acc << division.bit_count()) | division.lower_value()
        })
    }

    /// Highest value as a single integer
    pub fn upper_value(&self) -> BigUint {
        self.divisions.iter().fold(BigUint::zero(), |acc, division| {
            (acc << division.bit_count()) | division.upper_value()
        })
    }

    /// Big-endian bytes of the lowest value
    pub fn bytes(&self) -> &[u8] {
        self.derived
            .bytes
            .get_or_init(|| self.pack(Division::bytes, Self::value))
    }

    /// Big-endian bytes of the highest value
    pub fn upper_bytes(&self) -> &[u8] {
        self.derived
            .upper_bytes
            .get_or_init(|| self.pack(Division::upper_bytes, Self::upper_value))
    }

    fn pack(&self, bytes: fn(&Division) -> Vec<u8>, value: fn(&Self) -> BigUint) -> Vec<u8> {
        if self.divisions.iter().all(|d| d.bit_count() % 8 == 0) {
            return self.divisions.iter().flat_map(bytes).collect();
        }
        let value = value(self);
        let raw = if value.is_zero() {
            Vec::new()
        } else {
            value.to_bytes_be()
        };
        let mut packed = vec![0u8; self.byte_count() - raw.len()];
        packed.extend_from_slice(&raw);
        packed
    }

    pub fn is_zero(&self) -> bool {
        self.divisions.iter().all(Division::is_zero)
    }

    pub fn includes_zero(&self) -> bool {
        self.divisions.iter().all(Division::includes_zero)
    }

    pub fn is_max(&self) -> bool {
        self.divisions.iter().all(Division::is_max)
    }

    pub fn includes_max(&self) -> bool {
        self.divisions.iter().all(Division::includes_max)
    }

    pub fn is_full_range(&self) -> bool {
        self.divisions.iter().all(Division::is_full_range)
    }

    /// Index of the first division of the trailing sequential block
    ///
    /// Every division after the returned index is full range. The values of
    /// the grouping form one contiguous run when no division before the index
    /// is multiple.
    pub fn sequential_block_index(&self) -> usize {
        *self.derived.sequential_block_index.get_or_init(|| {
            let mut index = self.divisions.len().saturating_sub(1);
            while index > 0 && self.divisions[index].is_full_range() {
                index -= 1;
            }
            index
        })
    }

    /// Number of values in the trailing sequential block
    pub fn sequential_block_count(&self) -> BigUint {
        if self.divisions.is_empty() {
            return BigUint::zero();
        }
        self.divisions[self.sequential_block_index()..]
            .iter()
            .fold(BigUint::one(), |acc, division| acc * division.count())
    }

    /// Whether the values form one contiguous run
    pub fn is_sequential(&self) -> bool {
        !self.divisions[..self.sequential_block_index()]
            .iter()
            .any(Division::is_multiple)
    }

    fn clamp(&self, prefix_len: u32) -> u32 {
        prefix_len.min(self.bit_count())
    }

    /// Whether the values include every block of the prefix length
    pub fn contains_prefix_block(&self, prefix_len: u32) -> bool {
        prefix::divisions_contain_prefix_block(&self.divisions, self.clamp(prefix_len))
    }

    /// Whether the values are exactly one block of the prefix length
    pub fn contains_single_prefix_block(&self, prefix_len: u32) -> bool {
        prefix::divisions_contain_single_prefix_block(&self.divisions, self.clamp(prefix_len))
    }

    /// Shortest prefix length whose blocks the values are made of
    pub fn min_prefix_len_for_block(&self) -> u32 {
        prefix::divisions_min_prefix_len_for_block(&self.divisions)
    }

    /// Prefix length of the single block the values form, if they form one
    pub fn prefix_len_for_single_block(&self) -> Option<u32> {
        prefix::divisions_prefix_len_for_single_block(&self.divisions)
    }

    /// Number of distinct prefixes of the given length
    pub fn prefix_count_len(&self, prefix_len: u32) -> BigUint {
        prefix::divisions_prefix_count(&self.divisions, self.clamp(prefix_len))
    }

    /// Number of distinct prefixes of the grouping's own prefix length, or
    /// the value count when there is no prefix
    pub fn prefix_count(&self) -> BigUint {
        match self.prefix_len {
            Some(p) => self.prefix_count_len(p),
            None => self.count(),
        }
    }

    pub fn is_prefix_block(&self) -> bool {
        self.prefix_len
            .map_or(false, |p| self.contains_prefix_block(p))
    }

    pub fn is_single_prefix_block(&self) -> bool {
        self.prefix_len
            .map_or(false, |p| self.contains_single_prefix_block(p))
    }

    fn same_shape(&self, other: &DivisionGrouping) -> bool {
        self.divisions.len() == other.divisions.len()
            && self
                .divisions
                .iter()
                .zip(other.divisions.iter())
                .all(|(a, b)| a.bit_count() == b.bit_count())
    }

    /// Whether every value of `other` is a value of this grouping
    pub fn contains(&self, other: &DivisionGrouping) -> bool {
        self.same_shape(other)
            && self
                .divisions
                .iter()
                .zip(other.divisions.iter())
                .all(|(a, b)| a.contains(b))
    }

    /// Whether the groupings share a value
    pub fn overlaps(&self, other: &DivisionGrouping) -> bool {
        self.same_shape(other)
            && self
                .divisions
                .iter()
                .zip(other.divisions.iter())
                .all(|(a, b)| a.overlaps(b))
    }

    /// Render every division with `options`, joined by the division separator
    pub fn render(&self, options: &RenderOptions) -> Result<String> {
        let mut parts = self
            .divisions
            .iter()
            .map(|division| codec::render_division(division, options))
            .collect::<Result<Vec<_>>>()?;
        if options.reverse_digits {
            parts.reverse();
        }
        Ok(parts.join(&options.division_separator))
    }

    /// Canonical text for the kind, without the prefix suffix
    fn canonical_string(&self) -> Result<String> {
        let ipv6_count = self.ipv6_division_count();
        let mut text = String::new();
        for (index, division) in self.divisions.iter().enumerate() {
            if index > 0 {
                text.push(match self.kind {
                    AddressKind::V6 | AddressKind::Mac => ':',
                    AddressKind::Mixed if index <= ipv6_count => ':',
                    _ => '.',
                });
            }
            let options = RenderOptions::canonical(self.kind, index, ipv6_count);
            text.push_str(&codec::render_division(division, &options)?);
        }
        Ok(text)
    }
}

impl Default for DivisionGrouping {
    fn default() -> Self {
        Self::zero()
    }
}

/// Division-local prefix length for a division starting at bit `start`
pub(crate) fn local_prefix_len(prefix_len: Option<u32>, start: u32, bit_count: u32) -> Option<u32> {
    let p = prefix_len?;
    if p <= start {
        Some(0)
    } else if p - start <= bit_count {
        Some(p - start)
    } else {
        None
    }
}

fn normalize_prefixes(mut divisions: Vec<Division>, prefix_len: Option<u32>) -> Vec<Division> {
    let mut start = 0;
    for division in divisions.iter_mut() {
        let bit_count = division.bit_count();
        let local = local_prefix_len(prefix_len, start, bit_count);
        if division.prefix_len() != local {
            *division = division.with_local_prefix(local);
        }
        start += bit_count;
    }
    divisions
}

fn implied_prefix_len(divisions: &[Division]) -> Option<u32> {
    let mut start = 0;
    for division in divisions {
        if let Some(local) = division.prefix_len() {
            return Some(start + local);
        }
        start += division.bit_count();
    }
    None
}

fn ipv6_division_count(kind: AddressKind, divisions: &[Division]) -> usize {
    if kind != AddressKind::Mixed {
        return 0;
    }
    divisions
        .iter()
        .take(MIXED_IPV6_DIVISION_COUNT)
        .take_while(|d| d.bit_count() == IPV6_BITS_PER_DIVISION)
        .count()
}

fn validate_shape(kind: AddressKind, divisions: &[Division]) -> Result<()> {
    divisions.iter().try_fold(0u32, |total, division| {
        total
            .checked_add(division.bit_count())
            .ok_or(Error::InvalidBitCount(division.bit_count()))
    })?;
    match kind {
        AddressKind::Untyped => return Ok(()),
        AddressKind::Zero if !divisions.is_empty() => {
            return Err(Error::SizeMismatch {
                expected: 0,
                actual: divisions.len(),
            })
        }
        _ => {}
    }
    if let Some(max) = kind.max_division_count() {
        if divisions.len() > max {
            return Err(Error::TooManyDivisions {
                kind,
                max,
                actual: divisions.len(),
            });
        }
    }
    let ipv6_count = ipv6_division_count(kind, divisions);
    if kind == AddressKind::Mixed && divisions.len() - ipv6_count > IPV4_DIVISION_COUNT {
        return Err(Error::TooManyDivisions {
            kind,
            max: ipv6_count + IPV4_DIVISION_COUNT,
            actual: divisions.len(),
        });
    }
    for (index, division) in divisions.iter().enumerate() {
        if let Some(expected) = kind.expected_bits(index, ipv6_count) {
            if division.bit_count() != expected {
                return Err(Error::DivisionWidthMismatch {
                    kind,
                    index,
                    expected,
                    actual: division.bit_count(),
                });
            }
        }
    }
    Ok(())
}

impl PartialEq for DivisionGrouping {
    /// The adaptive zero grouping equals every zero-length grouping; otherwise
    /// kinds, prefixes and divisions must all match.
    fn eq(&self, other: &Self) -> bool {
        if self.kind == AddressKind::Zero || other.kind == AddressKind::Zero {
            return self.divisions.is_empty() && other.divisions.is_empty();
        }
        self.kind == other.kind
            && self.prefix_len == other.prefix_len
            && (Arc::ptr_eq(&self.divisions, &other.divisions) || self.divisions == other.divisions)
    }
}

impl Hash for DivisionGrouping {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // The kind is left out so the adaptive zero hashes like any other
        // empty grouping.
        self.divisions.len().hash(state);
        if self.divisions.is_empty() {
            return;
        }
        self.prefix_len.hash(state);
        for division in self.divisions.iter() {
            division.hash(state);
        }
    }
}

impl fmt::Display for DivisionGrouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.canonical_string().map_err(|_| fmt::Error)?;
        f.write_str(&text)?;
        if let Some(p) = self.prefix_len {
            write!(f, "/{}", p)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::IPV4_BITS_PER_DIVISION;

    fn ipv4(ranges: [(u64, u64); 4], prefix_len: Option<u32>) -> DivisionGrouping {
        DivisionGrouping::from_values(
            AddressKind::V4,
            4,
            |i| ranges[i].0,
            |i| ranges[i].1,
            prefix_len,
        )
        .unwrap()
    }

    #[test]
    fn test_prefix_projection() {
        let grouping = ipv4([(10, 10), (1, 1), (0, 255), (0, 255)], Some(12));
        let locals: Vec<_> = grouping.divisions().iter().map(Division::prefix_len).collect();
        assert_eq!(locals, vec![None, Some(4), Some(0), Some(0)]);

        let at_boundary = ipv4([(10, 10), (1, 1), (0, 0), (0, 0)], Some(8));
        let locals: Vec<_> = at_boundary.divisions().iter().map(Division::prefix_len).collect();
        assert_eq!(locals, vec![Some(8), Some(0), Some(0), Some(0)]);
    }

    #[test]
    fn test_implied_prefix() {
        let divisions = vec![
            Division::single(192, 8).unwrap(),
            Division::new(168, 168, Some(0), 8).unwrap(),
        ];
        let grouping = DivisionGrouping::new(divisions, None, AddressKind::V4).unwrap();
        assert_eq!(grouping.prefix_len(), Some(8));
    }

    #[test]
    fn test_shape_validation() {
        let wide = vec![Division::single(1, 16).unwrap()];
        assert!(matches!(
            DivisionGrouping::new(wide, None, AddressKind::V4),
            Err(Error::DivisionWidthMismatch { index: 0, expected: 8, actual: 16, .. })
        ));

        let five = (0..5)
            .map(|_| Division::single(0, IPV4_BITS_PER_DIVISION).unwrap())
            .collect();
        assert!(matches!(
            DivisionGrouping::new(five, None, AddressKind::V4),
            Err(Error::TooManyDivisions { max: 4, actual: 5, .. })
        ));

        let one = vec![Division::single(0, 8).unwrap()];
        assert!(matches!(
            DivisionGrouping::new(one, None, AddressKind::Zero),
            Err(Error::SizeMismatch { expected: 0, actual: 1 })
        ));

        let too_long = vec![Division::single(0, 8).unwrap()];
        assert!(matches!(
            DivisionGrouping::new(too_long, Some(9), AddressKind::V4),
            Err(Error::PrefixLenOutOfRange { prefix_len: 9, bit_count: 8 })
        ));
    }

    #[test]
    fn test_total_width_overflow() {
        let huge = u32::MAX / 2 + 1;
        let divisions = vec![
            Division::new_large(BigUint::zero(), BigUint::zero(), None, huge).unwrap(),
            Division::new_large(BigUint::zero(), BigUint::zero(), None, huge).unwrap(),
        ];
        assert!(matches!(
            DivisionGrouping::new(divisions, None, AddressKind::Untyped),
            Err(Error::InvalidBitCount(bits)) if bits == huge
        ));
    }

    #[test]
    fn test_mixed_shape() {
        let mut divisions: Vec<Division> =
            (0..6).map(|_| Division::single(0, 16).unwrap()).collect();
        divisions.extend((0..4).map(|i| Division::single(i, 8).unwrap()));
        let grouping = DivisionGrouping::new(divisions.clone(), None, AddressKind::Mixed).unwrap();
        assert_eq!(grouping.ipv6_division_count(), 6);
        assert_eq!(grouping.bit_count(), 128);

        divisions.push(Division::single(0, 8).unwrap());
        assert!(DivisionGrouping::new(divisions, None, AddressKind::Mixed).is_err());
    }

    #[test]
    fn test_index_out_of_range() {
        let grouping = ipv4([(1, 1); 4], None);
        assert!(grouping.division(3).is_ok());
        assert_eq!(
            grouping.division(4).unwrap_err(),
            Error::IndexOutOfRange { index: 4, count: 4 }
        );
    }

    #[test]
    fn test_count_and_bytes() {
        let grouping = ipv4([(10, 10), (0, 1), (2, 4), (0, 255)], None);
        assert_eq!(grouping.count(), BigUint::from(2u32 * 3 * 256));
        assert!(grouping.is_multiple());
        assert_eq!(grouping.bytes(), &[10, 0, 2, 0]);
        assert_eq!(grouping.upper_bytes(), &[10, 1, 4, 255]);
        assert_eq!(grouping.value(), BigUint::from(0x0a00_0200u32));

        assert_eq!(DivisionGrouping::zero().count(), BigUint::zero());
        assert!(DivisionGrouping::zero().bytes().is_empty());
    }

    #[test]
    fn test_bytes_unaligned_widths() {
        let divisions = vec![
            Division::single(0b1, 1).unwrap(),
            Division::single(0b101, 3).unwrap(),
            Division::single(0xab, 8).unwrap(),
        ];
        let grouping = DivisionGrouping::new(divisions, None, AddressKind::Untyped).unwrap();
        assert_eq!(grouping.byte_count(), 2);
        assert_eq!(grouping.bytes(), &[0x0d, 0xab]);
    }

    #[test]
    fn test_sequential_block() {
        let grouping = ipv4([(10, 10), (1, 1), (0, 255), (0, 255)], None);
        assert_eq!(grouping.sequential_block_index(), 1);
        assert!(grouping.is_sequential());
        assert_eq!(grouping.sequential_block_count(), BigUint::from(65536u32));

        let split = ipv4([(10, 11), (1, 2), (0, 255), (0, 255)], None);
        assert_eq!(split.sequential_block_index(), 1);
        assert!(!split.is_sequential());

        let full = ipv4([(0, 255); 4], None);
        assert_eq!(full.sequential_block_index(), 0);
        assert!(full.is_sequential());
    }

    #[test]
    fn test_prefix_queries() {
        let grouping = ipv4([(10, 10), (0, 255), (0, 255), (0, 255)], None);
        assert_eq!(grouping.min_prefix_len_for_block(), 8);
        assert_eq!(grouping.prefix_len_for_single_block(), Some(8));
        assert!(grouping.contains_prefix_block(8));
        assert!(!grouping.contains_prefix_block(7));
        assert!(grouping.contains_prefix_block(40));
        assert_eq!(grouping.prefix_count_len(16), BigUint::from(256u32));

        let prefixed = ipv4([(10, 10), (0, 255), (0, 255), (0, 255)], Some(8));
        assert!(prefixed.is_prefix_block());
        assert!(prefixed.is_single_prefix_block());
        assert_eq!(prefixed.prefix_count(), BigUint::one());
    }

    #[test]
    fn test_containment() {
        let block = ipv4([(10, 10), (0, 255), (0, 255), (0, 255)], None);
        let host = ipv4([(10, 10), (1, 1), (2, 2), (3, 3)], None);
        assert!(block.contains(&host));
        assert!(!host.contains(&block));
        assert!(block.overlaps(&host));
        let other = ipv4([(11, 11), (1, 1), (2, 2), (3, 3)], None);
        assert!(!block.overlaps(&other));
    }

    #[test]
    fn test_adaptive_zero_equality() {
        let zero = DivisionGrouping::zero();
        let empty_v4 = DivisionGrouping::empty(AddressKind::V4);
        let empty_v6 = DivisionGrouping::empty(AddressKind::V6);
        assert_eq!(zero, empty_v4);
        assert_eq!(empty_v6, zero);
        assert_ne!(empty_v4, empty_v6);
        assert_ne!(zero, ipv4([(0, 0); 4], None));
    }

    #[test]
    fn test_display() {
        let grouping = ipv4([(10, 10), (1, 2), (0, 255), (7, 7)], Some(16));
        assert_eq!(grouping.to_string(), "10.1-2.*.7/16");

        let v6 = DivisionGrouping::from_values(
            AddressKind::V6,
            8,
            |i| if i == 0 { 0xfe80 } else { 0 },
            |i| if i == 0 { 0xfe80 } else { 0 },
            None,
        )
        .unwrap();
        assert_eq!(v6.to_string(), "fe80:0:0:0:0:0:0:0");

        let mac = DivisionGrouping::from_values(AddressKind::Mac, 6, |i| i as u64, |i| i as u64, None)
            .unwrap();
        assert_eq!(mac.to_string(), "00:01:02:03:04:05");

        let mixed = DivisionGrouping::from_values(
            AddressKind::Mixed,
            10,
            |i| if i < 6 { 0 } else { i as u64 },
            |i| if i < 6 { 0 } else { i as u64 },
            None,
        )
        .unwrap();
        assert_eq!(mixed.to_string(), "0:0:0:0:0:0:6.7.8.9");
    }

    #[test]
    fn test_render_with_options() {
        let grouping = ipv4([(192, 192), (168, 168), (0, 0), (1, 1)], None);
        let options = RenderOptions::default()
            .with_radix(16)
            .with_leading_zero_width(2)
            .with_division_separator("");
        assert_eq!(grouping.render(&options).unwrap(), "c0a80001");

        let reversed = RenderOptions::default().with_reverse_digits(true);
        assert_eq!(grouping.render(&reversed).unwrap(), "1.0.168.192");
    }
}
