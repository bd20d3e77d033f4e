//! Section derivations
//!
//! Network and host sections, zero-host and max-host forms, masking, prefix
//! blocks and subnet mask detection. Every derivation returns a new grouping
//! (or a clone sharing the original's storage when nothing changes) whose
//! division-local prefixes agree with its grouping prefix.

use super::{local_prefix_len, DivisionGrouping};
use crate::config;
use crate::division::Division;
use crate::kind::AddressKind;
use crate::prefix;
use crate::{Error, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Prefix lengths implied by a grouping used as a mask
///
/// `network_len` is set when the grouping is a network mask (ones then
/// zeros), `host_len` when it is a host mask (zeros then ones). An all-zero or
/// all-ones grouping is both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MaskLengths {
    pub network_len: Option<u32>,
    pub host_len: Option<u32>,
}

impl DivisionGrouping {
    /// Divisions up to and including the one holding bit `prefix_len - 1`,
    /// with the boundary division expanded to its prefix blocks
    pub fn network_section_len(&self, prefix_len: u32) -> Result<DivisionGrouping> {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count())?;
        let mut divisions = Vec::new();
        let mut start = 0;
        for division in self.divisions.iter() {
            if start >= prefix_len {
                break;
            }
            let bit_count = division.bit_count();
            let local = prefix_len - start;
            if local < bit_count {
                divisions.push(division.to_prefix_block_local(local));
            } else {
                divisions.push(division.clone());
            }
            start += bit_count;
        }
        let unchanged = self.prefix_len == Some(prefix_len)
            && divisions.len() == self.divisions.len()
            && divisions
                .last()
                .zip(self.divisions.last())
                .map_or(true, |(new, old)| new == old);
        if unchanged {
            return Ok(self.clone());
        }
        Ok(DivisionGrouping::from_parts(
            divisions,
            Some(prefix_len),
            self.kind,
        ))
    }

    /// Network section for the grouping's own prefix; the whole grouping when
    /// there is no prefix
    pub fn network_section(&self) -> Result<DivisionGrouping> {
        match self.prefix_len {
            Some(p) => self.network_section_len(p),
            None => Ok(self.clone()),
        }
    }

    /// Divisions from the one holding bit `prefix_len` onward, with the network
    /// bits of the boundary division masked off
    ///
    /// The result's prefix is the boundary's local offset, so every division
    /// after the boundary carries prefix 0.
    pub fn host_section_len(&self, prefix_len: u32) -> Result<DivisionGrouping> {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count())?;
        let Some((index, local)) = prefix::locate_prefix(&self.divisions, prefix_len) else {
            return Ok(DivisionGrouping::empty(self.kind));
        };
        let mut divisions = Vec::with_capacity(self.divisions.len() - index);
        divisions.push(if local == 0 {
            self.divisions[index].clone()
        } else {
            self.divisions[index].to_host_local(local)
        });
        divisions.extend(self.divisions[index + 1..].iter().cloned());
        Ok(DivisionGrouping::from_parts(divisions, Some(local), self.kind))
    }

    /// Host section for the grouping's own prefix; empty when there is no
    /// prefix
    pub fn host_section(&self) -> Result<DivisionGrouping> {
        match self.prefix_len {
            Some(p) => self.host_section_len(p),
            None => Ok(DivisionGrouping::empty(self.kind)),
        }
    }

    /// Zero every bit after `prefix_len`
    ///
    /// Fails with `IncompatibleRange` when the boundary division's masked
    /// values are not contiguous. The result keeps the grouping's prefix when
    /// it equals `prefix_len` and has none otherwise.
    pub fn zero_host_len(&self, prefix_len: u32) -> Result<DivisionGrouping> {
        self.replace_host(prefix_len, "zero-host", |division, local| {
            if local == 0 {
                Ok(division.zeroed(None))
            } else {
                division.zero_host_local(local, None)
            }
        })
    }

    /// Zero-host form for the grouping's own prefix, or the zero value when
    /// there is no prefix
    pub fn to_zero_host(&self) -> Result<DivisionGrouping> {
        self.zero_host_len(self.prefix_len.unwrap_or(0))
    }

    /// Set every bit after `prefix_len`
    pub fn max_host_len(&self, prefix_len: u32) -> Result<DivisionGrouping> {
        self.replace_host(prefix_len, "max-host", |division, local| {
            if local == 0 {
                Ok(division.maxed(None))
            } else {
                division.max_host_local(local, None)
            }
        })
    }

    /// Max-host form for the grouping's own prefix, or the max value when
    /// there is no prefix
    pub fn to_max_host(&self) -> Result<DivisionGrouping> {
        self.max_host_len(self.prefix_len.unwrap_or(0))
    }

    fn replace_host<F>(
        &self,
        prefix_len: u32,
        operation: &'static str,
        boundary: F,
    ) -> Result<DivisionGrouping>
    where
        F: Fn(&Division, u32) -> Result<Division>,
    {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count())?;
        let kept = self.prefix_len.filter(|&p| p == prefix_len);
        let Some((index, local)) = prefix::locate_prefix(&self.divisions, prefix_len) else {
            return Ok(DivisionGrouping::from_parts(
                self.divisions.to_vec(),
                kept,
                self.kind,
            ));
        };
        let mut divisions = self.divisions[..index].to_vec();
        let division = &self.divisions[index];
        divisions.push(boundary(division, local).map_err(|err| {
            debug!(
                operation,
                index,
                prefix_len,
                division = %division,
                "Host bits of division cannot be replaced as a contiguous range"
            );
            err
        })?);
        for division in self.divisions[index + 1..].iter() {
            divisions.push(boundary(division, 0)?);
        }
        Ok(DivisionGrouping::from_parts(divisions, kept, self.kind))
    }

    /// Whether every value has only zero bits after `prefix_len`
    ///
    /// True when there are no host bits.
    pub fn is_zero_host_len(&self, prefix_len: u32) -> bool {
        let prefix_len = prefix_len.min(self.bit_count());
        match prefix::locate_prefix(&self.divisions, prefix_len) {
            None => true,
            Some((index, local)) => {
                self.divisions[index].is_zero_host_local(local)
                    && self.divisions[index + 1..].iter().all(Division::is_zero)
            }
        }
    }

    /// Whether every value has only one bits after `prefix_len`
    pub fn is_max_host_len(&self, prefix_len: u32) -> bool {
        let prefix_len = prefix_len.min(self.bit_count());
        match prefix::locate_prefix(&self.divisions, prefix_len) {
            None => true,
            Some((index, local)) => {
                self.divisions[index].is_max_host_local(local)
                    && self.divisions[index + 1..].iter().all(Division::is_max)
            }
        }
    }

    /// [`is_zero_host_len`](Self::is_zero_host_len) at the grouping's own
    /// prefix; false when there is no prefix
    pub fn is_zero_host(&self) -> bool {
        self.prefix_len
            .map_or(false, |p| self.is_zero_host_len(p))
    }

    pub fn is_max_host(&self) -> bool {
        self.prefix_len
            .map_or(false, |p| self.is_max_host_len(p))
    }

    /// Detect whether the grouping is a network or host mask
    ///
    /// Scans the divisions once. Multi-valued and empty groupings are neither.
    pub fn check_for_prefix_mask(&self) -> MaskLengths {
        if self.divisions.is_empty() || self.is_multiple() {
            return MaskLengths::default();
        }
        let mut network = MaskScan::new(Pattern::OnesThenZeros);
        let mut host = MaskScan::new(Pattern::ZerosThenOnes);
        let mut start = 0;
        for division in self.divisions.iter() {
            network.step(division, start);
            host.step(division, start);
            if network.failed && host.failed {
                return MaskLengths::default();
            }
            start += division.bit_count();
        }
        MaskLengths {
            network_len: network.finish(start),
            host_len: host.finish(start),
        }
    }

    /// Prefix length of the network (or host) mask this grouping is, if any
    pub fn block_mask_prefix_len(&self, network: bool) -> Option<u32> {
        let lengths = self.check_for_prefix_mask();
        if network {
            lengths.network_len
        } else {
            lengths.host_len
        }
    }

    fn check_mask_shape(&self, other: &DivisionGrouping) -> Result<()> {
        if self.divisions.len() != other.divisions.len() {
            return Err(Error::SizeMismatch {
                expected: self.divisions.len(),
                actual: other.divisions.len(),
            });
        }
        for (index, (a, b)) in self.divisions.iter().zip(other.divisions.iter()).enumerate() {
            if a.bit_count() != b.bit_count() {
                return Err(Error::DivisionWidthMismatch {
                    kind: self.kind,
                    index,
                    expected: a.bit_count(),
                    actual: b.bit_count(),
                });
            }
        }
        Ok(())
    }

    /// And every value with the lowest value of `mask`
    ///
    /// The result carries no prefix.
    #[instrument(level = "trace", skip_all, fields(kind = %self.kind, divisions = self.divisions.len()))]
    pub fn mask(&self, mask: &DivisionGrouping) -> Result<DivisionGrouping> {
        self.combine(mask, "mask", Division::mask_with)
    }

    /// Or every value with the lowest value of `bits`
    #[instrument(level = "trace", skip_all, fields(kind = %self.kind, divisions = self.divisions.len()))]
    pub fn bitwise_or(&self, bits: &DivisionGrouping) -> Result<DivisionGrouping> {
        self.combine(bits, "bitwise_or", Division::or_with)
    }

    fn combine<F>(
        &self,
        other: &DivisionGrouping,
        operation: &'static str,
        op: F,
    ) -> Result<DivisionGrouping>
    where
        F: Fn(&Division, &Division) -> Result<Division>,
    {
        if let Err(err) = self.check_mask_shape(other) {
            debug!(operation, error = %err, "Mask shape does not match section");
            return Err(err);
        }
        let divisions = self
            .divisions
            .iter()
            .zip(other.divisions.iter())
            .enumerate()
            .map(|(index, (division, mask))| {
                op(division, mask).map_err(|err| {
                    debug!(operation, index, division = %division, mask = %mask, "Masked division is not contiguous");
                    err
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(DivisionGrouping::from_parts(divisions, None, self.kind))
    }

    /// Expand to the prefix blocks of `prefix_len` and carry that prefix
    pub fn to_prefix_block_len(&self, prefix_len: u32) -> Result<DivisionGrouping> {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count())?;
        let Some((index, local)) = prefix::locate_prefix(&self.divisions, prefix_len) else {
            return self.with_prefix_len(prefix_len);
        };
        if self.prefix_len == Some(prefix_len) && self.contains_prefix_block(prefix_len) {
            return Ok(self.clone());
        }
        let mut divisions = self.divisions[..index].to_vec();
        divisions.push(self.divisions[index].to_prefix_block_local(local));
        divisions.extend(self.divisions[index + 1..].iter().map(|d| d.full(None)));
        Ok(DivisionGrouping::from_parts(
            divisions,
            Some(prefix_len),
            self.kind,
        ))
    }

    /// Prefix block for the grouping's own prefix; unchanged when there is no
    /// prefix
    pub fn to_prefix_block(&self) -> Result<DivisionGrouping> {
        match self.prefix_len {
            Some(p) => self.to_prefix_block_len(p),
            None => Ok(self.clone()),
        }
    }

    /// Same values with a different prefix length
    pub fn with_prefix_len(&self, prefix_len: u32) -> Result<DivisionGrouping> {
        let prefix_len = config::check_prefix_len(prefix_len, self.bit_count())?;
        if self.prefix_len == Some(prefix_len) {
            return Ok(self.clone());
        }
        Ok(DivisionGrouping::from_parts(
            self.divisions.to_vec(),
            Some(prefix_len),
            self.kind,
        ))
    }

    pub fn without_prefix_len(&self) -> DivisionGrouping {
        if self.prefix_len.is_none() {
            return self.clone();
        }
        DivisionGrouping::from_parts(self.divisions.to_vec(), None, self.kind)
    }

    /// Full-length network mask of `prefix_len` for `kind`
    pub fn network_mask(kind: AddressKind, prefix_len: u32) -> Result<DivisionGrouping> {
        Self::mask_of(kind, prefix_len, prefix::network_mask)
    }

    /// Full-length host mask of `prefix_len` for `kind`
    pub fn host_mask(kind: AddressKind, prefix_len: u32) -> Result<DivisionGrouping> {
        Self::mask_of(kind, prefix_len, prefix::host_mask)
    }

    fn mask_of(
        kind: AddressKind,
        prefix_len: u32,
        mask: fn(u32, u32) -> u64,
    ) -> Result<DivisionGrouping> {
        let count = kind.default_division_count();
        if count == 0 {
            return Err(Error::NotConvertible(format!(
                "{} sections have no default shape",
                kind
            )));
        }
        let ipv6_count = match kind {
            AddressKind::Mixed => crate::kind::MIXED_IPV6_DIVISION_COUNT,
            _ => 0,
        };
        let mut widths = Vec::with_capacity(count);
        for index in 0..count {
            widths.push(kind.expected_bits(index, ipv6_count).unwrap_or(0));
        }
        let bit_count: u32 = widths.iter().sum();
        let prefix_len = config::check_prefix_len(prefix_len, bit_count)?;
        let values: Vec<u64> = widths
            .iter()
            .scan(0u32, |start, &width| {
                let local = local_prefix_len(Some(prefix_len), *start, width).unwrap_or(width);
                *start += width;
                Some(mask(local, width))
            })
            .collect();
        DivisionGrouping::from_values(kind, count, |i| values[i], |i| values[i], None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    OnesThenZeros,
    ZerosThenOnes,
}

/// One-pass state machine over division values
struct MaskScan {
    pattern: Pattern,
    /// Bit offset where the leading run ended
    boundary: Option<u32>,
    failed: bool,
}

impl MaskScan {
    fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            boundary: None,
            failed: false,
        }
    }

    fn step(&mut self, division: &Division, start: u32) {
        if self.failed {
            return;
        }
        let (leading_full, trailing_full) = match self.pattern {
            Pattern::OnesThenZeros => (division.is_max(), division.is_zero()),
            Pattern::ZerosThenOnes => (division.is_zero(), division.is_max()),
        };
        match self.boundary {
            Some(_) => {
                if !trailing_full {
                    self.failed = true;
                }
            }
            None if leading_full => {}
            None => match leading_run(division, self.pattern) {
                Some(run) => self.boundary = Some(start + run),
                None => self.failed = true,
            },
        }
    }

    fn finish(&self, bit_count: u32) -> Option<u32> {
        if self.failed {
            return None;
        }
        Some(self.boundary.unwrap_or(bit_count))
    }
}

/// Length of the leading run when a single-valued division matches the pattern
fn leading_run(division: &Division, pattern: Pattern) -> Option<u32> {
    let bit_count = division.bit_count();
    match division.as_fixed() {
        Some(value) => {
            let max = prefix::max_value(bit_count);
            let tail = match pattern {
                Pattern::OnesThenZeros => !value.lower() & max,
                Pattern::ZerosThenOnes => value.lower(),
            };
            // The trailing run must be a block of low ones.
            (tail & tail.wrapping_add(1) == 0).then(|| bit_count - tail.count_ones())
        }
        None => {
            let value = division.lower_value();
            let max = prefix::large::max_value(bit_count);
            let tail = match pattern {
                Pattern::OnesThenZeros => &max ^ &value,
                Pattern::ZerosThenOnes => value,
            };
            let plus_one: BigUint = &tail + 1u32;
            (&tail & &plus_one)
                .is_zero()
                .then(|| bit_count - tail.count_ones() as u32)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

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

    fn single(values: [u64; 4]) -> DivisionGrouping {
        ipv4(values.map(|v| (v, v)), None)
    }

    #[test]
    fn test_network_section() {
        let grouping = single([192, 168, 37, 5]);
        let network = grouping.network_section_len(20).unwrap();
        assert_eq!(network.division_count(), 3);
        assert_eq!(network.prefix_len(), Some(20));
        assert_eq!(network.to_string(), "192.168.32-47/20");

        let whole_divisions = grouping.network_section_len(16).unwrap();
        assert_eq!(whole_divisions.to_string(), "192.168/16");

        let empty = grouping.network_section_len(0).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.prefix_len(), Some(0));
    }

    #[test]
    fn test_network_section_shares_unchanged() {
        let grouping = ipv4([(10, 10), (0, 255), (0, 255), (0, 255)], Some(32));
        let network = grouping.network_section_len(32).unwrap();
        assert!(network.ptr_eq(&grouping));

        let once = single([10, 1, 2, 3]).network_section_len(12).unwrap();
        let twice = once.network_section_len(12).unwrap();
        assert!(twice.ptr_eq(&once));
        assert_eq!(twice, once);
    }

    #[test]
    fn test_host_section() {
        let grouping = single([192, 168, 37, 5]);
        let host = grouping.host_section_len(20).unwrap();
        assert_eq!(host.division_count(), 2);
        assert_eq!(host.prefix_len(), Some(4));
        assert_eq!(host.to_string(), "5.5/4");
        let locals: Vec<_> = host.divisions().iter().map(Division::prefix_len).collect();
        assert_eq!(locals, vec![Some(4), Some(0)]);

        assert!(grouping.host_section_len(32).unwrap().is_empty());
        assert_eq!(grouping.host_section_len(16).unwrap().to_string(), "37.5/0");
        assert!(grouping.host_section().unwrap().is_empty());
    }

    #[test]
    fn test_zero_and_max_host() {
        let grouping = single([192, 168, 37, 5]).with_prefix_len(20).unwrap();
        let zero = grouping.to_zero_host().unwrap();
        assert_eq!(zero.to_string(), "192.168.32.0/20");
        assert!(zero.is_zero_host());
        let max = grouping.to_max_host().unwrap();
        assert_eq!(max.to_string(), "192.168.47.255/20");
        assert!(max.is_max_host());

        let other_len = grouping.zero_host_len(24).unwrap();
        assert_eq!(other_len.prefix_len(), None);
        assert_eq!(other_len.to_string(), "192.168.37.0");

        let unprefixed = single([1, 2, 3, 4]).to_zero_host().unwrap();
        assert!(unprefixed.is_zero());
    }

    #[test]
    fn test_zero_host_incompatible() {
        let grouping = ipv4([(10, 10), (0, 255), (0, 255), (0, 255)], None);
        let err = grouping.zero_host_len(12).unwrap_err();
        assert!(err.is_incompatible_range());

        let block = ipv4([(10, 10), (16, 31), (0, 255), (0, 255)], None);
        let zero = block.zero_host_len(12).unwrap();
        assert_eq!(zero.to_string(), "10.16.0.0");
    }

    #[test]
    fn test_host_predicates() {
        let grouping = single([10, 0, 0, 0]);
        assert!(grouping.is_zero_host_len(8));
        assert!(!grouping.is_zero_host_len(3));
        assert!(grouping.is_zero_host_len(32));
        assert!(!grouping.is_zero_host());

        let broadcast = single([10, 255, 255, 255]);
        assert!(broadcast.is_max_host_len(8));
        assert!(!broadcast.is_max_host_len(7));

        let range = ipv4([(10, 10), (0, 1), (0, 0), (0, 0)], None);
        assert!(!range.is_zero_host_len(8));
        assert!(range.is_zero_host_len(16));
    }

    #[test]
    fn test_check_for_prefix_mask() {
        let netmask = single([255, 255, 240, 0]);
        assert_eq!(
            netmask.check_for_prefix_mask(),
            MaskLengths {
                network_len: Some(20),
                host_len: None
            }
        );
        assert_eq!(netmask.block_mask_prefix_len(true), Some(20));

        let hostmask = single([0, 0, 15, 255]);
        assert_eq!(hostmask.block_mask_prefix_len(false), Some(20));
        assert_eq!(hostmask.block_mask_prefix_len(true), None);

        let zeros = single([0, 0, 0, 0]);
        assert_eq!(
            zeros.check_for_prefix_mask(),
            MaskLengths {
                network_len: Some(0),
                host_len: Some(32)
            }
        );
        let ones = single([255, 255, 255, 255]);
        assert_eq!(
            ones.check_for_prefix_mask(),
            MaskLengths {
                network_len: Some(32),
                host_len: Some(0)
            }
        );

        assert_eq!(single([255, 0, 255, 0]).check_for_prefix_mask(), MaskLengths::default());
        assert_eq!(single([255, 254, 1, 0]).check_for_prefix_mask(), MaskLengths::default());
        assert_eq!(DivisionGrouping::zero().check_for_prefix_mask(), MaskLengths::default());
    }

    #[test]
    fn test_mask_constructors_round_trip() {
        for p in 0..=32 {
            let mask = DivisionGrouping::network_mask(AddressKind::V4, p).unwrap();
            assert_eq!(mask.block_mask_prefix_len(true), Some(p));
            let host = DivisionGrouping::host_mask(AddressKind::V4, p).unwrap();
            assert_eq!(host.block_mask_prefix_len(false), Some(p));
        }
        let v6 = DivisionGrouping::network_mask(AddressKind::V6, 64).unwrap();
        assert_eq!(v6.to_string(), "ffff:ffff:ffff:ffff:0:0:0:0");
        assert!(DivisionGrouping::network_mask(AddressKind::Untyped, 8).is_err());
    }

    #[test]
    fn test_mask() {
        let grouping = ipv4([(10, 10), (1, 1), (16, 31), (0, 255)], None);
        let netmask = DivisionGrouping::network_mask(AddressKind::V4, 20).unwrap();
        let masked = grouping.mask(&netmask).unwrap();
        assert_eq!(masked.to_string(), "10.1.16.0");
        assert_eq!(masked.prefix_len(), None);

        let wide = ipv4([(10, 10), (1, 1), (0, 255), (0, 255)], None);
        let err = wide.mask(&netmask).unwrap_err();
        assert!(err.is_incompatible_range());

        let short = DivisionGrouping::from_values(AddressKind::V4, 2, |_| 255, |_| 255, None)
            .unwrap();
        assert_eq!(
            grouping.mask(&short).unwrap_err(),
            Error::SizeMismatch {
                expected: 4,
                actual: 2
            }
        );
    }

    #[test]
    fn test_bitwise_or() {
        let grouping = single([10, 1, 2, 3]);
        let hostmask = DivisionGrouping::host_mask(AddressKind::V4, 16).unwrap();
        let ored = grouping.bitwise_or(&hostmask).unwrap();
        assert_eq!(ored.to_string(), "10.1.255.255");
    }

    #[test]
    fn test_to_prefix_block() {
        let grouping = single([10, 1, 2, 3]);
        let block = grouping.to_prefix_block_len(12).unwrap();
        assert_eq!(block.to_string(), "10.0-15.*.*/12");
        assert!(block.is_prefix_block());
        assert!(block.is_single_prefix_block());
        assert_eq!(block.count(), BigUint::from(1u32 << 20));

        let again = block.to_prefix_block().unwrap();
        assert!(again.ptr_eq(&block));

        let full = grouping.to_prefix_block_len(32).unwrap();
        assert_eq!(full.to_string(), "10.1.2.3/32");
        assert_eq!(block.without_prefix_len().prefix_len(), None);
    }

    #[test]
    fn test_prefix_len_out_of_range() {
        let grouping = single([10, 1, 2, 3]);
        assert!(matches!(
            grouping.network_section_len(33),
            Err(Error::PrefixLenOutOfRange { prefix_len: 33, bit_count: 32 })
        ));
        assert!(grouping.with_prefix_len(40).is_err());
    }
}
