//! Address kind tags

use serde::{Deserialize, Serialize};
use std::fmt;

/// The address family a grouping's divisions belong to
///
/// The kind fixes the width of each division and is part of a grouping's
/// identity: a zero-length IPv4 section is not equal to a zero-length IPv6
/// section. `Zero` is the adaptive zero-length grouping that compares equal to
/// any other zero-length grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    /// Adaptive zero: no divisions, no family
    Zero,
    /// Divisions of arbitrary width, including large divisions
    Untyped,
    /// MAC / EUI: 8-bit divisions
    Mac,
    /// IPv4: 8-bit divisions
    V4,
    /// IPv6: 16-bit divisions
    V6,
    /// IPv6 prefix followed by an embedded IPv4 section
    Mixed,
}

/// Width of an IPv4 division
pub const IPV4_BITS_PER_DIVISION: u32 = 8;
/// Width of an IPv6 division
pub const IPV6_BITS_PER_DIVISION: u32 = 16;
/// Width of a MAC division
pub const MAC_BITS_PER_DIVISION: u32 = 8;

/// IPv4 division count
pub const IPV4_DIVISION_COUNT: usize = 4;
/// IPv6 division count
pub const IPV6_DIVISION_COUNT: usize = 8;
/// MAC-48 division count
pub const MAC_DIVISION_COUNT: usize = 6;
/// EUI-64 division count
pub const EUI64_DIVISION_COUNT: usize = 8;
/// IPv6 divisions ahead of the IPv4 part of a mixed section
pub const MIXED_IPV6_DIVISION_COUNT: usize = 6;

impl AddressKind {
    /// Width of every division, or `None` when widths vary
    pub fn bits_per_division(&self) -> Option<u32> {
        match self {
            AddressKind::V4 => Some(IPV4_BITS_PER_DIVISION),
            AddressKind::V6 => Some(IPV6_BITS_PER_DIVISION),
            AddressKind::Mac => Some(MAC_BITS_PER_DIVISION),
            AddressKind::Mixed | AddressKind::Untyped | AddressKind::Zero => None,
        }
    }

    /// Division count of a full address of this kind
    pub fn default_division_count(&self) -> usize {
        match self {
            AddressKind::V4 => IPV4_DIVISION_COUNT,
            AddressKind::V6 => IPV6_DIVISION_COUNT,
            AddressKind::Mac => MAC_DIVISION_COUNT,
            AddressKind::Mixed => MIXED_IPV6_DIVISION_COUNT + IPV4_DIVISION_COUNT,
            AddressKind::Untyped | AddressKind::Zero => 0,
        }
    }

    /// Upper bound on the division count of a section of this kind
    pub fn max_division_count(&self) -> Option<usize> {
        match self {
            AddressKind::V4 => Some(IPV4_DIVISION_COUNT),
            AddressKind::V6 => Some(IPV6_DIVISION_COUNT),
            AddressKind::Mac => Some(EUI64_DIVISION_COUNT),
            AddressKind::Mixed => Some(MIXED_IPV6_DIVISION_COUNT + IPV4_DIVISION_COUNT),
            AddressKind::Zero => Some(0),
            AddressKind::Untyped => None,
        }
    }

    /// Expected width of the division at `index` in a section of this kind
    ///
    /// For mixed sections `ipv6_count` is the number of IPv6 divisions present.
    pub(crate) fn expected_bits(&self, index: usize, ipv6_count: usize) -> Option<u32> {
        match self {
            AddressKind::Mixed if index < ipv6_count => Some(IPV6_BITS_PER_DIVISION),
            AddressKind::Mixed => Some(IPV4_BITS_PER_DIVISION),
            other => other.bits_per_division(),
        }
    }

    /// Fixed ordering rank used by the comparators
    pub fn rank(&self) -> u8 {
        match self {
            AddressKind::Zero => 0,
            AddressKind::Untyped => 1,
            AddressKind::Mac => 2,
            AddressKind::V4 => 3,
            AddressKind::V6 => 4,
            AddressKind::Mixed => 5,
        }
    }

    /// Whether this is an IP family
    pub fn is_ip(&self) -> bool {
        matches!(self, AddressKind::V4 | AddressKind::V6 | AddressKind::Mixed)
    }

    /// Default radix for canonical rendering of the division at `index`
    pub(crate) fn default_radix(&self, index: usize, ipv6_count: usize) -> u32 {
        match self {
            AddressKind::V6 | AddressKind::Mac => 16,
            AddressKind::Mixed if index < ipv6_count => 16,
            _ => 10,
        }
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressKind::Zero => "zero",
            AddressKind::Untyped => "untyped",
            AddressKind::Mac => "MAC",
            AddressKind::V4 => "IPv4",
            AddressKind::V6 => "IPv6",
            AddressKind::Mixed => "IPv6/IPv4 mixed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(AddressKind::V4.bits_per_division(), Some(8));
        assert_eq!(AddressKind::V6.bits_per_division(), Some(16));
        assert_eq!(AddressKind::Mac.bits_per_division(), Some(8));
        assert_eq!(AddressKind::Mixed.bits_per_division(), None);
        assert_eq!(AddressKind::Mixed.expected_bits(5, 6), Some(16));
        assert_eq!(AddressKind::Mixed.expected_bits(6, 6), Some(8));
    }

    #[test]
    fn test_ip_families() {
        assert!(AddressKind::V4.is_ip());
        assert!(AddressKind::V6.is_ip());
        assert!(AddressKind::Mixed.is_ip());
        assert!(!AddressKind::Mac.is_ip());
        assert!(!AddressKind::Untyped.is_ip());
        assert!(!AddressKind::Zero.is_ip());
    }

    #[test]
    fn test_ranks_distinct() {
        let kinds = [
            AddressKind::Zero,
            AddressKind::Untyped,
            AddressKind::Mac,
            AddressKind::V4,
            AddressKind::V6,
            AddressKind::Mixed,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert!(a.rank() < b.rank());
            }
        }
    }
}
