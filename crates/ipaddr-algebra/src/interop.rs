//! Conversions to and from `std::net` addresses and `ipnet` networks
//!
//! A network converts to the prefix block it names, carrying its prefix
//! length. Going the other way, only single addresses and single prefix
//! blocks are representable.

use crate::division::{cache, Division};
use crate::grouping::DivisionGrouping;
use crate::kind::{AddressKind, IPV4_BITS_PER_DIVISION, IPV6_BITS_PER_DIVISION};
use crate::{Error, Result};
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fn divisions<I>(bounds: I, bit_count: u32) -> Vec<Division>
where
    I: IntoIterator<Item = (u64, u64)>,
{
    bounds
        .into_iter()
        .map(|(lower, upper)| Division::Fixed(cache::fixed(lower, upper, bit_count, None)))
        .collect()
}

impl From<Ipv4Addr> for DivisionGrouping {
    fn from(addr: Ipv4Addr) -> Self {
        let octets = addr.octets().map(|o| (u64::from(o), u64::from(o)));
        DivisionGrouping::from_parts(
            divisions(octets, IPV4_BITS_PER_DIVISION),
            None,
            AddressKind::V4,
        )
    }
}

impl From<Ipv6Addr> for DivisionGrouping {
    fn from(addr: Ipv6Addr) -> Self {
        let segments = addr.segments().map(|s| (u64::from(s), u64::from(s)));
        DivisionGrouping::from_parts(
            divisions(segments, IPV6_BITS_PER_DIVISION),
            None,
            AddressKind::V6,
        )
    }
}

impl From<IpAddr> for DivisionGrouping {
    fn from(addr: IpAddr) -> Self {
        match addr {
            IpAddr::V4(v4) => v4.into(),
            IpAddr::V6(v6) => v6.into(),
        }
    }
}

impl From<Ipv4Net> for DivisionGrouping {
    fn from(net: Ipv4Net) -> Self {
        let lower = net.network().octets();
        let upper = net.broadcast().octets();
        let bounds = lower
            .iter()
            .zip(upper.iter())
            .map(|(&l, &u)| (u64::from(l), u64::from(u)));
        DivisionGrouping::from_parts(
            divisions(bounds, IPV4_BITS_PER_DIVISION),
            Some(u32::from(net.prefix_len())),
            AddressKind::V4,
        )
    }
}

impl From<Ipv6Net> for DivisionGrouping {
    fn from(net: Ipv6Net) -> Self {
        let lower = net.network().segments();
        let upper = net.broadcast().segments();
        let bounds = lower
            .iter()
            .zip(upper.iter())
            .map(|(&l, &u)| (u64::from(l), u64::from(u)));
        DivisionGrouping::from_parts(
            divisions(bounds, IPV6_BITS_PER_DIVISION),
            Some(u32::from(net.prefix_len())),
            AddressKind::V6,
        )
    }
}

impl From<IpNet> for DivisionGrouping {
    fn from(net: IpNet) -> Self {
        match net {
            IpNet::V4(v4) => v4.into(),
            IpNet::V6(v6) => v6.into(),
        }
    }
}

fn single_address_bytes(grouping: &DivisionGrouping, bit_count: u32) -> Result<&[u8]> {
    if grouping.is_multiple() {
        return Err(Error::NotConvertible(format!(
            "{grouping} holds more than one address"
        )));
    }
    if grouping.bit_count() != bit_count {
        return Err(Error::NotConvertible(format!(
            "{} grouping of {} bits is not a {bit_count}-bit address",
            grouping.kind(),
            grouping.bit_count()
        )));
    }
    Ok(grouping.bytes())
}

impl TryFrom<&DivisionGrouping> for Ipv4Addr {
    type Error = Error;

    fn try_from(grouping: &DivisionGrouping) -> Result<Self> {
        if grouping.kind() != AddressKind::V4 {
            return Err(Error::NotConvertible(format!(
                "{} grouping is not IPv4",
                grouping.kind()
            )));
        }
        let bytes = single_address_bytes(grouping, 32)?;
        let mut octets = [0u8; 4];
        octets.copy_from_slice(bytes);
        Ok(Ipv4Addr::from(octets))
    }
}

impl TryFrom<&DivisionGrouping> for Ipv6Addr {
    type Error = Error;

    fn try_from(grouping: &DivisionGrouping) -> Result<Self> {
        if !matches!(grouping.kind(), AddressKind::V6 | AddressKind::Mixed) {
            return Err(Error::NotConvertible(format!(
                "{} grouping is not IPv6",
                grouping.kind()
            )));
        }
        let bytes = single_address_bytes(grouping, 128)?;
        let mut octets = [0u8; 16];
        octets.copy_from_slice(bytes);
        Ok(Ipv6Addr::from(octets))
    }
}

impl TryFrom<&DivisionGrouping> for IpNet {
    type Error = Error;

    /// The grouping must be a single address or a single prefix block.
    /// Without a prefix length the network covers one address.
    fn try_from(grouping: &DivisionGrouping) -> Result<Self> {
        if !grouping.kind().is_ip() {
            return Err(Error::NotConvertible(format!(
                "{} grouping is not an IP network",
                grouping.kind()
            )));
        }
        if grouping.is_multiple() && !grouping.is_single_prefix_block() {
            return Err(Error::NotConvertible(format!(
                "{grouping} is not a single prefix block"
            )));
        }
        let prefix_len = grouping.prefix_len().unwrap_or_else(|| grouping.bit_count());
        let prefix_len = u8::try_from(prefix_len)
            .map_err(|_| Error::NotConvertible(format!("prefix length {prefix_len}")))?;
        let bytes = grouping.bytes();
        match (grouping.kind(), bytes.len()) {
            (AddressKind::V4, 4) => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(bytes);
                Ok(Ipv4Net::new(Ipv4Addr::from(octets), prefix_len)?.into())
            }
            (AddressKind::V6 | AddressKind::Mixed, 16) => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(bytes);
                Ok(Ipv6Net::new(Ipv6Addr::from(octets), prefix_len)?.into())
            }
            (kind, _) => Err(Error::NotConvertible(format!(
                "{kind} grouping of {} bits is not an IP network",
                grouping.bit_count()
            ))),
        }
    }
}
