//! IP/MAC Address Algebra
//!
//! Immutable address values built from divisions, each holding a range of
//! unsigned values with an optional prefix length:
//! - Single-value and range divisions of up to 64 bits, and wider ones backed by big integers
//! - Groupings of divisions as IPv4, IPv6, MAC, mixed IPv6/IPv4 or untyped values
//! - CIDR block algebra: minimal prefix lengths, prefix blocks, host sections
//! - Masking and bitwise OR of ranges, with sequential-result detection
//! - Radix 2 to 85 string rendering, including digit-by-digit ranges
//! - A total order over divisions and groupings
//! - Conversions to and from `std::net` and `ipnet` types

pub mod codec;
pub mod compare;
pub mod config;
pub mod division;
pub mod error;
pub mod grouping;
pub mod interop;
pub mod kind;
pub mod mask;
pub mod prefix;

// Re-export core types
pub use codec::RenderOptions;
pub use compare::{AddressComparator, AddressItem, ItemCategory};
pub use config::{AlgebraConfig, CacheConfig, PrefixLenPolicy};
pub use division::{Division, LargeRangeValue, RangeValue};
pub use error::{Error, Result};
pub use grouping::{DivisionGrouping, MaskLengths};
pub use kind::AddressKind;
