//! Shared instances of common fixed-width divisions
//!
//! Address sections are built from a small set of distinct segment values, so
//! single-valued divisions up to 16 bits wide are handed out as shared
//! `Arc<RangeValue>` instances. Unprefixed values are published in blocks of
//! 256 consecutive values, built the first time any value in the block is
//! requested. Prefixed single values and full-range divisions are cached
//! individually. Entries are never removed.

use super::range::RangeValue;
use crate::config;
use crate::prefix;
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// Values per unprefixed cache block
pub const BLOCK_SIZE: u64 = 256;

/// (bit count, value / BLOCK_SIZE)
type BlockKey = (u8, u64);
/// (bit count, prefix length, value)
type PrefixedKey = (u8, u8, u64);
/// (bit count, prefix length)
type FullRangeKey = (u8, Option<u8>);

static CACHE: OnceLock<SegmentCache> = OnceLock::new();

#[derive(Default)]
struct SegmentCache {
    blocks: DashMap<BlockKey, Arc<[Arc<RangeValue>]>>,
    prefixed: DashMap<PrefixedKey, Arc<RangeValue>>,
    full_ranges: DashMap<FullRangeKey, Arc<RangeValue>>,
}

/// Snapshot of cache occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub blocks: usize,
    pub prefixed: usize,
    pub full_ranges: usize,
}

fn cache() -> &'static SegmentCache {
    CACHE.get_or_init(SegmentCache::default)
}

impl SegmentCache {
    fn unprefixed(&self, value: u64, bit_count: u32) -> Arc<RangeValue> {
        let key = (bit_count as u8, value / BLOCK_SIZE);
        let offset = (value % BLOCK_SIZE) as usize;
        if let Some(block) = self.blocks.get(&key) {
            return Arc::clone(&block[offset]);
        }
        let block = self
            .blocks
            .entry(key)
            .or_insert_with(|| {
                let start = key.1 * BLOCK_SIZE;
                let end = (start + BLOCK_SIZE - 1).min(prefix::max_value(bit_count));
                trace!(bit_count, start, end, "Publishing segment cache block");
                (start..=end)
                    .map(|v| Arc::new(RangeValue::new_unchecked(v, v, bit_count, None)))
                    .collect()
            })
            .clone();
        Arc::clone(&block[offset])
    }

    fn prefixed(&self, value: u64, bit_count: u32, prefix_len: u32) -> Arc<RangeValue> {
        let key = (bit_count as u8, prefix_len as u8, value);
        if let Some(entry) = self.prefixed.get(&key) {
            return Arc::clone(&entry);
        }
        self.prefixed
            .entry(key)
            .or_insert_with(|| {
                Arc::new(RangeValue::new_unchecked(
                    value,
                    value,
                    bit_count,
                    Some(prefix_len),
                ))
            })
            .clone()
    }

    fn full_range(&self, bit_count: u32, prefix_len: Option<u32>) -> Arc<RangeValue> {
        let key = (bit_count as u8, prefix_len.map(|p| p as u8));
        if let Some(entry) = self.full_ranges.get(&key) {
            return Arc::clone(&entry);
        }
        self.full_ranges
            .entry(key)
            .or_insert_with(|| {
                Arc::new(RangeValue::new_unchecked(
                    0,
                    prefix::max_value(bit_count),
                    bit_count,
                    prefix_len,
                ))
            })
            .clone()
    }
}

/// Shared or fresh instance for already validated parts
pub(crate) fn fixed(
    lower: u64,
    upper: u64,
    bit_count: u32,
    prefix_len: Option<u32>,
) -> Arc<RangeValue> {
    if !config::current().caches_bit_count(bit_count) {
        return Arc::new(RangeValue::new_unchecked(lower, upper, bit_count, prefix_len));
    }
    let cache = cache();
    if lower == upper {
        return match prefix_len {
            None => cache.unprefixed(lower, bit_count),
            Some(p) => cache.prefixed(lower, bit_count, p),
        };
    }
    if lower == 0 && upper == prefix::max_value(bit_count) {
        return cache.full_range(bit_count, prefix_len);
    }
    Arc::new(RangeValue::new_unchecked(lower, upper, bit_count, prefix_len))
}

/// Share an existing value when the cache holds an equal one
pub(crate) fn intern(value: RangeValue) -> Arc<RangeValue> {
    fixed(
        value.lower(),
        value.upper(),
        value.bit_count(),
        value.prefix_len(),
    )
}

/// Current cache occupancy
pub fn stats() -> CacheStats {
    let cache = cache();
    CacheStats {
        blocks: cache.blocks.len(),
        prefixed: cache.prefixed.len(),
        full_ranges: cache.full_ranges.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_values_shared() {
        let a = fixed(0x1234, 0x1234, 16, None);
        let b = fixed(0x1234, 0x1234, 16, None);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.lower(), 0x1234);

        let neighbour = fixed(0x1235, 0x1235, 16, None);
        assert_eq!(neighbour.lower(), 0x1235);
        assert!(stats().blocks >= 1);
    }

    #[test]
    fn test_widths_not_mixed() {
        let byte = fixed(7, 7, 8, None);
        let word = fixed(7, 7, 16, None);
        assert_eq!(byte.bit_count(), 8);
        assert_eq!(word.bit_count(), 16);
    }

    #[test]
    fn test_last_partial_block() {
        let top = fixed(0x3f, 0x3f, 6, None);
        assert_eq!(top.lower(), 0x3f);
        assert_eq!(top.bit_count(), 6);
    }

    #[test]
    fn test_prefixed_and_full_range() {
        let a = fixed(0x80, 0x80, 8, Some(1));
        let b = fixed(0x80, 0x80, 8, Some(1));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.prefix_len(), Some(1));

        let full = fixed(0, 0xffff, 16, Some(0));
        let again = fixed(0, 0xffff, 16, Some(0));
        assert!(Arc::ptr_eq(&full, &again));
        assert!(full.is_full_range());
    }

    #[test]
    fn test_wide_values_not_cached() {
        let a = fixed(5, 5, 32, None);
        let b = fixed(5, 5, 32, None);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }
}
