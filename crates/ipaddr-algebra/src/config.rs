//! Library configuration
//!
//! The configuration is process-wide and immutable once installed. Services
//! that embed this crate usually deserialize an [`AlgebraConfig`] from their
//! own config file and call [`install`] once during startup; readers that run
//! before (or without) installation see [`AlgebraConfig::default`].

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

static CONFIG: OnceLock<AlgebraConfig> = OnceLock::new();

/// Largest division width whose single values may be cached
pub const MAX_CACHEABLE_BIT_COUNT: u8 = 16;

/// How constructors and derivations treat prefix lengths beyond the bit count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixLenPolicy {
    /// Return `Error::PrefixLenOutOfRange`
    #[default]
    Reject,
    /// Clamp to the bit count
    Clamp,
}

impl PrefixLenPolicy {
    /// Apply the policy to a prefix length for a value of `bit_count` bits
    pub fn apply(self, prefix_len: u32, bit_count: u32) -> Result<u32> {
        if prefix_len <= bit_count {
            return Ok(prefix_len);
        }
        match self {
            PrefixLenPolicy::Reject => Err(Error::PrefixLenOutOfRange {
                prefix_len,
                bit_count,
            }),
            PrefixLenPolicy::Clamp => Ok(bit_count),
        }
    }
}

/// Shared value cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Reuse shared instances for single-valued divisions
    pub segment_cache: bool,
    /// Widest division (in bits) eligible for the segment cache
    pub max_cached_bit_count: u8,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            segment_cache: true,
            max_cached_bit_count: MAX_CACHEABLE_BIT_COUNT,
        }
    }
}

/// Process-wide configuration for the address algebra
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgebraConfig {
    /// Prefix length handling for constructors and derivations
    pub prefix_len_policy: PrefixLenPolicy,
    /// Segment cache settings
    pub cache: CacheConfig,
}

impl AlgebraConfig {
    /// Validate the configuration
    ///
    /// The segment cache holds at most one entry per value and prefix length,
    /// so its width is capped to keep the cache bounded.
    pub fn validate(&self) -> Result<()> {
        if self.cache.max_cached_bit_count > MAX_CACHEABLE_BIT_COUNT {
            return Err(Error::Config(format!(
                "max_cached_bit_count {} exceeds {}",
                self.cache.max_cached_bit_count, MAX_CACHEABLE_BIT_COUNT
            )));
        }
        Ok(())
    }

    /// Whether divisions of `bit_count` bits go through the segment cache
    pub fn caches_bit_count(&self, bit_count: u32) -> bool {
        self.cache.segment_cache && bit_count <= u32::from(self.cache.max_cached_bit_count)
    }
}

/// Install the process-wide configuration
///
/// Fails if the configuration is invalid or one was already installed (either
/// explicitly or implicitly by a reader calling [`current`]).
pub fn install(config: AlgebraConfig) -> Result<()> {
    config.validate()?;
    debug!(
        policy = ?config.prefix_len_policy,
        segment_cache = config.cache.segment_cache,
        "Installing address algebra configuration"
    );
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("configuration already installed".to_string()))
}

/// The active configuration
pub fn current() -> &'static AlgebraConfig {
    CONFIG.get_or_init(AlgebraConfig::default)
}

/// Apply the active prefix length policy
pub(crate) fn check_prefix_len(prefix_len: u32, bit_count: u32) -> Result<u32> {
    current().prefix_len_policy.apply(prefix_len, bit_count)
}
