//! Cache module for holding API responses in memory
//!
//! This module provides a cache manager that keeps decoded API responses keyed
//! by resource name. Entries use a sliding expiration, so a value stays cached
//! for as long as it keeps being read within the window.

mod manager;

pub use manager::{CacheManager, CachedData};
