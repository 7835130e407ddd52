//! Model list caching using Moka.
//!
//! The distinct models observed in a date range change rarely and are
//! expensive to recompute, so the lookup result is kept for a short time
//! keyed by the range.

use moka::sync::Cache;
use salesboard_shared::DateRange;
use std::sync::Arc;
use std::time::Duration;

/// Default cache capacity (number of date ranges).
const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Default time-to-live for cache entries (1 minute).
const DEFAULT_TTL_SECS: u64 = 60;

/// Expiring cache of model lists keyed by date range.
///
/// Thread-safe and cheap to clone; clones share the same entries.
#[derive(Clone)]
pub struct ModelCatalogCache {
    cache: Cache<DateRange, Arc<Vec<String>>>,
}

impl ModelCatalogCache {
    /// Creates a new cache with default settings.
    ///
    /// Default: 256 entries max, 60 second TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CACHE_CAPACITY, Duration::from_secs(DEFAULT_TTL_SECS))
    }

    /// Creates a new cache with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of date ranges to cache
    /// * `ttl` - Time-to-live for each entry
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();

        Self { cache }
    }

    /// Returns the cached models for `range`, if present and not expired.
    #[must_use]
    pub fn get(&self, range: &DateRange) -> Option<Arc<Vec<String>>> {
        self.cache.get(range)
    }

    /// Stores the models observed in `range` and returns the shared copy.
    pub fn insert(&self, range: DateRange, models: Vec<String>) -> Arc<Vec<String>> {
        let models = Arc::new(models);
        self.cache.insert(range, Arc::clone(&models));
        models
    }

    /// Invalidates all cached entries.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    ///
    /// Moka evicts expired entries lazily; this forces pending work so that
    /// `entry_count` reflects recent changes.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for ModelCatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range(start_day: u32, end_day: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, start_day).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, end_day).unwrap(),
        )
    }

    fn models() -> Vec<String> {
        vec!["55".to_string(), "65".to_string()]
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let cache = ModelCatalogCache::new();
        let key = range(1, 31);

        assert!(cache.get(&key).is_none(), "First lookup should miss");

        cache.insert(key, models());

        let cached = cache.get(&key).expect("Second lookup should hit");
        assert_eq!(*cached, models());
    }

    #[test]
    fn test_different_ranges_not_shared() {
        let cache = ModelCatalogCache::new();
        cache.insert(range(1, 31), models());

        assert!(cache.get(&range(1, 30)).is_none());
        assert!(cache.get(&range(2, 31)).is_none());
        assert!(cache.get(&range(1, 31)).is_some());
    }

    #[test]
    fn test_insert_replaces_entry() {
        let cache = ModelCatalogCache::new();
        let key = range(1, 2);

        cache.insert(key, models());
        cache.insert(key, vec!["99".to_string()]);

        assert_eq!(*cache.get(&key).unwrap(), vec!["99".to_string()]);
    }

    #[test]
    fn test_invalidate_all() {
        let cache = ModelCatalogCache::new();
        let key = range(1, 31);
        cache.insert(key, models());

        cache.invalidate_all();
        cache.run_pending_tasks();

        assert!(cache.get(&key).is_none(), "Should miss after invalidate_all");
    }

    #[test]
    fn test_entries_expire_after_ttl() {
        let cache = ModelCatalogCache::with_config(10, Duration::from_millis(50));
        let key = range(1, 31);
        cache.insert(key, models());
        assert!(cache.get(&key).is_some());

        std::thread::sleep(Duration::from_millis(150));

        assert!(cache.get(&key).is_none(), "Entry should expire after TTL");
    }

    #[test]
    fn test_entry_count() {
        let cache = ModelCatalogCache::default();
        assert_eq!(cache.entry_count(), 0);

        cache.insert(range(1, 31), models());
        cache.insert(range(1, 15), models());

        // Entry count is updated by pending maintenance tasks
        cache.run_pending_tasks();
        assert_eq!(cache.entry_count(), 2);
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = ModelCatalogCache::new();
        let clone = cache.clone();
        clone.insert(range(3, 4), models());

        assert!(cache.get(&range(3, 4)).is_some());
    }
}
