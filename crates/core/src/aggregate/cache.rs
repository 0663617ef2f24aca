//! Aggregation result caching using Moka.
//!
//! A year aggregation is pure in the record snapshot, so results are
//! memoized keyed by a snapshot hash. Entries are time-boxed and must be
//! invalidated whenever records are mutated; recomputation is always safe
//! to force.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use kontor_shared::config::CacheConfig;
use moka::sync::Cache;

use super::aggregator::{PeriodAggregator, YearAggregation};
use crate::category::CategoryRegistry;
use crate::record::LedgerRecord;

/// Cache for year aggregations.
///
/// Thread-safe; the key covers the fiscal year, the as-of date, and every
/// record field, so a stale hit is only possible within the TTL window
/// after an external edit the core did not see.
#[derive(Clone)]
pub struct AggregationCache {
    cache: Cache<u64, Arc<YearAggregation>>,
}

impl AggregationCache {
    /// Creates a cache with the given capacity and TTL settings.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.capacity)
            .time_to_live(Duration::from_secs(config.ttl_secs))
            .build();
        Self { cache }
    }

    /// Aggregates a fiscal year, returning a cached result if available.
    ///
    /// Cache hits come back with `cached: true`.
    #[must_use]
    pub fn run_cached(
        &self,
        registry: &CategoryRegistry,
        records: &[LedgerRecord],
        fiscal_year: i32,
        as_of: NaiveDate,
    ) -> YearAggregation {
        let key = snapshot_key(records, fiscal_year, as_of);

        if let Some(hit) = self.cache.get(&key) {
            let mut result = (*hit).clone();
            result.cached = true;
            return result;
        }

        let mut aggregator = PeriodAggregator::new(registry, fiscal_year, as_of);
        aggregator.add_records(records);
        let result = aggregator.finish();

        self.cache.insert(key, Arc::new(result.clone()));
        result
    }

    /// Invalidates all cached aggregations.
    ///
    /// Called whenever records are mutated (reconciliation, user edits).
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Returns the number of cached aggregations.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Runs cache maintenance tasks.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for AggregationCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

fn snapshot_key(records: &[LedgerRecord], fiscal_year: i32, as_of: NaiveDate) -> u64 {
    let mut hasher = DefaultHasher::new();
    fiscal_year.hash(&mut hasher);
    as_of.hash(&mut hasher);
    records.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordSide;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
    }

    fn sample_records() -> Vec<LedgerRecord> {
        vec![LedgerRecord {
            row: 2,
            side: RecordSide::Income,
            date: NaiveDate::from_ymd_opt(2026, 1, 5),
            reference: "RE-1".to_string(),
            counterparty: "Acme".to_string(),
            category: "Revenue (standard rate)".to_string(),
            net_amount: dec!(1000),
            vat_rate_percent: dec!(19),
            paid_amount: dec!(1190),
            payment_date: NaiveDate::from_ymd_opt(2026, 2, 14),
            payment_method: Some("bank".to_string()),
        }]
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let cache = AggregationCache::default();
        let registry = CategoryRegistry::new();
        let records = sample_records();

        let first = cache.run_cached(&registry, &records, 2026, as_of());
        assert!(!first.cached, "first call should not be cached");

        let second = cache.run_cached(&registry, &records, 2026, as_of());
        assert!(second.cached, "second call should be cached");
        assert_eq!(first.months, second.months);
    }

    #[test]
    fn test_mutated_snapshot_misses() {
        let cache = AggregationCache::default();
        let registry = CategoryRegistry::new();
        let mut records = sample_records();

        let _ = cache.run_cached(&registry, &records, 2026, as_of());
        records[0].paid_amount = Decimal::ZERO;
        records[0].payment_date = None;

        let result = cache.run_cached(&registry, &records, 2026, as_of());
        assert!(!result.cached, "changed records should miss the cache");
        assert!(result.year().is_empty());
    }

    #[test]
    fn test_different_year_misses() {
        let cache = AggregationCache::default();
        let registry = CategoryRegistry::new();
        let records = sample_records();

        let _ = cache.run_cached(&registry, &records, 2026, as_of());
        let other = cache.run_cached(&registry, &records, 2025, as_of());
        assert!(!other.cached);
    }

    #[test]
    fn test_invalidate_all() {
        let cache = AggregationCache::default();
        let registry = CategoryRegistry::new();
        let records = sample_records();

        let _ = cache.run_cached(&registry, &records, 2026, as_of());
        cache.invalidate_all();
        cache.run_pending_tasks();

        let result = cache.run_cached(&registry, &records, 2026, as_of());
        assert!(!result.cached, "invalidated entries should miss");
    }
}
