//! Cash-basis period aggregation.
//!
//! Walks categorized ledger records and buckets the actually-settled
//! amounts by effective month. Revenue and expense are recognized when cash
//! settles (payment date), not when the document is dated. Quarter and year
//! figures are pure sums over the month buckets, computed on demand.

pub mod aggregator;
pub mod bucket;
pub mod cache;

#[cfg(test)]
mod props;

pub use aggregator::{PeriodAggregator, YearAggregation};
pub use bucket::PeriodBucket;
pub use cache::AggregationCache;
