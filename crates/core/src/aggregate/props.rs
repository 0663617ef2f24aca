//! Property-based tests for aggregation closure.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregator::{PeriodAggregator, YearAggregation};
use super::bucket::PeriodBucket;
use crate::category::CategoryRegistry;
use crate::record::{LedgerRecord, RecordSide};

fn category_strategy() -> impl Strategy<Value = (&'static str, RecordSide, Decimal)> {
    prop_oneof![
        Just(("Revenue (standard rate)", RecordSide::Income, Decimal::new(19, 0))),
        Just(("Revenue (reduced rate)", RecordSide::Income, Decimal::new(7, 0))),
        Just(("Revenue (exempt domestic)", RecordSide::Income, Decimal::ZERO)),
        Just(("Revenue (exempt foreign)", RecordSide::Income, Decimal::ZERO)),
        Just(("Goods and materials", RecordSide::Expense, Decimal::new(19, 0))),
        Just(("Office rent", RecordSide::Expense, Decimal::ZERO)),
        Just(("Hospitality (self-receipt)", RecordSide::Expense, Decimal::new(19, 0))),
    ]
}

prop_compose! {
    fn record_strategy()(
        (category, side, rate) in category_strategy(),
        net_cents in -500_000i64..500_000i64,
        month in 1u32..=12,
        day in 1u32..=28,
        paid in any::<bool>(),
    ) -> LedgerRecord {
        let net = Decimal::new(net_cents, 2);
        let gross = net * (Decimal::ONE + rate / Decimal::ONE_HUNDRED);
        LedgerRecord {
            row: 2,
            side,
            date: NaiveDate::from_ymd_opt(2026, month, day),
            reference: format!("R-{month}-{day}"),
            counterparty: "P".to_string(),
            category: category.to_string(),
            net_amount: net,
            vat_rate_percent: rate,
            paid_amount: if paid { gross } else { Decimal::ZERO },
            payment_date: paid.then(|| NaiveDate::from_ymd_opt(2026, month, day).unwrap()),
            payment_method: None,
        }
    }
}

fn aggregate(records: &[LedgerRecord]) -> YearAggregation {
    let registry = CategoryRegistry::new();
    let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    let mut aggregator = PeriodAggregator::new(&registry, 2026, as_of);
    aggregator.add_records(records);
    aggregator.finish()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The year bucket equals the sum of the twelve month buckets, and the
    /// sum of the four quarter buckets, for every accumulator field.
    #[test]
    fn prop_aggregation_closure(records in prop::collection::vec(record_strategy(), 0..40)) {
        let result = aggregate(&records);

        let from_months = PeriodBucket::sum(&result.months);
        let from_quarters = {
            let mut total = PeriodBucket::default();
            for quarter in 1..=4 {
                total.add(&result.quarter(quarter).unwrap());
            }
            total
        };

        prop_assert_eq!(&result.year(), &from_months);
        prop_assert_eq!(&result.year(), &from_quarters);
    }

    /// Records without a payment date contribute zero to every bucket.
    #[test]
    fn prop_cash_basis_exclusion(records in prop::collection::vec(record_strategy(), 0..40)) {
        let unpaid: Vec<LedgerRecord> = records
            .into_iter()
            .map(|mut record| {
                record.paid_amount = Decimal::ZERO;
                record.payment_date = None;
                record
            })
            .collect();

        let result = aggregate(&unpaid);
        prop_assert!(result.year().is_empty());
    }

    /// Accumulation is order-independent.
    #[test]
    fn prop_order_independent(records in prop::collection::vec(record_strategy(), 0..20)) {
        let forward = aggregate(&records);
        let reversed: Vec<LedgerRecord> = records.iter().rev().cloned().collect();
        let backward = aggregate(&reversed);
        prop_assert_eq!(forward.year(), backward.year());
    }
}
