//! Cash-basis period aggregator.

use chrono::{Datelike, NaiveDate};
use kontor_shared::types::{Diagnostic, DiagnosticCode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::bucket::PeriodBucket;
use crate::category::{CategoryRegistry, TaxTreatment};
use crate::record::{LedgerRecord, RecordSide};

/// Share of hospitality input VAT that stays deductible.
fn deductible_share() -> Decimal {
    Decimal::new(7, 1)
}

/// Settled amounts below this are treated as zero.
fn settlement_epsilon() -> Decimal {
    Decimal::new(1, 9)
}

/// Aggregated figures for one fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearAggregation {
    /// The fiscal year the months belong to.
    pub fiscal_year: i32,
    /// One bucket per calendar month, January first.
    pub months: Vec<PeriodBucket>,
    /// Classification gaps found while aggregating.
    pub diagnostics: Vec<Diagnostic>,
    /// True when this result came from the aggregation cache.
    pub cached: bool,
}

impl YearAggregation {
    /// Returns the bucket for a calendar month (1-12).
    #[must_use]
    pub fn month(&self, month: u32) -> Option<&PeriodBucket> {
        if (1..=12).contains(&month) {
            self.months.get(month as usize - 1)
        } else {
            None
        }
    }

    /// Sums the three months of a quarter (1-4).
    #[must_use]
    pub fn quarter(&self, quarter: u32) -> Option<PeriodBucket> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let start = (quarter as usize - 1) * 3;
        self.months
            .get(start..start + 3)
            .map(|months| PeriodBucket::sum(months))
    }

    /// Sums all twelve months.
    #[must_use]
    pub fn year(&self) -> PeriodBucket {
        PeriodBucket::sum(&self.months)
    }
}

/// Walks ledger records and accumulates settled amounts into month buckets.
///
/// Accumulation is order-independent: records may arrive in any order, and
/// re-running over the same snapshot produces the same buckets.
pub struct PeriodAggregator<'a> {
    registry: &'a CategoryRegistry,
    fiscal_year: i32,
    as_of: NaiveDate,
    months: [PeriodBucket; 12],
    diagnostics: Vec<Diagnostic>,
}

impl<'a> PeriodAggregator<'a> {
    /// Creates an aggregator for one fiscal year.
    ///
    /// `as_of` bounds the cash basis: payment dates after it do not count
    /// as settled yet.
    #[must_use]
    pub fn new(registry: &'a CategoryRegistry, fiscal_year: i32, as_of: NaiveDate) -> Self {
        Self {
            registry,
            fiscal_year,
            as_of,
            months: Default::default(),
            diagnostics: Vec::new(),
        }
    }

    /// Adds a batch of records.
    pub fn add_records(&mut self, records: &[LedgerRecord]) {
        for record in records {
            self.add_record(record);
        }
    }

    /// Adds one record's settled amount to its effective month bucket.
    ///
    /// Records without a payment date, with a future payment date, outside
    /// the fiscal year, or with a (near) zero settled amount are skipped.
    pub fn add_record(&mut self, record: &LedgerRecord) {
        let Some(paid_on) = record.payment_date else {
            return;
        };
        if paid_on > self.as_of || paid_on.year() != self.fiscal_year {
            return;
        }

        let settled = record.settled_net();
        if settled.abs() < settlement_epsilon() {
            return;
        }
        let tax = settled * record.vat_rate_percent / Decimal::ONE_HUNDRED;

        let classification = self.registry.classify(&record.category, record.side);
        if classification.unmapped {
            self.diagnostics.push(Diagnostic::warning(
                DiagnosticCode::CategoryUnmapped,
                format!(
                    "{} (row {}): category '{}' is not mapped, using default bucket",
                    record.reference, record.row, record.category
                ),
            ));
        }

        let rate = record.vat_rate_percent.round();
        let bucket = &mut self.months[paid_on.month() as usize - 1];

        if classification.treatment == TaxTreatment::ExemptDomestic {
            match record.side {
                RecordSide::Income => bucket.exempt_domestic_income += settled,
                RecordSide::Expense => bucket.exempt_domestic_expense += settled,
            }
        } else if classification.treatment == TaxTreatment::ExemptForeign || rate.is_zero() {
            match record.side {
                RecordSide::Income => bucket.exempt_foreign_income += settled,
                RecordSide::Expense => bucket.exempt_foreign_expense += settled,
            }
        } else if classification.treatment == TaxTreatment::SelfReceipt
            && classification.hospitality
        {
            bucket.self_receipt_expense += settled;
            // Input VAT is recorded in full; the disallowed 30 percent is
            // carved out via the non-deductible accumulator.
            if add_vat(bucket, RecordSide::Expense, rate, tax) {
                bucket.non_deductible_vat += tax * (Decimal::ONE - deductible_share());
            }
        } else {
            match record.side {
                RecordSide::Income => bucket.taxable_income += settled,
                RecordSide::Expense => bucket.taxable_expense += settled,
            }
            add_vat(bucket, record.side, rate, tax);
        }
    }

    /// All twelve month buckets, January first.
    #[must_use]
    pub fn months(&self) -> &[PeriodBucket; 12] {
        &self.months
    }

    /// Sums the three months of a quarter (1-4).
    #[must_use]
    pub fn quarter(&self, quarter: u32) -> Option<PeriodBucket> {
        if !(1..=4).contains(&quarter) {
            return None;
        }
        let start = (quarter as usize - 1) * 3;
        Some(PeriodBucket::sum(&self.months[start..start + 3]))
    }

    /// Sums all twelve months.
    #[must_use]
    pub fn year(&self) -> PeriodBucket {
        PeriodBucket::sum(&self.months)
    }

    /// Finishes the walk and returns the aggregation result.
    #[must_use]
    pub fn finish(self) -> YearAggregation {
        YearAggregation {
            fiscal_year: self.fiscal_year,
            months: self.months.to_vec(),
            diagnostics: self.diagnostics,
            cached: false,
        }
    }
}

/// Accumulates VAT keyed by the rounded rate. Only the reduced (7) and
/// standard (19) rates carry VAT accumulators; other rates accumulate base
/// amounts only. Returns true if a VAT accumulator was hit.
fn add_vat(bucket: &mut PeriodBucket, side: RecordSide, rate: Decimal, tax: Decimal) -> bool {
    let reduced = rate == Decimal::new(7, 0);
    let standard = rate == Decimal::new(19, 0);
    match (side, reduced, standard) {
        (RecordSide::Income, true, _) => bucket.output_vat_reduced += tax,
        (RecordSide::Income, _, true) => bucket.output_vat_standard += tax,
        (RecordSide::Expense, true, _) => bucket.input_vat_reduced += tax,
        (RecordSide::Expense, _, true) => bucket.input_vat_standard += tax,
        _ => return false,
    }
    true
}
