//! Period bucket value type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Accumulators for one calendar period.
///
/// `add` is the only mutation primitive; quarter and year figures are sums
/// of month buckets and never independently stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBucket {
    /// Taxable revenue (net).
    pub taxable_income: Decimal,
    /// Exempt domestic revenue.
    pub exempt_domestic_income: Decimal,
    /// Exempt foreign (and zero-rated) revenue.
    pub exempt_foreign_income: Decimal,
    /// Taxable expense (net).
    pub taxable_expense: Decimal,
    /// Exempt domestic expense.
    pub exempt_domestic_expense: Decimal,
    /// Exempt foreign (and zero-rated) expense.
    pub exempt_foreign_expense: Decimal,
    /// Self-receipt expense (hospitality).
    pub self_receipt_expense: Decimal,
    /// Output VAT at the reduced rate.
    pub output_vat_reduced: Decimal,
    /// Output VAT at the standard rate.
    pub output_vat_standard: Decimal,
    /// Input VAT at the reduced rate.
    pub input_vat_reduced: Decimal,
    /// Input VAT at the standard rate.
    pub input_vat_standard: Decimal,
    /// Non-deductible share of input VAT.
    pub non_deductible_vat: Decimal,
}

impl PeriodBucket {
    /// Adds another bucket into this one, field by field.
    pub fn add(&mut self, other: &Self) {
        self.taxable_income += other.taxable_income;
        self.exempt_domestic_income += other.exempt_domestic_income;
        self.exempt_foreign_income += other.exempt_foreign_income;
        self.taxable_expense += other.taxable_expense;
        self.exempt_domestic_expense += other.exempt_domestic_expense;
        self.exempt_foreign_expense += other.exempt_foreign_expense;
        self.self_receipt_expense += other.self_receipt_expense;
        self.output_vat_reduced += other.output_vat_reduced;
        self.output_vat_standard += other.output_vat_standard;
        self.input_vat_reduced += other.input_vat_reduced;
        self.input_vat_standard += other.input_vat_standard;
        self.non_deductible_vat += other.non_deductible_vat;
    }

    /// Sums a sequence of buckets into a fresh one.
    #[must_use]
    pub fn sum<'a>(buckets: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut total = Self::default();
        for bucket in buckets {
            total.add(bucket);
        }
        total
    }

    /// Total income over all treatment buckets (VAT excluded).
    #[must_use]
    pub fn total_income(&self) -> Decimal {
        self.taxable_income + self.exempt_domestic_income + self.exempt_foreign_income
    }

    /// Total expense over all treatment buckets (VAT excluded).
    #[must_use]
    pub fn total_expense(&self) -> Decimal {
        self.taxable_expense
            + self.exempt_domestic_expense
            + self.exempt_foreign_expense
            + self.self_receipt_expense
    }

    /// Period result: income minus expense.
    #[must_use]
    pub fn result(&self) -> Decimal {
        self.total_income() - self.total_expense()
    }

    /// VAT payable: output VAT minus the deductible share of input VAT.
    #[must_use]
    pub fn vat_payable(&self) -> Decimal {
        (self.output_vat_reduced + self.output_vat_standard)
            - ((self.input_vat_reduced + self.input_vat_standard) - self.non_deductible_vat)
    }

    /// True if every accumulator is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
