//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregate::PeriodBucket;

/// A reporting period within the fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Calendar month 1-12.
    Month(u32),
    /// Quarter 1-4.
    Quarter(u32),
    /// The whole fiscal year.
    Year,
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month(month) => write!(f, "M{month:02}"),
            Self::Quarter(quarter) => write!(f, "Q{quarter}"),
            Self::Year => write!(f, "Year"),
        }
    }
}

/// One row of the VAT declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatRow {
    /// Period this row covers.
    pub period: Period,
    /// Taxable revenue (net).
    pub taxable_income: Decimal,
    /// Exempt domestic revenue.
    pub exempt_domestic_income: Decimal,
    /// Exempt foreign revenue.
    pub exempt_foreign_income: Decimal,
    /// Output VAT at the reduced rate.
    pub output_vat_reduced: Decimal,
    /// Output VAT at the standard rate.
    pub output_vat_standard: Decimal,
    /// Taxable expense (net).
    pub taxable_expense: Decimal,
    /// Exempt expense (domestic, foreign, and self-receipt).
    pub exempt_expense: Decimal,
    /// Input VAT at the reduced rate.
    pub input_vat_reduced: Decimal,
    /// Input VAT at the standard rate.
    pub input_vat_standard: Decimal,
    /// Non-deductible share of input VAT.
    pub non_deductible_vat: Decimal,
    /// VAT payable for the period.
    pub vat_payable: Decimal,
}

impl VatRow {
    /// Derives a declaration row from a period bucket.
    #[must_use]
    pub fn from_bucket(period: Period, bucket: &PeriodBucket) -> Self {
        Self {
            period,
            taxable_income: bucket.taxable_income,
            exempt_domestic_income: bucket.exempt_domestic_income,
            exempt_foreign_income: bucket.exempt_foreign_income,
            output_vat_reduced: bucket.output_vat_reduced,
            output_vat_standard: bucket.output_vat_standard,
            taxable_expense: bucket.taxable_expense,
            exempt_expense: bucket.exempt_domestic_expense
                + bucket.exempt_foreign_expense
                + bucket.self_receipt_expense,
            input_vat_reduced: bucket.input_vat_reduced,
            input_vat_standard: bucket.input_vat_standard,
            non_deductible_vat: bucket.non_deductible_vat,
            vat_payable: bucket.vat_payable(),
        }
    }
}

/// VAT declaration for a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatReport {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Monthly rows, January first.
    pub months: Vec<VatRow>,
    /// Quarterly rows.
    pub quarters: Vec<VatRow>,
    /// Annual row.
    pub year: VatRow,
}

/// One row of the profit-and-loss statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlRow {
    /// Period this row covers.
    pub period: Period,
    /// Total income over all treatment buckets.
    pub total_income: Decimal,
    /// Total expense over all treatment buckets.
    pub total_expense: Decimal,
    /// Period result (income minus expense).
    pub result: Decimal,
}

impl PnlRow {
    /// Derives a P&L row from a period bucket.
    #[must_use]
    pub fn from_bucket(period: Period, bucket: &PeriodBucket) -> Self {
        Self {
            period,
            total_income: bucket.total_income(),
            total_expense: bucket.total_expense(),
            result: bucket.result(),
        }
    }
}

/// Profit-and-loss statement for a fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlReport {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Monthly rows, January first.
    pub months: Vec<PnlRow>,
    /// Quarterly rows.
    pub quarters: Vec<PnlRow>,
    /// Annual row.
    pub year: PnlRow,
}

/// Two-sided balance sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Terminal bank balance (the synthetic closing row).
    pub bank_balance: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Subscribed share capital.
    pub share_capital: Decimal,
    /// Cumulative year result from the P&L.
    pub annual_result: Decimal,
    /// Shareholder-loan balances (category-filtered sum).
    pub shareholder_loans: Decimal,
    /// Tax-provision totals (category-filtered sum).
    pub tax_provisions: Decimal,
    /// Total equity and liabilities.
    pub total_equity_liabilities: Decimal,
    /// Signed difference between the two sides.
    pub difference: Decimal,
    /// True when the two sides agree within tolerance.
    pub is_balanced: bool,
}
