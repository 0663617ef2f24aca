//! Category rule types.

use serde::{Deserialize, Serialize};

/// Tax treatment of a category's paid amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxTreatment {
    /// Taxable at the standard rate (19 percent).
    TaxableStandard,
    /// Taxable at the reduced rate (7 percent).
    TaxableReduced,
    /// Exempt domestic turnover.
    ExemptDomestic,
    /// Exempt foreign turnover.
    ExemptForeign,
    /// Self-receipt (no external document).
    SelfReceipt,
}

/// Reporting bucket a category rolls up into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportingBucket {
    /// Revenue from deliveries and services.
    Revenue,
    /// Cost of goods and materials.
    CostOfGoods,
    /// General operating expenses.
    OperatingExpense,
    /// Hospitality expenses (partially deductible).
    Hospitality,
    /// Neutral transfers (shareholder settlement, intercompany).
    Transfer,
    /// Shareholder loan principal.
    ShareholderLoan,
    /// Tax provisions and tax payments.
    TaxProvision,
}

/// Chart-of-accounts pair a category books against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPair {
    /// Debit account code.
    pub debit: String,
    /// Credit account code.
    pub credit: String,
}

impl AccountPair {
    /// Creates an account pair from two account codes.
    #[must_use]
    pub fn new(debit: impl Into<String>, credit: impl Into<String>) -> Self {
        Self {
            debit: debit.into(),
            credit: credit.into(),
        }
    }

    /// Returns the pair with debit and credit swapped (reversed booking).
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            debit: self.credit.clone(),
            credit: self.debit.clone(),
        }
    }
}

/// One immutable category rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category label as it appears in ledger rows.
    pub label: String,
    /// Tax treatment of paid amounts.
    pub treatment: TaxTreatment,
    /// Reporting bucket.
    pub bucket: ReportingBucket,
    /// Chart accounts for bank bookings of this category.
    pub accounts: AccountPair,
    /// Whether the hospitality 70/30 deductibility split applies.
    pub hospitality: bool,
}

/// Result of classifying a category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Tax treatment.
    pub treatment: TaxTreatment,
    /// Reporting bucket.
    pub bucket: ReportingBucket,
    /// Chart accounts; `None` when the category is unmapped and the booking
    /// needs manual review.
    pub accounts: Option<AccountPair>,
    /// Whether the hospitality split applies.
    pub hospitality: bool,
    /// True when the label had no registry mapping and a safe default was
    /// substituted. The caller records the diagnostic.
    pub unmapped: bool,
}
