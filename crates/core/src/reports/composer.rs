//! Balance sheet composition.

use kontor_shared::types::{Diagnostic, DiagnosticCode};
use rust_decimal::Decimal;

use super::types::BalanceSheetReport;
use crate::category::{CategoryRegistry, ReportingBucket};
use crate::record::LedgerRecord;

/// Tolerance for the two-sided balance check.
fn balance_tolerance() -> Decimal {
    Decimal::new(1, 2)
}

/// Inputs pulled together for the balance sheet.
#[derive(Debug, Clone)]
pub struct BalanceSheetInputs {
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Terminal running balance from the bank-movement sequence.
    pub bank_balance: Decimal,
    /// The year's cumulative P&L result.
    pub annual_result: Decimal,
    /// Statically configured share capital.
    pub share_capital: Decimal,
    /// Shareholder-loan balances.
    pub shareholder_loans: Decimal,
    /// Tax-provision expense totals.
    pub tax_provisions: Decimal,
}

/// Composes the two-sided balance sheet and flags imbalance.
pub struct BalanceSheetComposer;

impl BalanceSheetComposer {
    /// Sums the supplementary balance-sheet positions over the ledger
    /// records: shareholder-loan balances and tax-provision totals, by
    /// category-filtered gross summation.
    #[must_use]
    pub fn supplementary_sums(
        records: &[LedgerRecord],
        registry: &CategoryRegistry,
    ) -> (Decimal, Decimal) {
        let mut shareholder_loans = Decimal::ZERO;
        let mut tax_provisions = Decimal::ZERO;
        for record in records {
            match registry.classify(&record.category, record.side).bucket {
                ReportingBucket::ShareholderLoan => shareholder_loans += record.gross_amount(),
                ReportingBucket::TaxProvision => tax_provisions += record.gross_amount(),
                _ => {}
            }
        }
        (shareholder_loans, tax_provisions)
    }

    /// Builds the balance sheet and reports an imbalance beyond the 0.01
    /// tolerance as a non-fatal warning.
    #[must_use]
    pub fn compose(inputs: &BalanceSheetInputs) -> (BalanceSheetReport, Vec<Diagnostic>) {
        let total_assets = inputs.bank_balance;
        let total_equity_liabilities = inputs.share_capital
            + inputs.annual_result
            + inputs.shareholder_loans
            + inputs.tax_provisions;
        let difference = total_assets - total_equity_liabilities;
        let is_balanced = difference.abs() <= balance_tolerance();

        let mut diagnostics = Vec::new();
        if !is_balanced {
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::UnbalancedBalanceSheet,
                format!(
                    "balance sheet differs by {difference:.2} (assets {total_assets:.2}, equity and liabilities {total_equity_liabilities:.2})"
                ),
            ));
        }

        let report = BalanceSheetReport {
            fiscal_year: inputs.fiscal_year,
            bank_balance: inputs.bank_balance,
            total_assets,
            share_capital: inputs.share_capital,
            annual_result: inputs.annual_result,
            shareholder_loans: inputs.shareholder_loans,
            tax_provisions: inputs.tax_provisions,
            total_equity_liabilities,
            difference,
            is_balanced,
        };
        (report, diagnostics)
    }
}
