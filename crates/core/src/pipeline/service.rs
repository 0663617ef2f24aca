//! The bookkeeping pipeline.

use chrono::NaiveDate;
use kontor_shared::types::{Diagnostic, DiagnosticCode};
use kontor_shared::{AppConfig, AppResult};
use kontor_store::layout::set_column;
use kontor_store::{CellValue, LedgerStore, MovementColumns, RecordColumns};
use serde::Deserialize;
use tracing::{debug, info};

use crate::aggregate::{AggregationCache, YearAggregation};
use crate::bank::{BankStatement, MatchResolution, MovementMatcher, PaymentKind};
use crate::category::CategoryRegistry;
use crate::record::{self, LedgerRecord, RecordSide};
use crate::reports::{
    BalanceSheetComposer, BalanceSheetInputs, BalanceSheetReport, PnlReport, ReportService,
    VatReport,
};

/// Column layouts for all tables the pipeline touches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Layouts {
    /// Layout of the record tables (income, expenses, self-receipts).
    #[serde(default)]
    pub records: RecordColumns,
    /// Layout of the bank-movements table.
    #[serde(default)]
    pub movements: MovementColumns,
}

/// Outcome counts and findings of one reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationSummary {
    /// Movements examined (closing row excluded).
    pub movements: usize,
    /// Full payments (including already-settled matches).
    pub full: usize,
    /// Partial payments.
    pub partial: usize,
    /// Uncertain payments.
    pub uncertain: usize,
    /// Keyword-routed movements.
    pub keyword: usize,
    /// Movements left for manual review.
    pub unmatched: usize,
    /// Consistency warnings and classification gaps.
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs batch passes (reconciliation, aggregation, reports) over one
/// ledger store.
pub struct Pipeline<S: LedgerStore> {
    store: S,
    config: AppConfig,
    layouts: Layouts,
    registry: CategoryRegistry,
    cache: AggregationCache,
}

impl<S: LedgerStore> Pipeline<S> {
    /// Creates a pipeline with default layouts and the built-in category
    /// registry.
    #[must_use]
    pub fn new(store: S, config: AppConfig) -> Self {
        let cache = AggregationCache::new(&config.cache);
        Self {
            store,
            config,
            layouts: Layouts::default(),
            registry: CategoryRegistry::new(),
            cache,
        }
    }

    /// Replaces the column layouts.
    #[must_use]
    pub fn with_layouts(mut self, layouts: Layouts) -> Self {
        self.layouts = layouts;
        self
    }

    /// Replaces the category registry.
    #[must_use]
    pub fn with_registry(mut self, registry: CategoryRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The underlying store, for inspection.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the pipeline and returns the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Reconciles all bank movements against the income and expense
    /// records.
    ///
    /// Reads one snapshot, matches every non-closing movement, then writes
    /// back in one batch per logical output: the bank table, the income
    /// table, the expense table. Aborts before any write when a required
    /// table is missing. Invalidates the aggregation cache.
    pub fn reconcile(&mut self, as_of: NaiveDate) -> AppResult<ReconciliationSummary> {
        let tables = self.config.tables.clone();

        // Snapshot phase: abort before any write on structural problems.
        let mut bank_rows = self.store.read_rows(&tables.bank)?;
        let (mut income_rows, mut income) = self.load_table(&tables.income, RecordSide::Income)?;
        let (mut expense_rows, mut expense) =
            self.load_table(&tables.expenses, RecordSide::Expense)?;

        let mut statement = BankStatement::from_rows(
            &bank_rows,
            &self.layouts.movements,
            self.config.fiscal.opening_bank_balance,
        );

        let matcher = MovementMatcher::new(&self.config.matcher, &self.registry);
        let mut summary = ReconciliationSummary {
            movements: statement.movements().len(),
            ..ReconciliationSummary::default()
        };

        for movement in statement.movements_mut() {
            let resolution = matcher.match_movement(movement, &mut income, &mut expense);
            match resolution {
                MatchResolution::Settlement { kind, .. } => match kind {
                    PaymentKind::Full | PaymentKind::AlreadySettled => summary.full += 1,
                    PaymentKind::Partial => summary.partial += 1,
                    PaymentKind::Uncertain => summary.uncertain += 1,
                },
                MatchResolution::Keyword(_) => summary.keyword += 1,
                MatchResolution::Unmatched => {
                    summary.unmatched += 1;
                    summary.diagnostics.push(Diagnostic::info(
                        DiagnosticCode::MovementUnmatched,
                        format!(
                            "bank row {}: no matching record for '{}'",
                            movement.row, movement.reference
                        ),
                    ));
                }
            }
        }

        // Consistency warnings over the post-match record state.
        for record in income.iter().chain(expense.iter()) {
            summary
                .diagnostics
                .extend(record::validate_record(record, as_of));
        }

        // Write-back phase, one batch per logical output.
        self.patch_bank_rows(&mut bank_rows, &statement);
        self.store.write_rows(&tables.bank, 2, data_rows(bank_rows))?;

        patch_record_rows(&income, &mut income_rows, &self.layouts.records);
        self.store
            .write_rows(&tables.income, 2, data_rows(income_rows))?;

        patch_record_rows(&expense, &mut expense_rows, &self.layouts.records);
        self.store
            .write_rows(&tables.expenses, 2, data_rows(expense_rows))?;

        // Records changed; memoized aggregations are stale.
        self.cache.invalidate_all();

        info!(
            movements = summary.movements,
            full = summary.full,
            partial = summary.partial,
            uncertain = summary.uncertain,
            keyword = summary.keyword,
            unmatched = summary.unmatched,
            "reconciliation pass complete"
        );
        Ok(summary)
    }

    /// Aggregates the configured fiscal year over the current record
    /// snapshot, memoized.
    pub fn aggregate(&self, as_of: NaiveDate) -> AppResult<YearAggregation> {
        let records = self.load_all_records()?;
        let aggregation = self.cache.run_cached(
            &self.registry,
            &records,
            self.config.fiscal.year,
            as_of,
        );
        debug!(
            fiscal_year = aggregation.fiscal_year,
            cached = aggregation.cached,
            "aggregation ready"
        );
        Ok(aggregation)
    }

    /// Derives the VAT declaration and writes it to the configured report
    /// table, if any. Returns the report and the pass diagnostics.
    pub fn vat_report(&mut self, as_of: NaiveDate) -> AppResult<(VatReport, Vec<Diagnostic>)> {
        let aggregation = self.aggregate(as_of)?;
        let report = ReportService::generate_vat_report(&aggregation);

        if let Some(table) = self.config.tables.vat_report.clone() {
            self.store.write_rows(&table, 1, render_vat_rows(&report))?;
        }
        Ok((report, aggregation.diagnostics))
    }

    /// Derives the profit-and-loss statement. Returns the report and the
    /// pass diagnostics.
    pub fn profit_and_loss(
        &mut self,
        as_of: NaiveDate,
    ) -> AppResult<(PnlReport, Vec<Diagnostic>)> {
        let aggregation = self.aggregate(as_of)?;
        let report = ReportService::generate_profit_and_loss(&aggregation);
        Ok((report, aggregation.diagnostics))
    }

    /// Composes the balance sheet from the terminal bank balance, the
    /// year's P&L result, the configured share capital, and the
    /// supplementary category sums. Writes it to the configured report
    /// table, if any.
    pub fn balance_sheet(
        &mut self,
        as_of: NaiveDate,
    ) -> AppResult<(BalanceSheetReport, Vec<Diagnostic>)> {
        let records = self.load_all_records()?;
        let bank_rows = self.store.read_rows(&self.config.tables.bank)?;
        let statement = BankStatement::from_rows(
            &bank_rows,
            &self.layouts.movements,
            self.config.fiscal.opening_bank_balance,
        );

        let aggregation = self.cache.run_cached(
            &self.registry,
            &records,
            self.config.fiscal.year,
            as_of,
        );
        let (shareholder_loans, tax_provisions) =
            BalanceSheetComposer::supplementary_sums(&records, &self.registry);

        let inputs = BalanceSheetInputs {
            fiscal_year: self.config.fiscal.year,
            bank_balance: statement.closing_balance(),
            annual_result: aggregation.year().result(),
            share_capital: self.config.fiscal.share_capital,
            shareholder_loans,
            tax_provisions,
        };
        let (report, mut diagnostics) = BalanceSheetComposer::compose(&inputs);
        diagnostics.extend(aggregation.diagnostics);

        if let Some(table) = self.config.tables.balance_sheet.clone() {
            self.store
                .write_rows(&table, 1, render_balance_sheet_rows(&report))?;
        }
        Ok((report, diagnostics))
    }

    /// Forces the next aggregation to recompute.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate_all();
    }

    fn load_table(
        &self,
        table: &str,
        side: RecordSide,
    ) -> AppResult<(Vec<Vec<CellValue>>, Vec<LedgerRecord>)> {
        let rows = self.store.read_rows(table)?;
        let records = rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, row)| {
                record::from_row(
                    row,
                    index + 1,
                    &self.layouts.records,
                    side,
                    self.config.vat.default_rate_percent,
                )
            })
            .collect();
        Ok((rows, records))
    }

    /// Loads income, expense, and (if configured) self-receipt records.
    fn load_all_records(&self) -> AppResult<Vec<LedgerRecord>> {
        let (_, mut records) = self.load_table(&self.config.tables.income, RecordSide::Income)?;
        let (_, expense) = self.load_table(&self.config.tables.expenses, RecordSide::Expense)?;
        records.extend(expense);
        if let Some(table) = &self.config.tables.self_receipts {
            let (_, self_receipts) = self.load_table(table, RecordSide::Expense)?;
            records.extend(self_receipts);
        }
        Ok(records)
    }

    /// Patches matcher results and recomputed running balances into the raw
    /// bank rows.
    fn patch_bank_rows(&self, rows: &mut [Vec<CellValue>], statement: &BankStatement) {
        let layout = &self.layouts.movements;
        for movement in statement.movements() {
            let Some(row) = rows.get_mut(movement.row - 1) else {
                continue;
            };
            set_column(row, layout.running_balance, CellValue::from(movement.running_balance));
            set_column(
                row,
                layout.category,
                movement.category.clone().map_or(CellValue::Empty, CellValue::from),
            );
            set_column(
                row,
                layout.annotation,
                movement.annotation.clone().map_or(CellValue::Empty, CellValue::from),
            );
            set_column(
                row,
                layout.debit_account,
                movement.debit_account.clone().map_or(CellValue::Empty, CellValue::from),
            );
            set_column(
                row,
                layout.credit_account,
                movement.credit_account.clone().map_or(CellValue::Empty, CellValue::from),
            );
        }
        if let Some(closing_row) = statement.closing_row() {
            if let Some(row) = rows.get_mut(closing_row - 1) {
                set_column(
                    row,
                    layout.running_balance,
                    CellValue::from(statement.closing_balance()),
                );
            }
        }
    }
}

/// Splits a snapshot into its data rows (everything after the header).
fn data_rows(mut rows: Vec<Vec<CellValue>>) -> Vec<Vec<CellValue>> {
    if rows.len() > 1 { rows.split_off(1) } else { Vec::new() }
}

fn patch_record_rows(
    records: &[LedgerRecord],
    rows: &mut [Vec<CellValue>],
    layout: &RecordColumns,
) {
    for record in records {
        if let Some(row) = rows.get_mut(record.row - 1) {
            record::patch_row(record, row, layout);
        }
    }
}

fn render_vat_rows(report: &VatReport) -> Vec<Vec<CellValue>> {
    let header: Vec<CellValue> = [
        "Period",
        "Taxable income",
        "Exempt income (domestic)",
        "Exempt income (foreign)",
        "Output VAT 7%",
        "Output VAT 19%",
        "Taxable expense",
        "Exempt expense",
        "Input VAT 7%",
        "Input VAT 19%",
        "Non-deductible VAT",
        "VAT payable",
    ]
    .into_iter()
    .map(CellValue::from)
    .collect();

    let mut rows = vec![header];
    for row in report
        .months
        .iter()
        .chain(report.quarters.iter())
        .chain(std::iter::once(&report.year))
    {
        rows.push(vec![
            CellValue::from(row.period.to_string()),
            CellValue::from(row.taxable_income),
            CellValue::from(row.exempt_domestic_income),
            CellValue::from(row.exempt_foreign_income),
            CellValue::from(row.output_vat_reduced),
            CellValue::from(row.output_vat_standard),
            CellValue::from(row.taxable_expense),
            CellValue::from(row.exempt_expense),
            CellValue::from(row.input_vat_reduced),
            CellValue::from(row.input_vat_standard),
            CellValue::from(row.non_deductible_vat),
            CellValue::from(row.vat_payable),
        ]);
    }
    rows
}

fn render_balance_sheet_rows(report: &BalanceSheetReport) -> Vec<Vec<CellValue>> {
    let line = |label: &str, amount| vec![CellValue::from(label), CellValue::from(amount)];
    vec![
        line("Bank balance", report.bank_balance),
        line("Total assets", report.total_assets),
        line("Share capital", report.share_capital),
        line("Annual result", report.annual_result),
        line("Shareholder loans", report.shareholder_loans),
        line("Tax provisions", report.tax_provisions),
        line("Total equity and liabilities", report.total_equity_liabilities),
        line("Difference", report.difference),
    ]
}
