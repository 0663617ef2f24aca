//! Report generation tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::composer::{BalanceSheetComposer, BalanceSheetInputs};
use super::service::ReportService;
use super::types::Period;
use crate::aggregate::PeriodAggregator;
use crate::category::CategoryRegistry;
use crate::record::{LedgerRecord, RecordSide};
use kontor_shared::types::DiagnosticCode;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
}

fn paid_record(
    side: RecordSide,
    category: &str,
    net: Decimal,
    rate: Decimal,
    month: u32,
) -> LedgerRecord {
    let gross = net * (Decimal::ONE + rate / Decimal::ONE_HUNDRED);
    LedgerRecord {
        row: 2,
        side,
        date: NaiveDate::from_ymd_opt(2026, month, 1),
        reference: format!("R-{month}"),
        counterparty: "P".to_string(),
        category: category.to_string(),
        net_amount: net,
        vat_rate_percent: rate,
        paid_amount: gross,
        payment_date: NaiveDate::from_ymd_opt(2026, month, 15),
        payment_method: Some("bank".to_string()),
    }
}

fn sample_aggregation() -> crate::aggregate::YearAggregation {
    let registry = CategoryRegistry::new();
    let mut aggregator = PeriodAggregator::new(&registry, 2026, as_of());
    aggregator.add_records(&[
        paid_record(RecordSide::Income, "Revenue (standard rate)", dec!(1000), dec!(19), 1),
        paid_record(RecordSide::Income, "Revenue (reduced rate)", dec!(200), dec!(7), 2),
        paid_record(RecordSide::Expense, "Goods and materials", dec!(300), dec!(19), 2),
        paid_record(RecordSide::Expense, "Office rent", dec!(800), dec!(0), 3),
        paid_record(RecordSide::Income, "Revenue (standard rate)", dec!(500), dec!(19), 7),
    ]);
    aggregator.finish()
}

#[test]
fn test_vat_report_monthly_rows() {
    let report = ReportService::generate_vat_report(&sample_aggregation());

    assert_eq!(report.fiscal_year, 2026);
    assert_eq!(report.months.len(), 12);
    assert_eq!(report.quarters.len(), 4);

    let january = &report.months[0];
    assert_eq!(january.period, Period::Month(1));
    assert_eq!(january.taxable_income, dec!(1000));
    assert_eq!(january.output_vat_standard, dec!(190));
    assert_eq!(january.vat_payable, dec!(190));

    let february = &report.months[1];
    assert_eq!(february.output_vat_reduced, dec!(14));
    assert_eq!(february.input_vat_standard, dec!(57));
    // 14 - 57 = -43
    assert_eq!(february.vat_payable, dec!(-43));

    let march = &report.months[2];
    assert_eq!(march.exempt_expense, dec!(800));
    assert_eq!(march.vat_payable, Decimal::ZERO);
}

#[test]
fn test_vat_report_quarters_sum_months() {
    let report = ReportService::generate_vat_report(&sample_aggregation());

    let q1 = &report.quarters[0];
    assert_eq!(q1.period, Period::Quarter(1));
    assert_eq!(q1.taxable_income, dec!(1200));
    assert_eq!(q1.taxable_expense, dec!(300));
    assert_eq!(q1.vat_payable, dec!(190) + dec!(14) - dec!(57));

    // The annual row covers every month.
    assert_eq!(report.year.period, Period::Year);
    assert_eq!(report.year.taxable_income, dec!(1700));
    let quarter_sum: Decimal = report.quarters.iter().map(|q| q.taxable_income).sum();
    assert_eq!(report.year.taxable_income, quarter_sum);
}

#[test]
fn test_profit_and_loss_rows() {
    let report = ReportService::generate_profit_and_loss(&sample_aggregation());

    assert_eq!(report.months[0].total_income, dec!(1000));
    assert_eq!(report.months[0].result, dec!(1000));
    assert_eq!(report.months[2].total_expense, dec!(800));
    assert_eq!(report.months[2].result, dec!(-800));

    // Year result: 1700 income - 1100 expense.
    assert_eq!(report.year.total_income, dec!(1700));
    assert_eq!(report.year.total_expense, dec!(1100));
    assert_eq!(report.year.result, dec!(600));
}

#[test]
fn test_balance_sheet_balanced() {
    let inputs = BalanceSheetInputs {
        fiscal_year: 2026,
        bank_balance: dec!(26100),
        annual_result: dec!(600),
        share_capital: dec!(25000),
        shareholder_loans: dec!(500),
        tax_provisions: Decimal::ZERO,
    };
    let (report, diagnostics) = BalanceSheetComposer::compose(&inputs);

    assert!(report.is_balanced);
    assert_eq!(report.total_assets, dec!(26100));
    assert_eq!(report.total_equity_liabilities, dec!(26100));
    assert_eq!(report.difference, Decimal::ZERO);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_balance_sheet_imbalance_is_warned_not_fatal() {
    let inputs = BalanceSheetInputs {
        fiscal_year: 2026,
        bank_balance: dec!(26000),
        annual_result: dec!(600),
        share_capital: dec!(25000),
        shareholder_loans: Decimal::ZERO,
        tax_provisions: Decimal::ZERO,
    };
    let (report, diagnostics) = BalanceSheetComposer::compose(&inputs);

    assert!(!report.is_balanced);
    assert_eq!(report.difference, dec!(400));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, DiagnosticCode::UnbalancedBalanceSheet);
}

#[test]
fn test_balance_sheet_within_tolerance() {
    let inputs = BalanceSheetInputs {
        fiscal_year: 2026,
        bank_balance: dec!(25000.01),
        annual_result: Decimal::ZERO,
        share_capital: dec!(25000),
        shareholder_loans: Decimal::ZERO,
        tax_provisions: Decimal::ZERO,
    };
    let (report, diagnostics) = BalanceSheetComposer::compose(&inputs);
    assert!(report.is_balanced);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_supplementary_sums() {
    let registry = CategoryRegistry::new();
    let records = vec![
        paid_record(RecordSide::Income, "Shareholder loan", dec!(10000), dec!(0), 1),
        paid_record(RecordSide::Expense, "Tax provisions", dec!(1500), dec!(0), 2),
        paid_record(RecordSide::Income, "Revenue (standard rate)", dec!(1000), dec!(19), 3),
    ];

    let (loans, provisions) = BalanceSheetComposer::supplementary_sums(&records, &registry);
    assert_eq!(loans, dec!(10000));
    assert_eq!(provisions, dec!(1500));
}

#[test]
fn test_vat_report_serializes_to_json() {
    let report = ReportService::generate_vat_report(&sample_aggregation());
    let json = serde_json::to_value(&report).expect("report should serialize");

    assert_eq!(json["fiscal_year"], 2026);
    assert_eq!(json["months"].as_array().unwrap().len(), 12);
    assert_eq!(json["quarters"].as_array().unwrap().len(), 4);
}
