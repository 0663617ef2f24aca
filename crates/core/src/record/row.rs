//! Row conversion for ledger records.

use kontor_store::layout::{column, set_column};
use kontor_store::{CellValue, RecordColumns};
use rust_decimal::Decimal;

use super::types::{LedgerRecord, RecordSide};
use crate::normalize;

/// Builds a ledger record from a raw table row.
///
/// The source row is never mutated; parse failures recover to safe defaults
/// (zero amounts, `None` dates, the configured default rate).
#[must_use]
pub fn from_row(
    row: &[CellValue],
    row_index: usize,
    layout: &RecordColumns,
    side: RecordSide,
    default_rate_percent: Decimal,
) -> LedgerRecord {
    let text = |index: usize| {
        column(row, index)
            .map(|cell| cell.display().trim().to_string())
            .unwrap_or_default()
    };
    let cell = |index: usize| column(row, index).cloned().unwrap_or(CellValue::Empty);

    let payment_method = {
        let method = text(layout.payment_method);
        if method.is_empty() { None } else { Some(method) }
    };

    LedgerRecord {
        row: row_index,
        side,
        date: normalize::parse_date(&cell(layout.date)),
        reference: text(layout.reference),
        counterparty: text(layout.counterparty),
        category: text(layout.category),
        net_amount: normalize::parse_amount(&cell(layout.net_amount)),
        vat_rate_percent: normalize::parse_rate(&cell(layout.vat_rate), default_rate_percent),
        paid_amount: normalize::parse_amount(&cell(layout.paid_amount)),
        payment_date: normalize::parse_date(&cell(layout.payment_date)),
        payment_method,
    }
}

/// Writes a record's reconciliation-owned cells back into its raw row.
///
/// Only the cells the reconciliation pass owns are touched (reference,
/// paid amount, payment date, payment method); all other columns keep
/// whatever the user put there.
pub fn patch_row(record: &LedgerRecord, row: &mut Vec<CellValue>, layout: &RecordColumns) {
    set_column(row, layout.reference, CellValue::from(record.reference.clone()));
    set_column(row, layout.paid_amount, CellValue::from(record.paid_amount));
    set_column(row, layout.payment_date, CellValue::from(record.payment_date));
    set_column(
        row,
        layout.payment_method,
        record.payment_method.clone().map_or(CellValue::Empty, CellValue::from),
    );
}
