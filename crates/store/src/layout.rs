//! Column layout configuration.
//!
//! Column positions for each table are fixed by the caller's configuration,
//! not hard-coded in the core logic. All indices are 1-based, matching how
//! tabular frontends number their columns.

use serde::Deserialize;

use crate::cell::CellValue;

/// Returns the cell at a 1-based column index, if present.
#[must_use]
pub fn column(row: &[CellValue], index: usize) -> Option<&CellValue> {
    if index == 0 {
        return None;
    }
    row.get(index - 1)
}

/// Writes a cell at a 1-based column index, growing the row as needed.
pub fn set_column(row: &mut Vec<CellValue>, index: usize, value: CellValue) {
    if index == 0 {
        return;
    }
    if row.len() < index {
        row.resize(index, CellValue::Empty);
    }
    row[index - 1] = value;
}

/// Column positions of a ledger-record table (income, expenses, self-receipts).
#[derive(Debug, Clone, Deserialize)]
pub struct RecordColumns {
    /// Document date.
    #[serde(default = "default_one")]
    pub date: usize,
    /// Reference number, possibly carrying a credit-note marker prefix.
    #[serde(default = "default_two")]
    pub reference: usize,
    /// Counterparty name.
    #[serde(default = "default_three")]
    pub counterparty: usize,
    /// Category label.
    #[serde(default = "default_four")]
    pub category: usize,
    /// Net amount.
    #[serde(default = "default_five")]
    pub net_amount: usize,
    /// VAT rate in percent.
    #[serde(default = "default_six")]
    pub vat_rate: usize,
    /// Cumulative paid amount.
    #[serde(default = "default_seven")]
    pub paid_amount: usize,
    /// Payment date.
    #[serde(default = "default_eight")]
    pub payment_date: usize,
    /// Payment method.
    #[serde(default = "default_nine")]
    pub payment_method: usize,
}

impl Default for RecordColumns {
    fn default() -> Self {
        Self {
            date: 1,
            reference: 2,
            counterparty: 3,
            category: 4,
            net_amount: 5,
            vat_rate: 6,
            paid_amount: 7,
            payment_date: 8,
            payment_method: 9,
        }
    }
}

/// Column positions of the bank-movements table.
#[derive(Debug, Clone, Deserialize)]
pub struct MovementColumns {
    /// Booking date.
    #[serde(default = "default_one")]
    pub date: usize,
    /// Booking text from the bank statement.
    #[serde(default = "default_two")]
    pub booking_text: usize,
    /// Reference text used for matching.
    #[serde(default = "default_three")]
    pub reference: usize,
    /// Signed movement amount.
    #[serde(default = "default_four")]
    pub amount: usize,
    /// Running balance after this movement.
    #[serde(default = "default_five")]
    pub running_balance: usize,
    /// Category assigned after matching.
    #[serde(default = "default_six")]
    pub category: usize,
    /// Human-readable match annotation.
    #[serde(default = "default_seven")]
    pub annotation: usize,
    /// Debit account from the category chart mapping.
    #[serde(default = "default_eight")]
    pub debit_account: usize,
    /// Credit account from the category chart mapping.
    #[serde(default = "default_nine")]
    pub credit_account: usize,
}

impl Default for MovementColumns {
    fn default() -> Self {
        Self {
            date: 1,
            booking_text: 2,
            reference: 3,
            amount: 4,
            running_balance: 5,
            category: 6,
            annotation: 7,
            debit_account: 8,
            credit_account: 9,
        }
    }
}

fn default_one() -> usize {
    1
}
fn default_two() -> usize {
    2
}
fn default_three() -> usize {
    3
}
fn default_four() -> usize {
    4
}
fn default_five() -> usize {
    5
}
fn default_six() -> usize {
    6
}
fn default_seven() -> usize {
    7
}
fn default_eight() -> usize {
    8
}
fn default_nine() -> usize {
    9
}
