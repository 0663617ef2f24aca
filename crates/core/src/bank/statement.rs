//! Bank statement and movement types.

use chrono::NaiveDate;
use kontor_store::layout::column;
use kontor_store::{CellValue, MovementColumns};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::normalize;

/// One bank movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankMovement {
    /// 1-based source row in the bank table.
    pub row: usize,
    /// Booking date.
    pub date: Option<NaiveDate>,
    /// Booking text from the bank statement.
    pub booking_text: String,
    /// Reference text used for matching.
    pub reference: String,
    /// Signed amount; positive is money in.
    pub amount: Decimal,
    /// Running balance after this movement (derived, strictly sequential).
    pub running_balance: Decimal,
    /// Category assigned after matching.
    pub category: Option<String>,
    /// Human-readable match annotation.
    pub annotation: Option<String>,
    /// Debit account from the category chart mapping.
    pub debit_account: Option<String>,
    /// Credit account from the category chart mapping.
    pub credit_account: Option<String>,
}

/// An ordered bank-movement sequence with a synthetic closing row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankStatement {
    opening_balance: Decimal,
    movements: Vec<BankMovement>,
    closing_row: Option<usize>,
}

impl BankStatement {
    /// Builds a statement from a table snapshot (header included).
    ///
    /// Running balances are recomputed sequentially from the opening
    /// balance; whatever the balance cells contained is ignored. The last
    /// data row is the synthetic closing-balance row and is excluded from
    /// the movement list.
    #[must_use]
    pub fn from_rows(
        rows: &[Vec<CellValue>],
        layout: &MovementColumns,
        opening_balance: Decimal,
    ) -> Self {
        let data_rows = rows.len().saturating_sub(1);
        // All data rows except the trailing closing row carry movements.
        let movement_count = data_rows.saturating_sub(1);

        let mut movements = Vec::with_capacity(movement_count);
        let mut balance = opening_balance;

        for (offset, row) in rows.iter().enumerate().skip(1).take(movement_count) {
            let text = |index: usize| {
                column(row, index)
                    .map(|cell| cell.display().trim().to_string())
                    .unwrap_or_default()
            };
            let cell = |index: usize| column(row, index).cloned().unwrap_or(CellValue::Empty);
            let optional = |value: String| if value.is_empty() { None } else { Some(value) };

            let amount = normalize::parse_amount(&cell(layout.amount));
            balance += amount;

            movements.push(BankMovement {
                row: offset + 1,
                date: normalize::parse_date(&cell(layout.date)),
                booking_text: text(layout.booking_text),
                reference: text(layout.reference),
                amount,
                running_balance: balance,
                category: optional(text(layout.category)),
                annotation: optional(text(layout.annotation)),
                debit_account: optional(text(layout.debit_account)),
                credit_account: optional(text(layout.credit_account)),
            });
        }

        let closing_row = (data_rows > 0).then_some(data_rows + 1);

        Self {
            opening_balance,
            movements,
            closing_row,
        }
    }

    /// The configured opening balance.
    #[must_use]
    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Movements in booking order, closing row excluded.
    #[must_use]
    pub fn movements(&self) -> &[BankMovement] {
        &self.movements
    }

    /// Mutable access to the movements for the matcher.
    pub fn movements_mut(&mut self) -> &mut [BankMovement] {
        &mut self.movements
    }

    /// 1-based table row of the synthetic closing row, if the table has any
    /// data rows.
    #[must_use]
    pub fn closing_row(&self) -> Option<usize> {
        self.closing_row
    }

    /// Terminal balance: the running balance of the last movement, which the
    /// closing row mirrors.
    #[must_use]
    pub fn closing_balance(&self) -> Decimal {
        self.movements
            .last()
            .map_or(self.opening_balance, |movement| movement.running_balance)
    }
}
