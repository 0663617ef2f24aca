//! Ledger record types and derived payment state.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the books a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSide {
    /// Outgoing invoices (revenue).
    Income,
    /// Expense bills and self-receipts.
    Expense,
}

/// Payment status derived from paid versus gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing settled yet.
    Open,
    /// Partially settled.
    PartiallyPaid,
    /// Fully settled within tolerance.
    Paid,
}

/// One ledger record (invoice, expense bill, or self-receipt).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// 1-based source row in the ledger table.
    pub row: usize,
    /// Record side (from the table of origin).
    pub side: RecordSide,
    /// Document date.
    pub date: Option<NaiveDate>,
    /// Reference number; may carry a credit-note marker prefix.
    pub reference: String,
    /// Counterparty name.
    pub counterparty: String,
    /// Category label (key into the category registry).
    pub category: String,
    /// Net amount; negative means credit/correction.
    pub net_amount: Decimal,
    /// Nominal VAT rate in percent (normalized, any value accepted).
    pub vat_rate_percent: Decimal,
    /// Cumulative settled amount (gross).
    pub paid_amount: Decimal,
    /// Date of (first) settlement.
    pub payment_date: Option<NaiveDate>,
    /// Payment method.
    pub payment_method: Option<String>,
}

/// Relative tolerance for the paid-versus-gross comparison (0.1 percent).
fn status_tolerance(gross: Decimal) -> Decimal {
    gross.abs() * Decimal::new(1, 3)
}

impl LedgerRecord {
    /// VAT amount derived from net and rate.
    #[must_use]
    pub fn vat_amount(&self) -> Decimal {
        self.net_amount * self.vat_rate_percent / Decimal::ONE_HUNDRED
    }

    /// Gross amount (net plus VAT).
    #[must_use]
    pub fn gross_amount(&self) -> Decimal {
        self.net_amount + self.vat_amount()
    }

    /// Net amount still outstanding, never negative.
    #[must_use]
    pub fn remaining_net(&self) -> Decimal {
        let rate_factor = Decimal::ONE + self.vat_rate_percent / Decimal::ONE_HUNDRED;
        let paid_net = if rate_factor.is_zero() {
            self.paid_amount
        } else {
            self.paid_amount / rate_factor
        };
        (self.net_amount - paid_net).max(Decimal::ZERO)
    }

    /// Net amount actually settled so far; negative for reversed credit
    /// notes.
    #[must_use]
    pub fn settled_net(&self) -> Decimal {
        self.net_amount - self.remaining_net()
    }

    /// Payment status from comparing paid to gross within a 0.1 percent
    /// tolerance (absolute amounts).
    #[must_use]
    pub fn payment_status(&self) -> PaymentStatus {
        let paid = self.paid_amount.abs();
        let gross = self.gross_amount().abs();

        if paid.is_zero() {
            PaymentStatus::Open
        } else if paid + status_tolerance(gross) >= gross {
            PaymentStatus::Paid
        } else {
            PaymentStatus::PartiallyPaid
        }
    }

    /// Registers a settlement on this record.
    ///
    /// Increments the paid amount; the payment date and method are written
    /// only if previously empty. First write wins: reconciliation never
    /// overwrites a manually entered payment date. Returns true if the
    /// payment date was written by this call.
    pub fn apply_payment(&mut self, amount: Decimal, date: NaiveDate, method: &str) -> bool {
        self.paid_amount += amount;
        let date_written = self.payment_date.is_none();
        if date_written {
            self.payment_date = Some(date);
        }
        if self.payment_method.is_none() {
            self.payment_method = Some(method.to_string());
        }
        date_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_record(net: Decimal, rate: Decimal, paid: Decimal) -> LedgerRecord {
        LedgerRecord {
            row: 2,
            side: RecordSide::Income,
            date: NaiveDate::from_ymd_opt(2026, 1, 10),
            reference: "RE-2026-001".to_string(),
            counterparty: "Acme GmbH".to_string(),
            category: "Revenue (standard rate)".to_string(),
            net_amount: net,
            vat_rate_percent: rate,
            paid_amount: paid,
            payment_date: None,
            payment_method: None,
        }
    }

    #[test]
    fn test_vat_and_gross_derivation() {
        let record = make_record(dec!(1000), dec!(19), Decimal::ZERO);
        assert_eq!(record.vat_amount(), dec!(190));
        assert_eq!(record.gross_amount(), dec!(1190));
    }

    #[test]
    fn test_remaining_net_halves_on_half_payment() {
        let record = make_record(dec!(5000), dec!(19), dec!(2975));
        assert_eq!(record.remaining_net(), dec!(2500));
        assert_eq!(record.settled_net(), dec!(2500));
    }

    #[test]
    fn test_remaining_net_clamped_at_zero() {
        let record = make_record(dec!(100), dec!(19), dec!(500));
        assert_eq!(record.remaining_net(), Decimal::ZERO);
    }

    #[test]
    fn test_payment_status_transitions() {
        assert_eq!(
            make_record(dec!(1000), dec!(19), Decimal::ZERO).payment_status(),
            PaymentStatus::Open
        );
        assert_eq!(
            make_record(dec!(1000), dec!(19), dec!(500)).payment_status(),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(
            make_record(dec!(1000), dec!(19), dec!(1190)).payment_status(),
            PaymentStatus::Paid
        );
        // Within the 0.1 percent tolerance counts as paid.
        assert_eq!(
            make_record(dec!(1000), dec!(19), dec!(1189.50)).payment_status(),
            PaymentStatus::Paid
        );
    }

    #[test]
    fn test_credit_note_settled_net_is_negative() {
        let mut record = make_record(dec!(-500), dec!(19), Decimal::ZERO);
        record.apply_payment(dec!(-595), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(), "bank");
        assert_eq!(record.settled_net(), dec!(-500));
    }

    #[test]
    fn test_apply_payment_first_write_wins() {
        let mut record = make_record(dec!(1000), dec!(19), Decimal::ZERO);
        let first = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        assert!(record.apply_payment(dec!(500), first, "bank"));
        assert!(!record.apply_payment(dec!(690), second, "cash"));

        assert_eq!(record.paid_amount, dec!(1190));
        assert_eq!(record.payment_date, Some(first));
        assert_eq!(record.payment_method.as_deref(), Some("bank"));
        assert_eq!(record.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn test_zero_rate_remaining_net() {
        let record = make_record(dec!(800), dec!(0), dec!(800));
        assert_eq!(record.remaining_net(), Decimal::ZERO);
        assert_eq!(record.settled_net(), dec!(800));
    }
}
