//! Consistency checks on ledger records.
//!
//! Violations are warnings, never aborts: the pass completes with full
//! output and reports the findings afterwards.

use chrono::NaiveDate;
use kontor_shared::types::{Diagnostic, DiagnosticCode};

use super::types::{LedgerRecord, PaymentStatus};

/// Checks a record's payment data for internal consistency.
///
/// Paid records must carry a payment date that is neither in the future
/// (relative to `as_of`) nor earlier than the document date; open records
/// must not carry payment details.
#[must_use]
pub fn validate_record(record: &LedgerRecord, as_of: NaiveDate) -> Vec<Diagnostic> {
    let mut findings = Vec::new();
    let label = format!("{} (row {})", record.reference, record.row);

    match record.payment_status() {
        PaymentStatus::Paid | PaymentStatus::PartiallyPaid => match record.payment_date {
            None => findings.push(Diagnostic::warning(
                DiagnosticCode::PaidWithoutDate,
                format!("{label}: paid amount recorded without a payment date"),
            )),
            Some(paid_on) => {
                if paid_on > as_of {
                    findings.push(Diagnostic::warning(
                        DiagnosticCode::FuturePaymentDate,
                        format!("{label}: payment date {paid_on} is in the future"),
                    ));
                }
                if let Some(document_date) = record.date {
                    if paid_on < document_date {
                        findings.push(Diagnostic::warning(
                            DiagnosticCode::PaymentBeforeDocument,
                            format!(
                                "{label}: payment date {paid_on} precedes document date {document_date}"
                            ),
                        ));
                    }
                }
            }
        },
        PaymentStatus::Open => {
            if record.payment_date.is_some() || record.payment_method.is_some() {
                findings.push(Diagnostic::warning(
                    DiagnosticCode::OpenWithPaymentDetails,
                    format!("{label}: open record carries payment details"),
                ));
            }
        }
    }

    findings
}
