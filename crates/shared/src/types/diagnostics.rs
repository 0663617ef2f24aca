//! Diagnostics collected during a bookkeeping pass.
//!
//! A pass favors best-effort complete output over aborting: recoverable
//! problems (unknown categories, inconsistent payment data, an unbalanced
//! balance sheet) are collected here and reported to the caller after the
//! pass completes.

use serde::{Deserialize, Serialize};

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational; no action required.
    Info,
    /// Something is inconsistent but the pass produced complete output.
    Warning,
}

/// Machine-readable diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCode {
    /// A record's category has no registry mapping; a default bucket was used.
    CategoryUnmapped,
    /// A record is fully paid but carries no payment date.
    PaidWithoutDate,
    /// A record's payment date lies in the future.
    FuturePaymentDate,
    /// A record's payment date precedes its document date.
    PaymentBeforeDocument,
    /// An open record carries payment details.
    OpenWithPaymentDetails,
    /// The two balance-sheet sides differ by more than the tolerance.
    UnbalancedBalanceSheet,
    /// A bank movement could not be matched to any record.
    MovementUnmatched,
}

/// One non-fatal finding from a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the finding.
    pub severity: Severity,
    /// Machine-readable code.
    pub code: DiagnosticCode,
    /// Human-readable description.
    pub message: String,
}

impl Diagnostic {
    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    /// Creates an informational diagnostic.
    #[must_use]
    pub fn info(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            code,
            message: message.into(),
        }
    }
}
