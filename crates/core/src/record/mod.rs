//! Ledger record model.
//!
//! One record per invoice, expense bill, or self-receipt. Monetary state
//! (VAT amount, gross, remaining balance, payment status) is derived on
//! every read and never persisted as a source of truth.

pub mod row;
pub mod types;
pub mod validation;

pub use row::{from_row, patch_row};
pub use types::{LedgerRecord, PaymentStatus, RecordSide};
pub use validation::validate_record;
