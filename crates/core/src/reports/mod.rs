//! Periodic tax and management reports.
//!
//! Derives the VAT declaration, the profit-and-loss statement, and the
//! balance sheet from aggregated period buckets.

pub mod composer;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use composer::{BalanceSheetComposer, BalanceSheetInputs};
pub use service::ReportService;
pub use types::{BalanceSheetReport, Period, PnlReport, PnlRow, VatReport, VatRow};
