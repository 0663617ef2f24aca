//! Batch orchestration over the ledger store.
//!
//! A pass reads a bounded snapshot once, computes purely, and writes results
//! back in one batch per logical output. Every pass is idempotent and safe
//! to re-run; structural errors abort before any write.

pub mod service;


pub use service::{Layouts, Pipeline, ReconciliationSummary};
