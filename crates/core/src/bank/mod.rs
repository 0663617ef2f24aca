//! Bank statement model and movement matching.
//!
//! A bank statement is an ordered sequence of movements with strictly
//! sequential running balances, terminated by a synthetic closing-balance
//! row. The matcher links each movement to the ledger record it settles and
//! classifies the payment.

pub mod matcher;
pub mod statement;

pub use matcher::{KeywordRoute, MatchResolution, MovementMatcher, PaymentKind};
pub use statement::{BankMovement, BankStatement};
