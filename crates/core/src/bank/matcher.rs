//! Bank-movement matcher.
//!
//! For one movement and the candidate pools (partitioned by transaction
//! sign), finds the ledger record the movement settles, classifies the
//! payment against the record's gross amount, and applies the settlement
//! side effects. The matcher never errors on malformed input; anything it
//! cannot resolve falls through to keyword routing or the needs-review
//! sentinel.

use kontor_shared::config::MatcherConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::statement::BankMovement;
use crate::category::{
    AccountPair, CategoryRegistry, INTERCOMPANY_TRANSFER, SHAREHOLDER_SETTLEMENT,
};
use crate::normalize::normalize_text;
use crate::record::{LedgerRecord, RecordSide};

/// Payment classification of a matched movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Bank amount covers the gross amount within tolerance.
    Full,
    /// The record was already fully settled independently.
    AlreadySettled,
    /// Bank amount falls short of gross by more than the partial threshold.
    Partial,
    /// Bank amount deviates in a way the rules cannot explain.
    Uncertain,
}

/// Keyword route for unmatched movements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordRoute {
    /// Movement on the shareholder settlement account.
    Shareholder,
    /// Intercompany/holding transfer.
    Transfer,
}

/// How a movement was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResolution {
    /// Matched to a ledger record.
    Settlement {
        /// Pool the record came from.
        side: RecordSide,
        /// Index of the record within its pool.
        index: usize,
        /// Payment classification.
        kind: PaymentKind,
        /// True when the match came from the opposite-sign pool
        /// (credit-note/refund interpretation).
        reversed: bool,
    },
    /// Routed to a fixed keyword category.
    Keyword(KeywordRoute),
    /// No match; accounts assigned from the movement's category or the
    /// needs-review sentinel.
    Unmatched,
}

/// Matches bank movements against ledger-record pools.
pub struct MovementMatcher<'a> {
    config: &'a MatcherConfig,
    registry: &'a CategoryRegistry,
}

impl<'a> MovementMatcher<'a> {
    /// Creates a matcher over the given configuration and registry.
    #[must_use]
    pub fn new(config: &'a MatcherConfig, registry: &'a CategoryRegistry) -> Self {
        Self { config, registry }
    }

    /// Matches one movement, annotates it, and applies settlement side
    /// effects to the matched record.
    ///
    /// Re-running over unchanged data is idempotent: annotations come out
    /// identical, settlements are not applied twice, and the credit-note
    /// marker is never double-prefixed.
    pub fn match_movement(
        &self,
        movement: &mut BankMovement,
        income: &mut [LedgerRecord],
        expense: &mut [LedgerRecord],
    ) -> MatchResolution {
        let reference = movement.reference.trim().to_string();
        if reference.is_empty() || movement.amount.is_zero() {
            return self.resolve_without_record(movement, &reference);
        }

        let primary = if movement.amount > Decimal::ZERO {
            RecordSide::Income
        } else {
            RecordSide::Expense
        };

        // Direct match always takes priority over the reversed-sign fallback.
        for (side, reversed) in [(primary, false), (opposite(primary), true)] {
            let pool: &mut [LedgerRecord] = match side {
                RecordSide::Income => &mut *income,
                RecordSide::Expense => &mut *expense,
            };
            if let Some(index) = self.find_candidate(&reference, pool) {
                let kind = self.settle(movement, &mut pool[index], reversed);
                return MatchResolution::Settlement {
                    side,
                    index,
                    kind,
                    reversed,
                };
            }
        }

        self.resolve_without_record(movement, &reference)
    }

    /// Runs the four-step reference ladder over a pool. First hit wins;
    /// each step scans the whole pool before the next, weaker step runs.
    fn find_candidate(&self, reference: &str, pool: &[LedgerRecord]) -> Option<usize> {
        let keys: Vec<String> = pool
            .iter()
            .map(|record| self.strip_marker(record.reference.trim()).to_string())
            .collect();

        // 1. Exact reference equality.
        if let Some(index) = keys
            .iter()
            .position(|key| !key.is_empty() && key.as_str() == reference)
        {
            return Some(index);
        }

        // 2. Equality of the normalized-text forms.
        let normalized = normalize_text(reference);
        if !normalized.is_empty() {
            if let Some(index) = keys
                .iter()
                .position(|key| !key.is_empty() && normalize_text(key) == normalized)
            {
                return Some(index);
            }
        }

        // 3. Substring containment in either direction.
        if let Some(index) = keys
            .iter()
            .position(|key| !key.is_empty() && (reference.contains(key.as_str()) || key.contains(reference)))
        {
            return Some(index);
        }

        // 4. Containment over the normalized forms.
        if !normalized.is_empty() {
            if let Some(index) = keys.iter().position(|key| {
                let key = normalize_text(key);
                !key.is_empty() && (normalized.contains(&key) || key.contains(&normalized))
            }) {
                return Some(index);
            }
        }

        None
    }

    /// Classifies the payment and applies the settlement side effects.
    fn settle(
        &self,
        movement: &mut BankMovement,
        record: &mut LedgerRecord,
        reversed: bool,
    ) -> PaymentKind {
        let tolerance = self.config.amount_tolerance;
        let bank = movement.amount.abs();
        let gross = record.gross_amount().abs();
        let paid = record.paid_amount.abs();

        let kind = if !paid.is_zero() && (paid - gross).abs() <= tolerance {
            PaymentKind::AlreadySettled
        } else if (bank - gross).abs() <= tolerance {
            PaymentKind::Full
        } else if bank < gross {
            if gross - bank > self.config.partial_threshold * gross {
                PaymentKind::Partial
            } else {
                // Sub-threshold shortfall (fees, rounding noise) still counts
                // as a full payment.
                PaymentKind::Full
            }
        } else {
            PaymentKind::Uncertain
        };

        if matches!(kind, PaymentKind::Full | PaymentKind::Partial) {
            // Idempotence guard: skip when this movement's amount is already
            // reflected on the record.
            let already_applied =
                record.payment_date.is_some() && (paid - bank).abs() <= tolerance;
            if !already_applied {
                if let Some(date) = movement.date {
                    let signed = if record.gross_amount() < Decimal::ZERO {
                        -bank
                    } else {
                        bank
                    };
                    record.apply_payment(signed, date, "bank");
                }
            }
        }

        // A reversed-sign resolution marks the record as a credit note,
        // exactly once.
        if reversed && !record.reference.starts_with(&self.config.credit_note_marker) {
            record.reference =
                format!("{}{}", self.config.credit_note_marker, record.reference);
        }

        let key = self.strip_marker(record.reference.trim()).to_string();
        movement.annotation = Some(self.settlement_annotation(movement, record, kind, reversed, &key));
        movement.category = Some(record.category.clone());

        let classification = self.registry.classify(&record.category, record.side);
        let accounts = classification
            .accounts
            .unwrap_or_else(|| self.review_accounts());
        let accounts = if reversed { accounts.swapped() } else { accounts };
        movement.debit_account = Some(accounts.debit);
        movement.credit_account = Some(accounts.credit);

        kind
    }

    /// Builds the stable, human-readable settlement annotation.
    fn settlement_annotation(
        &self,
        movement: &BankMovement,
        record: &LedgerRecord,
        kind: PaymentKind,
        reversed: bool,
        key: &str,
    ) -> String {
        let mut annotation = match kind {
            PaymentKind::Full | PaymentKind::AlreadySettled => format!("✓ Full payment · {key}"),
            PaymentKind::Partial => format!("➤ Partial payment · {key}"),
            PaymentKind::Uncertain => {
                let difference = (movement.amount.abs() - record.gross_amount().abs()).abs();
                format!("? Uncertain payment (difference {difference:.2}) · {key}")
            }
        };
        if reversed {
            annotation.push_str(" · credit note");
        }
        // Phrased against the record state, not this run's writes, so a
        // second pass reproduces the identical text.
        if movement.date.is_some() && record.payment_date == movement.date {
            annotation.push_str(" · payment date set");
        }
        annotation
    }

    /// Keyword routing and category-only account assignment for movements
    /// without a record match.
    fn resolve_without_record(
        &self,
        movement: &mut BankMovement,
        reference: &str,
    ) -> MatchResolution {
        let haystack = reference.to_lowercase();

        let route = if contains_any(&haystack, &self.config.shareholder_keywords) {
            Some((KeywordRoute::Shareholder, SHAREHOLDER_SETTLEMENT))
        } else if contains_any(&haystack, &self.config.transfer_keywords) {
            Some((KeywordRoute::Transfer, INTERCOMPANY_TRANSFER))
        } else {
            None
        };

        if let Some((route, category)) = route {
            let side = if movement.amount >= Decimal::ZERO {
                RecordSide::Income
            } else {
                RecordSide::Expense
            };
            let accounts = self
                .registry
                .classify(category, side)
                .accounts
                .unwrap_or_else(|| self.review_accounts());
            movement.category = Some(category.to_string());
            movement.annotation = Some(category.to_string());
            movement.debit_account = Some(accounts.debit);
            movement.credit_account = Some(accounts.credit);
            return MatchResolution::Keyword(route);
        }

        // No match: keep any pre-assigned category and derive accounts from
        // it; otherwise fall back to the needs-review sentinel.
        let accounts = movement
            .category
            .as_deref()
            .map(|category| {
                let side = if movement.amount >= Decimal::ZERO {
                    RecordSide::Income
                } else {
                    RecordSide::Expense
                };
                self.registry
                    .classify(category, side)
                    .accounts
                    .unwrap_or_else(|| self.review_accounts())
            })
            .unwrap_or_else(|| self.review_accounts());

        movement.annotation = Some("⚠ No match".to_string());
        movement.debit_account = Some(accounts.debit);
        movement.credit_account = Some(accounts.credit);
        MatchResolution::Unmatched
    }

    fn review_accounts(&self) -> AccountPair {
        AccountPair::new(
            self.config.review_sentinel.clone(),
            self.config.review_sentinel.clone(),
        )
    }

    fn strip_marker<'s>(&self, reference: &'s str) -> &'s str {
        reference
            .strip_prefix(&self.config.credit_note_marker)
            .unwrap_or(reference)
    }
}

fn opposite(side: RecordSide) -> RecordSide {
    match side {
        RecordSide::Income => RecordSide::Expense,
        RecordSide::Expense => RecordSide::Income,
    }
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && haystack.contains(&keyword.to_lowercase()))
}
