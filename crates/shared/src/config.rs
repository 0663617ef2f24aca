//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Fiscal settings.
    #[serde(default)]
    pub fiscal: FiscalConfig,
    /// VAT settings.
    #[serde(default)]
    pub vat: VatConfig,
    /// Bank-movement matcher settings.
    #[serde(default)]
    pub matcher: MatcherConfig,
    /// Aggregation cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Ledger table names.
    #[serde(default)]
    pub tables: TableConfig,
}

/// Fiscal settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FiscalConfig {
    /// The fiscal year all period aggregation is scoped to.
    #[serde(default = "default_fiscal_year")]
    pub year: i32,
    /// Subscribed share capital shown on the balance sheet.
    #[serde(default = "default_share_capital")]
    pub share_capital: Decimal,
    /// Bank balance carried into the first movement of the year.
    #[serde(default)]
    pub opening_bank_balance: Decimal,
}

fn default_fiscal_year() -> i32 {
    2026
}

fn default_share_capital() -> Decimal {
    Decimal::new(25_000, 0)
}

impl Default for FiscalConfig {
    fn default() -> Self {
        Self {
            year: default_fiscal_year(),
            share_capital: default_share_capital(),
            opening_bank_balance: Decimal::ZERO,
        }
    }
}

/// VAT settings.
#[derive(Debug, Clone, Deserialize)]
pub struct VatConfig {
    /// Rate assumed when a record carries an unparseable rate, in percent.
    #[serde(default = "default_rate_percent")]
    pub default_rate_percent: Decimal,
}

fn default_rate_percent() -> Decimal {
    Decimal::new(19, 0)
}

impl Default for VatConfig {
    fn default() -> Self {
        Self {
            default_rate_percent: default_rate_percent(),
        }
    }
}

/// Bank-movement matcher settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    /// Absolute tolerance when comparing a bank amount to an invoice gross.
    #[serde(default = "default_amount_tolerance")]
    pub amount_tolerance: Decimal,
    /// Shortfall fraction of gross beyond which a payment counts as partial.
    #[serde(default = "default_partial_threshold")]
    pub partial_threshold: Decimal,
    /// Prefix marking a reference as a credit note.
    #[serde(default = "default_credit_note_marker")]
    pub credit_note_marker: String,
    /// Keywords routing unmatched movements to the shareholder account.
    #[serde(default = "default_shareholder_keywords")]
    pub shareholder_keywords: Vec<String>,
    /// Keywords routing unmatched movements to the intercompany transfer account.
    #[serde(default = "default_transfer_keywords")]
    pub transfer_keywords: Vec<String>,
    /// Account sentinel for movements needing manual review.
    #[serde(default = "default_review_sentinel")]
    pub review_sentinel: String,
}

fn default_amount_tolerance() -> Decimal {
    Decimal::new(2, 2)
}

fn default_partial_threshold() -> Decimal {
    Decimal::new(1, 1)
}

fn default_credit_note_marker() -> String {
    "GS-".to_string()
}

fn default_shareholder_keywords() -> Vec<String> {
    vec!["shareholder".to_string(), "gesellschafter".to_string()]
}

fn default_transfer_keywords() -> Vec<String> {
    vec!["holding".to_string(), "intercompany".to_string()]
}

fn default_review_sentinel() -> String {
    "REVIEW".to_string()
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            amount_tolerance: default_amount_tolerance(),
            partial_threshold: default_partial_threshold(),
            credit_note_marker: default_credit_note_marker(),
            shareholder_keywords: default_shareholder_keywords(),
            transfer_keywords: default_transfer_keywords(),
            review_sentinel: default_review_sentinel(),
        }
    }
}

/// Aggregation cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached year aggregations.
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
    /// Time-to-live for cached aggregations in seconds.
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

fn default_cache_capacity() -> u64 {
    16
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

/// Ledger table names.
#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    /// Income records table. Required.
    #[serde(default = "default_income_table")]
    pub income: String,
    /// Expense records table. Required.
    #[serde(default = "default_expenses_table")]
    pub expenses: String,
    /// Self-receipt records table. Optional.
    #[serde(default)]
    pub self_receipts: Option<String>,
    /// Bank movements table. Required for reconciliation.
    #[serde(default = "default_bank_table")]
    pub bank: String,
    /// Destination table for rendered VAT declaration rows. Optional.
    #[serde(default)]
    pub vat_report: Option<String>,
    /// Destination table for rendered balance-sheet rows. Optional.
    #[serde(default)]
    pub balance_sheet: Option<String>,
}

fn default_income_table() -> String {
    "Income".to_string()
}

fn default_expenses_table() -> String {
    "Expenses".to_string()
}

fn default_bank_table() -> String {
    "Bank".to_string()
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            income: default_income_table(),
            expenses: default_expenses_table(),
            self_receipts: None,
            bank: default_bank_table(),
            vat_report: None,
            balance_sheet: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KONTOR").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
