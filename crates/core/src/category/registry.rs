//! Static category registry.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::types::{AccountPair, CategoryRule, Classification, ReportingBucket, TaxTreatment};
use crate::record::RecordSide;

/// Category assigned to unmatched movements hitting the shareholder keywords.
pub const SHAREHOLDER_SETTLEMENT: &str = "Shareholder settlement";

/// Category assigned to unmatched movements hitting the transfer keywords.
pub const INTERCOMPANY_TRANSFER: &str = "Intercompany transfer";

/// Built-in rule table. Account codes follow the SKR03 chart.
static BUILTIN_RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    use super::types::{ReportingBucket as Bucket, TaxTreatment as Tax};

    let rule = |label: &str, treatment, bucket, debit: &str, credit: &str, hospitality| {
        CategoryRule {
            label: label.to_string(),
            treatment,
            bucket,
            accounts: AccountPair::new(debit, credit),
            hospitality,
        }
    };

    vec![
        // Income
        rule("Revenue (standard rate)", Tax::TaxableStandard, Bucket::Revenue, "1200", "8400", false),
        rule("Revenue (reduced rate)", Tax::TaxableReduced, Bucket::Revenue, "1200", "8300", false),
        rule("Revenue (exempt domestic)", Tax::ExemptDomestic, Bucket::Revenue, "1200", "8100", false),
        rule("Revenue (exempt foreign)", Tax::ExemptForeign, Bucket::Revenue, "1200", "8125", false),
        // Expenses
        rule("Goods and materials", Tax::TaxableStandard, Bucket::CostOfGoods, "3400", "1200", false),
        rule("Goods (reduced rate)", Tax::TaxableReduced, Bucket::CostOfGoods, "3300", "1200", false),
        rule("Office rent", Tax::ExemptDomestic, Bucket::OperatingExpense, "4210", "1200", false),
        rule("Insurance", Tax::ExemptDomestic, Bucket::OperatingExpense, "4360", "1200", false),
        rule("Foreign services", Tax::ExemptForeign, Bucket::OperatingExpense, "3125", "1200", false),
        rule("Hospitality (self-receipt)", Tax::SelfReceipt, Bucket::Hospitality, "4650", "1200", true),
        // Neutral movements
        rule(SHAREHOLDER_SETTLEMENT, Tax::ExemptDomestic, Bucket::Transfer, "1797", "1200", false),
        rule(INTERCOMPANY_TRANSFER, Tax::ExemptDomestic, Bucket::Transfer, "1590", "1200", false),
        rule("Shareholder loan", Tax::ExemptDomestic, Bucket::ShareholderLoan, "1200", "1705", false),
        rule("Tax provisions", Tax::ExemptDomestic, Bucket::TaxProvision, "0955", "1200", false),
    ]
});

/// Stateless category lookup.
///
/// Classification is a pure function of the label and record side; unknown
/// labels resolve to a safe default and flag themselves so the caller can
/// record a diagnostic.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    rules: HashMap<String, CategoryRule>,
}

impl CategoryRegistry {
    /// Creates a registry with the built-in rule table.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(BUILTIN_RULES.iter().cloned())
    }

    /// Creates a registry from an explicit rule set.
    ///
    /// Later rules win on duplicate labels; lookup is case-insensitive on
    /// the trimmed label.
    #[must_use]
    pub fn with_rules(rules: impl IntoIterator<Item = CategoryRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| (rule.label.trim().to_lowercase(), rule))
            .collect();
        Self { rules }
    }

    /// Returns the rule for a label, if mapped.
    #[must_use]
    pub fn rule(&self, label: &str) -> Option<&CategoryRule> {
        self.rules.get(&label.trim().to_lowercase())
    }

    /// Classifies a category label for a record side.
    ///
    /// Unknown labels resolve to taxable-standard revenue (income side) or
    /// taxable-standard operating expense (expense side) with no account
    /// mapping and `unmapped = true`.
    #[must_use]
    pub fn classify(&self, label: &str, side: RecordSide) -> Classification {
        match self.rule(label) {
            Some(rule) => Classification {
                treatment: rule.treatment,
                bucket: rule.bucket,
                accounts: Some(rule.accounts.clone()),
                hospitality: rule.hospitality,
                unmapped: false,
            },
            None => Classification {
                treatment: TaxTreatment::TaxableStandard,
                bucket: match side {
                    RecordSide::Income => ReportingBucket::Revenue,
                    RecordSide::Expense => ReportingBucket::OperatingExpense,
                },
                accounts: None,
                hospitality: false,
                unmapped: true,
            },
        }
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_income() {
        let registry = CategoryRegistry::new();
        let c = registry.classify("Revenue (standard rate)", RecordSide::Income);
        assert_eq!(c.treatment, TaxTreatment::TaxableStandard);
        assert_eq!(c.bucket, ReportingBucket::Revenue);
        assert_eq!(c.accounts.unwrap().credit, "8400");
        assert!(!c.unmapped);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let registry = CategoryRegistry::new();
        let c = registry.classify("  revenue (REDUCED rate) ", RecordSide::Income);
        assert_eq!(c.treatment, TaxTreatment::TaxableReduced);
        assert!(!c.unmapped);
    }

    #[test]
    fn test_classify_unknown_defaults_by_side() {
        let registry = CategoryRegistry::new();

        let income = registry.classify("Mystery", RecordSide::Income);
        assert_eq!(income.treatment, TaxTreatment::TaxableStandard);
        assert_eq!(income.bucket, ReportingBucket::Revenue);
        assert!(income.accounts.is_none());
        assert!(income.unmapped);

        let expense = registry.classify("Mystery", RecordSide::Expense);
        assert_eq!(expense.bucket, ReportingBucket::OperatingExpense);
        assert!(expense.unmapped);
    }

    #[test]
    fn test_hospitality_flag() {
        let registry = CategoryRegistry::new();
        let c = registry.classify("Hospitality (self-receipt)", RecordSide::Expense);
        assert_eq!(c.treatment, TaxTreatment::SelfReceipt);
        assert!(c.hospitality);
    }

    #[test]
    fn test_custom_rules_extend_builtin() {
        let mut rules: Vec<CategoryRule> = BUILTIN_RULES.clone();
        rules.push(CategoryRule {
            label: "Vehicle costs".to_string(),
            treatment: TaxTreatment::TaxableStandard,
            bucket: ReportingBucket::OperatingExpense,
            accounts: AccountPair::new("4520", "1200"),
            hospitality: false,
        });
        let registry = CategoryRegistry::with_rules(rules);
        assert!(!registry.classify("Vehicle costs", RecordSide::Expense).unmapped);
    }
}
