//! Report generation service.

use crate::aggregate::YearAggregation;

use super::types::{Period, PnlReport, PnlRow, VatReport, VatRow};

/// Service for deriving periodic reports from a year aggregation.
pub struct ReportService;

impl ReportService {
    /// Generates the VAT declaration: one row per month and quarter plus
    /// the annual row. Quarter and year rows are sums of their months.
    #[must_use]
    pub fn generate_vat_report(aggregation: &YearAggregation) -> VatReport {
        let months = aggregation
            .months
            .iter()
            .enumerate()
            .map(|(index, bucket)| VatRow::from_bucket(Period::Month(index as u32 + 1), bucket))
            .collect();

        let quarters = (1..=4)
            .filter_map(|quarter| {
                aggregation
                    .quarter(quarter)
                    .map(|bucket| VatRow::from_bucket(Period::Quarter(quarter), &bucket))
            })
            .collect();

        VatReport {
            fiscal_year: aggregation.fiscal_year,
            months,
            quarters,
            year: VatRow::from_bucket(Period::Year, &aggregation.year()),
        }
    }

    /// Generates the profit-and-loss statement over the same period grid.
    #[must_use]
    pub fn generate_profit_and_loss(aggregation: &YearAggregation) -> PnlReport {
        let months = aggregation
            .months
            .iter()
            .enumerate()
            .map(|(index, bucket)| PnlRow::from_bucket(Period::Month(index as u32 + 1), bucket))
            .collect();

        let quarters = (1..=4)
            .filter_map(|quarter| {
                aggregation
                    .quarter(quarter)
                    .map(|bucket| PnlRow::from_bucket(Period::Quarter(quarter), &bucket))
            })
            .collect();

        PnlReport {
            fiscal_year: aggregation.fiscal_year,
            months,
            quarters,
            year: PnlRow::from_bucket(Period::Year, &aggregation.year()),
        }
    }
}
