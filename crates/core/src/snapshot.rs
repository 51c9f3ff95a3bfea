//! Immutable, validated view of the market datasets.
//!
//! A snapshot is built once from the loader's records and then shared behind an `Arc`.
//! Refreshing data means building a new snapshot; nothing here is ever mutated in place.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TrendOrder;
use crate::domain::competitor::CompetitorRecord;
use crate::domain::history::HistoricalAnalysis;
use crate::domain::metric::DashboardMetricRow;
use crate::domain::product::Product;
use crate::domain::trend::TrendRecord;
use crate::errors::DomainError;

/// Raw records as handed over by the dataset loader, before validation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecords {
    #[serde(default)]
    pub trends: Vec<TrendRecord>,
    #[serde(default)]
    pub historical_analyses: Vec<HistoricalAnalysis>,
    #[serde(default)]
    pub competitors: Vec<CompetitorRecord>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub dashboard_metrics: Vec<DashboardMetricRow>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarketSnapshot {
    trends: Vec<TrendRecord>,
    historical_analyses: Vec<HistoricalAnalysis>,
    competitors: Vec<CompetitorRecord>,
    products: Vec<Product>,
    dashboard_metrics: Vec<DashboardMetricRow>,
}

impl MarketSnapshot {
    pub fn new(records: SnapshotRecords, trend_order: TrendOrder) -> Result<Self, DomainError> {
        let SnapshotRecords {
            mut trends,
            historical_analyses,
            competitors,
            products,
            dashboard_metrics,
        } = records;

        validate_all("trends", &trends, TrendRecord::validate)?;
        validate_all("historical_analyses", &historical_analyses, HistoricalAnalysis::validate)?;
        validate_all("competitors", &competitors, CompetitorRecord::validate)?;
        validate_all("products", &products, Product::validate)?;
        validate_all("dashboard_metrics", &dashboard_metrics, DashboardMetricRow::validate)?;

        if trend_order == TrendOrder::Chronological {
            // Stable sort: records from the same period keep their stored relative order.
            trends.sort_by_key(TrendRecord::period);
        }

        debug!(
            event_name = "market.snapshot.built",
            trend_count = trends.len(),
            analysis_count = historical_analyses.len(),
            competitor_count = competitors.len(),
            product_count = products.len(),
            trend_order = ?trend_order,
            "market snapshot validated"
        );

        Ok(Self { trends, historical_analyses, competitors, products, dashboard_metrics })
    }

    pub fn trends(&self) -> &[TrendRecord] {
        &self.trends
    }

    pub fn historical_analyses(&self) -> &[HistoricalAnalysis] {
        &self.historical_analyses
    }

    pub fn competitors(&self) -> &[CompetitorRecord] {
        &self.competitors
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn dashboard_metrics(&self) -> &[DashboardMetricRow] {
        &self.dashboard_metrics
    }
}

fn validate_all<T>(
    collection: &str,
    records: &[T],
    validate: impl Fn(&T) -> Result<(), DomainError>,
) -> Result<(), DomainError> {
    records
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| {
            validate(record).map_err(|error| error.within(&format!("{collection}[{index}]")))
        })
}

#[cfg(test)]
mod tests {
    use super::{MarketSnapshot, SnapshotRecords};
    use crate::config::TrendOrder;
    use crate::domain::trend::TrendRecord;
    use crate::errors::DomainError;

    fn trend(year: i32, month: u32, popularity: f64) -> TrendRecord {
        TrendRecord {
            ingredient_name: "Turmeric".to_string(),
            region: "Europe".to_string(),
            category: "Beverages".to_string(),
            popularity_score: popularity,
            growth_rate: 6.0,
            year,
            month,
        }
    }

    #[test]
    fn stored_order_is_preserved_by_default() {
        let records = SnapshotRecords {
            trends: vec![trend(2024, 11, 70.0), trend(2023, 2, 50.0)],
            ..SnapshotRecords::default()
        };

        let snapshot = MarketSnapshot::new(records, TrendOrder::Stored).expect("valid snapshot");

        let periods: Vec<_> = snapshot.trends().iter().map(TrendRecord::period).collect();
        assert_eq!(periods, vec![(2024, 11), (2023, 2)]);
    }

    #[test]
    fn chronological_order_sorts_by_year_then_month() {
        let records = SnapshotRecords {
            trends: vec![trend(2024, 11, 70.0), trend(2023, 2, 50.0), trend(2024, 3, 60.0)],
            ..SnapshotRecords::default()
        };

        let snapshot =
            MarketSnapshot::new(records, TrendOrder::Chronological).expect("valid snapshot");

        let periods: Vec<_> = snapshot.trends().iter().map(TrendRecord::period).collect();
        assert_eq!(periods, vec![(2023, 2), (2024, 3), (2024, 11)]);
    }

    #[test]
    fn invalid_record_is_reported_with_collection_path() {
        let records = SnapshotRecords {
            trends: vec![trend(2024, 1, 50.0), trend(2024, 2, f64::INFINITY)],
            ..SnapshotRecords::default()
        };

        let error = MarketSnapshot::new(records, TrendOrder::Stored)
            .expect_err("infinite popularity should be rejected");

        assert!(matches!(
            error,
            DomainError::InvalidField { ref field, .. } if field == "trends[1].popularity_score"
        ));
    }
}
