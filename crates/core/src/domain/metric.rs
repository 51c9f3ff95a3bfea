use serde::{Deserialize, Serialize};

use crate::domain::{ensure_finite, ensure_not_blank};
use crate::errors::DomainError;

/// One row of the precomputed dashboard metrics table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetricRow {
    pub metric_name: String,
    pub metric_value: f64,
    pub growth_percentage: f64,
    pub timeframe: String,
    pub region: String,
}

impl DashboardMetricRow {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_not_blank("metric_name", &self.metric_name)?;
        ensure_finite("metric_value", self.metric_value)?;
        ensure_finite("growth_percentage", self.growth_percentage)?;
        Ok(())
    }
}
