use serde::{Deserialize, Serialize};

use crate::domain::{ensure_not_blank, ensure_percentage};
use crate::errors::DomainError;

/// A previously completed analysis, used as the comparison corpus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoricalAnalysis {
    pub category: String,
    pub product_name: String,
    #[serde(default)]
    pub market_demand: Option<f64>,
    #[serde(default)]
    pub competition_level: Option<f64>,
    #[serde(default)]
    pub overall_score: Option<f64>,
}

impl HistoricalAnalysis {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_not_blank("product_name", &self.product_name)?;
        if let Some(value) = self.market_demand {
            ensure_percentage("market_demand", value)?;
        }
        if let Some(value) = self.competition_level {
            ensure_percentage("competition_level", value)?;
        }
        if let Some(value) = self.overall_score {
            ensure_percentage("overall_score", value)?;
        }
        Ok(())
    }
}
