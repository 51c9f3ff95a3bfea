use serde::{Deserialize, Serialize};

use crate::domain::{ensure_finite, ensure_not_blank, ensure_percentage};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    pub company_name: String,
    pub market_share: f64,
    pub average_score: f64,
    pub growth_trend: f64,
    pub founded_year: i32,
}

impl CompetitorRecord {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_not_blank("company_name", &self.company_name)?;
        ensure_percentage("market_share", self.market_share)?;
        ensure_percentage("average_score", self.average_score)?;
        ensure_finite("growth_trend", self.growth_trend)?;
        if self.founded_year < 0 {
            return Err(DomainError::invalid_field(
                "founded_year",
                format!("must not be negative, got {}", self.founded_year),
            ));
        }
        Ok(())
    }
}
