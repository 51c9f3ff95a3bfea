use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::concept::TargetDemographic;
use crate::domain::{ensure_not_blank, ensure_percentage};
use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub u64);

pub const DEFAULT_PRODUCT_STATUS: &str = "Active";

/// A catalog entry. `ingredients` keeps the comma-separated form it was submitted with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub market_score: f64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub created_date: Option<NaiveDate>,
    pub target_demographics: TargetDemographic,
    pub region: String,
    pub ingredients: String,
    pub flavor_profile: String,
}

impl Product {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_not_blank("name", &self.name)?;
        ensure_percentage("market_score", self.market_score)?;
        Ok(())
    }
}

/// Fields a caller supplies when registering a new product; the score is computed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub target_demographics: TargetDemographic,
    pub region: String,
    pub ingredients: String,
    pub flavor_profile: String,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("category", &self.category)?;
        ensure_not_blank("region", &self.region)?;
        Ok(())
    }
}

fn default_status() -> String {
    DEFAULT_PRODUCT_STATUS.to_string()
}
