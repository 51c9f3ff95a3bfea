use serde::{Deserialize, Serialize};

use crate::domain::{ensure_finite, ensure_not_blank, ensure_percentage};
use crate::errors::DomainError;

/// One time-stamped popularity/growth observation for an ingredient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrendRecord {
    pub ingredient_name: String,
    pub region: String,
    pub category: String,
    /// Popularity on a 0..=100 scale.
    pub popularity_score: f64,
    /// Growth in percent; negative values mean the ingredient is cooling off.
    pub growth_rate: f64,
    pub year: i32,
    pub month: u32,
}

impl TrendRecord {
    pub fn validate(&self) -> Result<(), DomainError> {
        ensure_not_blank("ingredient_name", &self.ingredient_name)?;
        ensure_percentage("popularity_score", self.popularity_score)?;
        ensure_finite("growth_rate", self.growth_rate)?;
        if !(1..=12).contains(&self.month) {
            return Err(DomainError::invalid_field(
                "month",
                format!("must be within 1..=12, got {}", self.month),
            ));
        }
        Ok(())
    }

    pub fn is_trending(&self) -> bool {
        self.popularity_score > 80.0 && self.growth_rate > 10.0
    }

    /// Case-insensitive comparison against a queried ingredient name.
    pub fn names_ingredient(&self, lowered_ingredient: &str) -> bool {
        self.ingredient_name.to_lowercase() == lowered_ingredient
    }

    pub fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::TrendRecord;
    use crate::errors::DomainError;

    fn record() -> TrendRecord {
        TrendRecord {
            ingredient_name: "Matcha".to_string(),
            region: "Asia Pacific".to_string(),
            category: "Beverages".to_string(),
            popularity_score: 94.0,
            growth_rate: 21.2,
            year: 2024,
            month: 11,
        }
    }

    #[test]
    fn valid_record_passes_validation() {
        assert_eq!(record().validate(), Ok(()));
    }

    #[test]
    fn month_out_of_range_is_rejected() {
        let mut invalid = record();
        invalid.month = 13;

        assert!(matches!(
            invalid.validate(),
            Err(DomainError::InvalidField { ref field, .. }) if field == "month"
        ));
    }

    #[test]
    fn popularity_above_scale_is_rejected() {
        let mut invalid = record();
        invalid.popularity_score = 120.0;

        assert!(matches!(
            invalid.validate(),
            Err(DomainError::InvalidField { ref field, .. }) if field == "popularity_score"
        ));
    }

    #[test]
    fn negative_growth_is_allowed() {
        let mut cooling = record();
        cooling.growth_rate = -4.5;
        assert_eq!(cooling.validate(), Ok(()));
    }

    #[test]
    fn trending_requires_both_popularity_and_growth() {
        assert!(record().is_trending());

        let mut flat = record();
        flat.growth_rate = 10.0;
        assert!(!flat.is_trending());

        let mut niche = record();
        niche.popularity_score = 80.0;
        assert!(!niche.is_trending());
    }

    #[test]
    fn ingredient_names_match_case_insensitively() {
        assert!(record().names_ingredient("matcha"));
        assert!(!record().names_ingredient("matcha latte"));
    }
}
