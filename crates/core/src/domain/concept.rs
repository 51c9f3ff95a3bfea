use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Audience band a concept is aimed at. Unrecognized labels collapse to `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetDemographic {
    Age18To25,
    Age26To35,
    Age35To45,
    Age45Plus,
    Other,
}

impl TargetDemographic {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "18-25" => Self::Age18To25,
            "26-35" => Self::Age26To35,
            "35-45" => Self::Age35To45,
            "45+" => Self::Age45Plus,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age18To25 => "18-25",
            Self::Age26To35 => "26-35",
            Self::Age35To45 => "35-45",
            Self::Age45Plus => "45+",
            Self::Other => "other",
        }
    }
}

impl From<String> for TargetDemographic {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<TargetDemographic> for String {
    fn from(value: TargetDemographic) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TargetDemographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A caller-supplied product idea; lives only for the duration of one scoring call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductConcept {
    pub ingredients: Vec<String>,
    pub category: String,
    pub region: String,
    pub target_demographics: TargetDemographic,
}

impl ProductConcept {
    pub fn new(
        ingredients: Vec<String>,
        category: impl Into<String>,
        region: impl Into<String>,
        target_demographics: TargetDemographic,
    ) -> Self {
        Self { ingredients, category: category.into(), region: region.into(), target_demographics }
    }

    /// Builds a concept from a comma-separated ingredient list such as `"Matcha, Oat Milk"`.
    pub fn from_ingredient_list(
        ingredients: &str,
        category: impl Into<String>,
        region: impl Into<String>,
        target_demographics: TargetDemographic,
    ) -> Self {
        Self::new(split_ingredients(ingredients), category, region, target_demographics)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        for (index, ingredient) in self.ingredients.iter().enumerate() {
            if ingredient.trim().is_empty() {
                return Err(DomainError::invalid_field(
                    format!("ingredients[{index}]"),
                    "ingredient name must not be blank",
                ));
            }
        }
        Ok(())
    }
}

pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ingredient| !ingredient.is_empty())
        .map(str::to_string)
        .collect()
}
