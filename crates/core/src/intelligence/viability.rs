//! Single 0..=100 market-viability score for a new concept.

use super::aggregate::aggregate;
use super::matcher::IngredientMatch;
use super::{clamp_score, mean, round_one_decimal};
use crate::domain::concept::{ProductConcept, TargetDemographic};
use crate::domain::trend::TrendRecord;

const POPULARITY_WEIGHT: f64 = 0.5;
const GROWTH_WEIGHT: f64 = 0.35;
const REGION_BONUS: f64 = 8.0;
const CATEGORY_BONUS: f64 = 5.0;
const RECENCY_BONUS: f64 = 3.0;
const RECENCY_YEAR: i32 = 2024;
const RECENCY_FIRST_MONTH: u32 = 10;

/// Score for an ingredient with no trend record at all.
const UNKNOWN_INGREDIENT_SCORE: f64 = 45.0;

/// Score returned for a concept without ingredients.
const EMPTY_CONCEPT_SCORE: f64 = 75.0;

pub fn ingredient_score(matched: &IngredientMatch<'_>) -> f64 {
    let Some(record) = matched.record else {
        return UNKNOWN_INGREDIENT_SCORE;
    };

    let region_bonus = if matched.region_matched { REGION_BONUS } else { 0.0 };
    let category_bonus = if matched.category_matched { CATEGORY_BONUS } else { 0.0 };

    record.popularity_score * POPULARITY_WEIGHT
        + record.growth_rate * GROWTH_WEIGHT
        + region_bonus
        + category_bonus
        + recency_bonus(record)
}

/// Mean ingredient score plus the demographic bonus, clamped and rounded to one decimal.
pub fn score_concept(concept: &ProductConcept, trends: &[TrendRecord]) -> f64 {
    let aggregation = aggregate(&concept.ingredients, &concept.region, &concept.category, trends);

    let Some(average) = mean(aggregation.matches.iter().map(ingredient_score)) else {
        return EMPTY_CONCEPT_SCORE;
    };

    round_one_decimal(clamp_score(average + demographic_bonus(concept.target_demographics)))
}

fn recency_bonus(record: &TrendRecord) -> f64 {
    if record.year == RECENCY_YEAR && record.month >= RECENCY_FIRST_MONTH {
        RECENCY_BONUS
    } else {
        0.0
    }
}

fn demographic_bonus(demographic: TargetDemographic) -> f64 {
    match demographic {
        TargetDemographic::Age18To25 | TargetDemographic::Age26To35 => 2.0,
        TargetDemographic::Age35To45 => 1.0,
        TargetDemographic::Age45Plus | TargetDemographic::Other => 0.0,
    }
}
