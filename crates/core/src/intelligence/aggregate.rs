//! Reduces a concept's ingredient list into aggregate trend statistics.

use serde::{Deserialize, Serialize};

use super::matcher::{match_ingredient, IngredientMatch};
use super::{mean, DEFAULT_GROWTH_RATE, DEFAULT_POPULARITY};
use crate::domain::trend::TrendRecord;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub avg_popularity: f64,
    pub avg_growth_rate: f64,
    pub trending_count: usize,
    pub total_ingredients: usize,
    pub regional_matches: usize,
    pub category_matches: usize,
}

impl Default for AggregateStats {
    fn default() -> Self {
        Self {
            avg_popularity: DEFAULT_POPULARITY,
            avg_growth_rate: DEFAULT_GROWTH_RATE,
            trending_count: 0,
            total_ingredients: 0,
            regional_matches: 0,
            category_matches: 0,
        }
    }
}

/// Aggregate statistics plus the per-ingredient matches they were derived from.
#[derive(Clone, Debug, PartialEq)]
pub struct IngredientAggregation<'a> {
    pub stats: AggregateStats,
    pub matches: Vec<IngredientMatch<'a>>,
}

pub fn aggregate<'a>(
    ingredients: &'a [String],
    region: &str,
    category: &str,
    trends: &'a [TrendRecord],
) -> IngredientAggregation<'a> {
    let matches: Vec<IngredientMatch<'a>> = ingredients
        .iter()
        .map(|ingredient| match_ingredient(ingredient, region, category, trends))
        .collect();

    // Unmatched ingredients contribute the defaults to the averages but never to the counters.
    let signals: Vec<(f64, f64)> = matches
        .iter()
        .map(|matched| match matched.record {
            Some(record) => (record.popularity_score, record.growth_rate),
            None => (DEFAULT_POPULARITY, DEFAULT_GROWTH_RATE),
        })
        .collect();

    let stats = AggregateStats {
        avg_popularity: mean(signals.iter().map(|(popularity, _)| *popularity))
            .unwrap_or(DEFAULT_POPULARITY),
        avg_growth_rate: mean(signals.iter().map(|(_, growth)| *growth))
            .unwrap_or(DEFAULT_GROWTH_RATE),
        trending_count: matches
            .iter()
            .filter(|matched| matched.record.is_some_and(TrendRecord::is_trending))
            .count(),
        total_ingredients: ingredients.len(),
        regional_matches: matches.iter().filter(|matched| matched.region_matched).count(),
        category_matches: matches.iter().filter(|matched| matched.category_matched).count(),
    };

    IngredientAggregation { stats, matches }
}

#[cfg(test)]
mod tests {
    use super::{aggregate, AggregateStats};
    use crate::domain::trend::TrendRecord;

    fn record(name: &str, region: &str, category: &str, popularity: f64, growth: f64) -> TrendRecord {
        TrendRecord {
            ingredient_name: name.to_string(),
            region: region.to_string(),
            category: category.to_string(),
            popularity_score: popularity,
            growth_rate: growth,
            year: 2024,
            month: 4,
        }
    }

    fn ingredients(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn empty_ingredient_list_uses_default_averages() {
        let result = aggregate(&[], "Europe", "Snacks", &[]);

        assert_eq!(result.stats, AggregateStats::default());
        assert_eq!(result.stats.avg_popularity, 60.0);
        assert_eq!(result.stats.avg_growth_rate, 5.0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn unmatched_ingredients_count_toward_averages_only() {
        let trends = vec![record("Matcha", "Asia Pacific", "Beverages", 94.0, 21.0)];
        let names = ingredients(&["Matcha", "Moonflower"]);

        let stats = aggregate(&names, "Asia Pacific", "Beverages", &trends).stats;

        assert_eq!(stats.total_ingredients, 2);
        assert!((stats.avg_popularity - 77.0).abs() < 1e-9);
        assert!((stats.avg_growth_rate - 13.0).abs() < 1e-9);
        assert_eq!(stats.trending_count, 1);
        assert_eq!(stats.regional_matches, 1);
        assert_eq!(stats.category_matches, 1);
    }

    #[test]
    fn trending_needs_popularity_above_80_and_growth_above_10() {
        let trends = vec![
            record("Ube", "Europe", "Snacks", 85.0, 10.0),
            record("Yuzu", "Europe", "Snacks", 80.0, 25.0),
            record("Kombucha", "Europe", "Snacks", 81.0, 10.5),
        ];
        let names = ingredients(&["Ube", "Yuzu", "Kombucha"]);

        let stats = aggregate(&names, "Europe", "Snacks", &trends).stats;

        assert_eq!(stats.trending_count, 1);
    }

    #[test]
    fn region_and_category_counters_follow_the_matched_record() {
        let trends = vec![
            record("Ube", "Europe", "Bakery", 70.0, 4.0),
            record("Yuzu", "North America", "Snacks", 75.0, 6.0),
        ];
        let names = ingredients(&["Ube", "Yuzu"]);

        let stats = aggregate(&names, "Europe", "Snacks", &trends).stats;

        assert_eq!(stats.regional_matches, 1);
        assert_eq!(stats.category_matches, 1);
    }
}
