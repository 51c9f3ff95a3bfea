//! Resolves an ingredient name to its single most relevant trend record.

use serde::Serialize;
use tracing::debug;

use crate::domain::trend::TrendRecord;

/// Relevance tiers, most specific first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    RegionAndCategory,
    RegionOnly,
    CategoryOnly,
    AnyRecord,
}

impl MatchTier {
    pub const PRIORITY: [MatchTier; 4] =
        [Self::RegionAndCategory, Self::RegionOnly, Self::CategoryOnly, Self::AnyRecord];

    fn admits(self, record: &TrendRecord, region: &str, category: &str) -> bool {
        match self {
            Self::RegionAndCategory => record.region == region && record.category == category,
            Self::RegionOnly => record.region == region,
            Self::CategoryOnly => record.category == category,
            Self::AnyRecord => true,
        }
    }
}

/// Outcome of resolving one ingredient of a concept.
#[derive(Clone, Debug, PartialEq)]
pub struct IngredientMatch<'a> {
    pub ingredient: &'a str,
    pub record: Option<&'a TrendRecord>,
    pub tier: Option<MatchTier>,
    pub region_matched: bool,
    pub category_matched: bool,
}

/// Returns the best record for `ingredient`, or `None` when the name is unknown.
///
/// Tiers short-circuit: the first tier with any candidate wins, and within a tier the
/// record encountered last in snapshot order is taken.
pub fn find_best_match<'a>(
    ingredient: &str,
    region: &str,
    category: &str,
    trends: &'a [TrendRecord],
) -> Option<&'a TrendRecord> {
    resolve(ingredient, region, category, trends).map(|(_, record)| record)
}

pub fn match_ingredient<'a>(
    ingredient: &'a str,
    region: &str,
    category: &str,
    trends: &'a [TrendRecord],
) -> IngredientMatch<'a> {
    match resolve(ingredient, region, category, trends) {
        Some((tier, record)) => IngredientMatch {
            ingredient,
            record: Some(record),
            tier: Some(tier),
            region_matched: record.region == region,
            category_matched: record.category == category,
        },
        None => IngredientMatch {
            ingredient,
            record: None,
            tier: None,
            region_matched: false,
            category_matched: false,
        },
    }
}

fn resolve<'a>(
    ingredient: &str,
    region: &str,
    category: &str,
    trends: &'a [TrendRecord],
) -> Option<(MatchTier, &'a TrendRecord)> {
    let needle = ingredient.trim().to_lowercase();
    let candidates: Vec<&TrendRecord> =
        trends.iter().filter(|record| record.names_ingredient(&needle)).collect();
    if candidates.is_empty() {
        debug!(event_name = "market.match.unknown_ingredient", ingredient, "no trend records");
        return None;
    }

    let resolved = MatchTier::PRIORITY.into_iter().find_map(|tier| {
        candidates
            .iter()
            .rev()
            .find(|record| tier.admits(record, region, category))
            .map(|record| (tier, *record))
    });

    if let Some((tier, _)) = resolved {
        debug!(
            event_name = "market.match.resolved",
            ingredient,
            tier = ?tier,
            candidate_count = candidates.len(),
            "trend record selected"
        );
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::{find_best_match, match_ingredient, MatchTier};
    use crate::domain::trend::TrendRecord;

    fn record(name: &str, region: &str, category: &str, popularity: f64) -> TrendRecord {
        TrendRecord {
            ingredient_name: name.to_string(),
            region: region.to_string(),
            category: category.to_string(),
            popularity_score: popularity,
            growth_rate: 5.0,
            year: 2024,
            month: 6,
        }
    }

    fn all_tiers() -> Vec<TrendRecord> {
        vec![
            record("Matcha", "Europe", "Snacks", 10.0),
            record("Matcha", "Europe", "Beverages", 20.0),
            record("Matcha", "Asia Pacific", "Snacks", 30.0),
            record("Matcha", "Asia Pacific", "Beverages", 40.0),
            record("Matcha", "North America", "Dairy", 50.0),
        ]
    }

    #[test]
    fn region_and_category_match_wins_over_every_other_tier() {
        let trends = all_tiers();

        let best = find_best_match("Matcha", "Asia Pacific", "Beverages", &trends)
            .expect("matcha is known");

        assert_eq!(best.popularity_score, 40.0);
    }

    #[test]
    fn region_only_beats_category_only() {
        let trends = vec![
            record("Matcha", "Europe", "Beverages", 20.0),
            record("Matcha", "Asia Pacific", "Snacks", 30.0),
        ];

        let matched = match_ingredient("Matcha", "Asia Pacific", "Beverages", &trends);

        assert_eq!(matched.tier, Some(MatchTier::RegionOnly));
        assert!(matched.region_matched);
        assert!(!matched.category_matched);
    }

    #[test]
    fn category_only_beats_any_record() {
        let trends = vec![
            record("Matcha", "North America", "Dairy", 50.0),
            record("Matcha", "Europe", "Beverages", 20.0),
            record("Matcha", "Latin America", "Dairy", 60.0),
        ];

        let matched = match_ingredient("Matcha", "Asia Pacific", "Beverages", &trends);

        assert_eq!(matched.tier, Some(MatchTier::CategoryOnly));
        assert_eq!(matched.record.map(|r| r.popularity_score), Some(20.0));
    }

    #[test]
    fn any_record_is_used_only_when_nothing_else_matches() {
        let trends = vec![
            record("Matcha", "North America", "Dairy", 50.0),
            record("Matcha", "Latin America", "Dairy", 60.0),
        ];

        let matched = match_ingredient("Matcha", "Asia Pacific", "Beverages", &trends);

        assert_eq!(matched.tier, Some(MatchTier::AnyRecord));
        assert_eq!(matched.record.map(|r| r.popularity_score), Some(60.0));
        assert!(!matched.region_matched && !matched.category_matched);
    }

    #[test]
    fn trailing_record_wins_within_a_tier() {
        let trends = vec![
            record("Matcha", "Asia Pacific", "Beverages", 40.0),
            record("Matcha", "Asia Pacific", "Beverages", 45.0),
        ];

        let best = find_best_match("Matcha", "Asia Pacific", "Beverages", &trends)
            .expect("matcha is known");

        assert_eq!(best.popularity_score, 45.0);
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let trends = all_tiers();

        assert!(find_best_match("MATCHA", "Asia Pacific", "Beverages", &trends).is_some());
        assert!(find_best_match("  matcha ", "Asia Pacific", "Beverages", &trends).is_some());
    }

    #[test]
    fn unknown_ingredient_resolves_to_none() {
        let trends = all_tiers();

        let matched = match_ingredient("Dragon Fruit", "Asia Pacific", "Beverages", &trends);

        assert!(matched.record.is_none());
        assert_eq!(matched.tier, None);
        assert!(find_best_match("Dragon Fruit", "Asia Pacific", "Beverages", &trends).is_none());
    }
}
