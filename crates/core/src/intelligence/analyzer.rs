//! Multi-component concept analysis: demand, trend alignment, competition, innovation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::aggregate::{aggregate, AggregateStats};
use super::comparable::{find_comparable, ComparableSet, ComparableTier};
use super::{clamp_score, mean, round_one_decimal};
use crate::domain::concept::ProductConcept;
use crate::domain::history::HistoricalAnalysis;
use crate::domain::trend::TrendRecord;

const FALLBACK_SIMILAR_DEMAND: f64 = 75.0;
const FALLBACK_SIMILAR_COMPETITION: f64 = 80.0;
const FALLBACK_SATURATION: f64 = 50.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreBundle {
    pub market_demand: f64,
    pub ingredient_trends: f64,
    pub competition_level: f64,
    pub innovation_factor: f64,
    pub overall_score: f64,
}

impl ScoreBundle {
    /// Weighted blend; competition counts inversely.
    fn compose(
        market_demand: f64,
        ingredient_trends: f64,
        competition_level: f64,
        innovation_factor: f64,
    ) -> Self {
        let overall_score = clamp_score(
            market_demand * 0.25
                + ingredient_trends * 0.25
                + (100.0 - competition_level) * 0.20
                + innovation_factor * 0.30,
        );
        Self { market_demand, ingredient_trends, competition_level, innovation_factor, overall_score }
    }

    pub fn rounded(&self) -> Self {
        Self {
            market_demand: round_one_decimal(self.market_demand),
            ingredient_trends: round_one_decimal(self.ingredient_trends),
            competition_level: round_one_decimal(self.competition_level),
            innovation_factor: round_one_decimal(self.innovation_factor),
            overall_score: round_one_decimal(self.overall_score),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConceptAnalysis {
    /// Exposed scores, rounded to one decimal.
    pub scores: ScoreBundle,
    pub stats: AggregateStats,
    pub comparable_tier: ComparableTier,
    pub comparable_count: usize,
}

pub fn analyze(
    concept: &ProductConcept,
    trends: &[TrendRecord],
    analyses: &[HistoricalAnalysis],
) -> ConceptAnalysis {
    let stats = aggregate(&concept.ingredients, &concept.region, &concept.category, trends).stats;
    let comparable = find_comparable(concept, analyses);

    let scores = ScoreBundle::compose(
        market_demand(&stats, &comparable),
        clamp_score(stats.avg_popularity),
        competition_level(concept, analyses, &comparable),
        innovation_factor(&stats, comparable.len()),
    );

    debug!(
        event_name = "market.analysis.completed",
        category = %concept.category,
        region = %concept.region,
        comparable_tier = ?comparable.tier,
        comparable_count = comparable.len(),
        overall_score = scores.overall_score,
        "concept analysis completed"
    );

    ConceptAnalysis {
        scores: scores.rounded(),
        stats,
        comparable_tier: comparable.tier,
        comparable_count: comparable.len(),
    }
}

fn market_demand(stats: &AggregateStats, comparable: &ComparableSet<'_>) -> f64 {
    let similar_demand =
        mean(comparable.analyses.iter().filter_map(|analysis| analysis.market_demand))
            .unwrap_or(FALLBACK_SIMILAR_DEMAND);
    let trending_bonus = (stats.trending_count as f64 * 3.0).min(10.0);
    let match_bonus = (stats.regional_matches + stats.category_matches) as f64 * 2.0;

    clamp_score(stats.avg_popularity * 0.4 + similar_demand * 0.4 + trending_bonus + match_bonus)
}

fn competition_level(
    concept: &ProductConcept,
    analyses: &[HistoricalAnalysis],
    comparable: &ComparableSet<'_>,
) -> f64 {
    let saturation = if analyses.is_empty() {
        FALLBACK_SATURATION
    } else {
        let same_category =
            analyses.iter().filter(|analysis| analysis.category == concept.category).count();
        same_category as f64 / analyses.len() as f64 * 100.0
    };
    let similarity_competition = (comparable.len() as f64 * 2.0).min(50.0);
    let similar_competition =
        mean(comparable.analyses.iter().filter_map(|analysis| analysis.competition_level))
            .unwrap_or(FALLBACK_SIMILAR_COMPETITION);

    clamp_score(saturation * 0.3 + similarity_competition * 0.3 + similar_competition * 0.4)
}

fn innovation_factor(stats: &AggregateStats, comparable_count: usize) -> f64 {
    let growth_component = stats.avg_growth_rate.min(15.0);
    let trending_component = stats.trending_count as f64 * 5.0;
    let novelty_component = (10.0 - comparable_count as f64).max(0.0);
    let crowding_penalty = if comparable_count > 15 { 5.0 } else { 0.0 };

    clamp_score(70.0 + growth_component + trending_component + novelty_component - crowding_penalty)
}

#[cfg(test)]
mod tests {
    use super::analyze;
    use crate::domain::concept::{ProductConcept, TargetDemographic};
    use crate::domain::history::HistoricalAnalysis;
    use crate::domain::trend::TrendRecord;
    use crate::intelligence::ComparableTier;

    fn matcha(popularity: f64, growth: f64) -> TrendRecord {
        TrendRecord {
            ingredient_name: "Matcha".to_string(),
            region: "Asia Pacific".to_string(),
            category: "Beverages".to_string(),
            popularity_score: popularity,
            growth_rate: growth,
            year: 2024,
            month: 8,
        }
    }

    fn analysis(
        category: &str,
        name: &str,
        demand: Option<f64>,
        competition: Option<f64>,
    ) -> HistoricalAnalysis {
        HistoricalAnalysis {
            category: category.to_string(),
            product_name: name.to_string(),
            market_demand: demand,
            competition_level: competition,
            overall_score: None,
        }
    }

    fn concept(ingredients: &[&str]) -> ProductConcept {
        ProductConcept::new(
            ingredients.iter().map(|name| name.to_string()).collect(),
            "Beverages",
            "Asia Pacific",
            TargetDemographic::Age26To35,
        )
    }

    fn assert_in_range(value: f64) {
        assert!((0.0..=100.0).contains(&value), "score {value} outside 0..=100");
    }

    #[test]
    fn scores_blend_aggregates_and_comparables() {
        let trends = vec![matcha(94.0, 21.2)];
        let corpus = vec![
            analysis("Beverages", "Cold Brew Tonic", Some(80.0), Some(60.0)),
            analysis("Beverages", "Hibiscus Spritz", Some(70.0), Some(90.0)),
            analysis("Snacks", "Seaweed Crisps", Some(40.0), Some(30.0)),
            analysis("Snacks", "Ube Bites", None, None),
        ];

        let result = analyze(&concept(&["Matcha"]), &trends, &corpus);

        assert_eq!(result.comparable_tier, ComparableTier::SameCategory);
        assert_eq!(result.comparable_count, 2);
        // 94*0.4 + 75*0.4 + min(10, 3) + (1+1)*2
        assert_eq!(result.scores.market_demand, 74.6);
        assert_eq!(result.scores.ingredient_trends, 94.0);
        // 50*0.3 + 4*0.3 + 75*0.4
        assert_eq!(result.scores.competition_level, 46.2);
        // 70 + 15 + 5 + 8
        assert_eq!(result.scores.innovation_factor, 98.0);
        // 74.6*0.25 + 94*0.25 + 53.8*0.2 + 98*0.3
        assert_eq!(result.scores.overall_score, 82.3);
    }

    #[test]
    fn empty_inputs_fall_back_to_documented_defaults() {
        let result = analyze(&concept(&[]), &[], &[]);

        assert_eq!(result.comparable_tier, ComparableTier::Benchmark);
        assert_eq!(result.comparable_count, 0);
        assert_eq!(result.scores.market_demand, 54.0);
        assert_eq!(result.scores.ingredient_trends, 60.0);
        assert_eq!(result.scores.competition_level, 47.0);
        assert_eq!(result.scores.innovation_factor, 85.0);
        assert_eq!(result.scores.overall_score, 64.6);
    }

    #[test]
    fn crowded_category_is_penalized() {
        let corpus: Vec<_> = (0..20)
            .map(|index| analysis("Beverages", &format!("Drink {index}"), None, None))
            .collect();

        let result = analyze(&concept(&["Moonflower"]), &[], &corpus);

        assert_eq!(result.comparable_count, 20);
        // 100*0.3 + 40*0.3 + 80*0.4
        assert_eq!(result.scores.competition_level, 74.0);
        // 70 + 5 + 0 + 0 - 5
        assert_eq!(result.scores.innovation_factor, 70.0);
        assert_eq!(result.scores.overall_score, 54.7);
    }

    #[test]
    fn every_score_is_clamped_to_the_percentage_scale() {
        let trends = vec![matcha(100.0, 50.0)];
        let corpus = vec![analysis("Beverages", "Matcha Fizz", Some(100.0), Some(0.0))];

        let hot = analyze(&concept(&["Matcha", "matcha", "MATCHA", "Matcha"]), &trends, &corpus);
        assert_eq!(hot.scores.market_demand, 100.0);
        assert_eq!(hot.scores.innovation_factor, 100.0);

        let collapsing = analyze(&concept(&["Matcha"]), &[matcha(0.0, -300.0)], &corpus);
        assert_eq!(collapsing.scores.innovation_factor, 0.0);

        for scores in [&hot.scores, &collapsing.scores] {
            assert_in_range(scores.market_demand);
            assert_in_range(scores.ingredient_trends);
            assert_in_range(scores.competition_level);
            assert_in_range(scores.innovation_factor);
            assert_in_range(scores.overall_score);
        }
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let trends = vec![matcha(88.0, 12.5)];
        let corpus = vec![analysis("Beverages", "Cold Brew Tonic", Some(80.0), Some(60.0))];
        let input = concept(&["Matcha", "Yuzu"]);

        assert_eq!(analyze(&input, &trends, &corpus), analyze(&input, &trends, &corpus));
    }
}
