//! Market intelligence scoring engine
//!
//! Resolves ingredients against trend records, blends the results into viability and
//! multi-component concept scores, classifies competitors, and turns scores into advice.
//! Every function here is pure: identical inputs always produce identical outputs.

mod advisor;
mod aggregate;
mod analyzer;
mod comparable;
mod matcher;
mod position;
mod viability;

pub use advisor::{advise, Advice, Recommendation, RiskAssessment, RiskFactor, RiskLevel};
pub use aggregate::{aggregate, AggregateStats, IngredientAggregation};
pub use analyzer::{analyze, ConceptAnalysis, ScoreBundle};
pub use comparable::{find_comparable, ComparableSet, ComparableTier};
pub use matcher::{find_best_match, match_ingredient, IngredientMatch, MatchTier};
pub use position::{
    classify, emerging_competitors, landscape, market_leaders, CompetitorPosition,
    MarketLandscape, MarketPosition,
};
pub use viability::{ingredient_score, score_concept};

/// Popularity assumed for an ingredient with no trend record.
pub const DEFAULT_POPULARITY: f64 = 60.0;

/// Growth rate assumed for an ingredient with no trend record.
pub const DEFAULT_GROWTH_RATE: f64 = 5.0;

/// Lower bound of every exposed score.
pub const SCORE_FLOOR: f64 = 0.0;

/// Upper bound of every exposed score.
pub const SCORE_CEILING: f64 = 100.0;

pub(crate) fn clamp_score(value: f64) -> f64 {
    value.clamp(SCORE_FLOOR, SCORE_CEILING)
}

/// Rounds to one decimal, resolving exact ties to the even neighbour.
///
/// A tie only counts when `value * 10` is exactly representable; otherwise the
/// product's rounding error decides which side the true value lies on.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    let scaled = value * 10.0;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round() / 10.0;
    }

    let error = value.mul_add(10.0, -scaled);
    let rounded = if error > 0.0 {
        scaled.ceil()
    } else if error < 0.0 {
        scaled.floor()
    } else if scaled.floor() % 2.0 == 0.0 {
        scaled.floor()
    } else {
        scaled.ceil()
    };
    rounded / 10.0
}

/// Arithmetic mean, `None` for an empty input.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) =
        values.into_iter().fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::{clamp_score, mean, round_one_decimal};

    #[test]
    fn clamp_keeps_scores_on_the_percentage_scale() {
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(104.2), 100.0);
        assert_eq!(clamp_score(55.5), 55.5);
    }

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_one_decimal(72.42), 72.4);
        assert_eq!(round_one_decimal(69.96), 70.0);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_one_decimal(47.25), 47.2);
        assert_eq!(round_one_decimal(48.75), 48.8);
        assert_eq!(round_one_decimal(0.25), 0.2);
        assert_eq!(round_one_decimal(-47.25), -47.2);
    }

    #[test]
    fn near_ties_follow_the_stored_binary_value() {
        // 0.15 is stored slightly below 0.15, so it is not a tie.
        assert_eq!(round_one_decimal(0.15), 0.1);
        // 0.45 is stored slightly above 0.45.
        assert_eq!(round_one_decimal(0.45), 0.5);
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean(vec![60.0, 80.0]), Some(70.0));
    }
}
