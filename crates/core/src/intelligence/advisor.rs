//! Deterministic recommendation and risk narrative derived from concept scores.

use serde::Serialize;

use super::aggregate::AggregateStats;
use super::analyzer::ScoreBundle;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongLaunch,
    LaunchWithDifferentiation,
    Launch,
    Reformulate,
    Refine,
    Reconsider,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Self::StrongLaunch => {
                "Strong market potential. Proceed to development and prioritize a fast launch."
            }
            Self::LaunchWithDifferentiation => {
                "Good market potential, but the category is crowded. Proceed only with a clear point of differentiation."
            }
            Self::Launch => {
                "Good market potential. Proceed with development and validate pricing with target consumers."
            }
            Self::Reformulate => {
                "Moderate market potential with limited novelty. Consider reformulating with more innovative ingredients."
            }
            Self::Refine => {
                "Moderate market potential. Refine positioning and run consumer testing before committing."
            }
            Self::Reconsider => {
                "Limited market potential. Reconsider the concept or explore alternative ingredient combinations."
            }
        }
    }
}

struct RecommendationRule {
    recommendation: Recommendation,
    applies: fn(&ScoreBundle) -> bool,
}

/// First matching rule wins; `Reconsider` when none applies.
const RECOMMENDATION_RULES: [RecommendationRule; 5] = [
    RecommendationRule { recommendation: Recommendation::StrongLaunch, applies: is_strong },
    RecommendationRule {
        recommendation: Recommendation::LaunchWithDifferentiation,
        applies: is_promising_but_crowded,
    },
    RecommendationRule { recommendation: Recommendation::Launch, applies: is_promising },
    RecommendationRule { recommendation: Recommendation::Reformulate, applies: is_moderate_but_stale },
    RecommendationRule { recommendation: Recommendation::Refine, applies: is_moderate },
];

fn is_strong(scores: &ScoreBundle) -> bool {
    scores.overall_score >= 85.0
}

fn is_promising(scores: &ScoreBundle) -> bool {
    scores.overall_score >= 75.0
}

fn is_promising_but_crowded(scores: &ScoreBundle) -> bool {
    is_promising(scores) && scores.competition_level > 85.0
}

fn is_moderate(scores: &ScoreBundle) -> bool {
    scores.overall_score >= 65.0
}

fn is_moderate_but_stale(scores: &ScoreBundle) -> bool {
    is_moderate(scores) && scores.innovation_factor < 70.0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    NoTrendingIngredients,
    HighCompetition,
    NoRegionalMatches,
    LowGrowth,
}

impl RiskFactor {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoTrendingIngredients => "No trending ingredients",
            Self::HighCompetition => "High market competition",
            Self::NoRegionalMatches => "No regional ingredient data",
            Self::LowGrowth => "Low ingredient growth momentum",
        }
    }

    fn applies(&self, scores: &ScoreBundle, stats: &AggregateStats) -> bool {
        match self {
            Self::NoTrendingIngredients => stats.trending_count == 0,
            Self::HighCompetition => scores.competition_level > 85.0,
            Self::NoRegionalMatches => stats.regional_matches == 0,
            Self::LowGrowth => stats.avg_growth_rate < 5.0,
        }
    }
}

const RISK_CHECKS: [RiskFactor; 4] = [
    RiskFactor::NoTrendingIngredients,
    RiskFactor::HighCompetition,
    RiskFactor::NoRegionalMatches,
    RiskFactor::LowGrowth,
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Standard,
    Moderate,
    High,
}

impl RiskLevel {
    fn from_count(count: usize) -> Self {
        match count {
            0 => Self::Standard,
            1 | 2 => Self::Moderate,
            _ => Self::High,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub risks: Vec<RiskFactor>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Advice {
    pub recommendation: Recommendation,
    pub recommendation_text: String,
    pub risk: RiskAssessment,
}

pub fn advise(scores: &ScoreBundle, stats: &AggregateStats) -> Advice {
    let recommendation = RECOMMENDATION_RULES
        .iter()
        .find(|rule| (rule.applies)(scores))
        .map(|rule| rule.recommendation)
        .unwrap_or(Recommendation::Reconsider);

    Advice {
        recommendation,
        recommendation_text: recommendation.message().to_string(),
        risk: assess_risk(scores, stats),
    }
}

fn assess_risk(scores: &ScoreBundle, stats: &AggregateStats) -> RiskAssessment {
    let risks: Vec<RiskFactor> =
        RISK_CHECKS.into_iter().filter(|risk| risk.applies(scores, stats)).collect();
    let level = RiskLevel::from_count(risks.len());
    let listed = risks.iter().map(RiskFactor::label).collect::<Vec<_>>().join(", ");

    let message = match level {
        RiskLevel::Standard => {
            "Standard market risks apply. Monitor ingredient trends and competitor activity after launch."
                .to_string()
        }
        RiskLevel::Moderate => {
            format!("Moderate risk: {listed}. Address these before committing to a full launch.")
        }
        RiskLevel::High => {
            format!("High risk: {listed}. Consider a limited pilot or a revised concept first.")
        }
    };

    RiskAssessment { level, risks, message }
}

#[cfg(test)]
mod tests {
    use super::{advise, Recommendation, RiskFactor, RiskLevel};
    use crate::intelligence::{AggregateStats, ScoreBundle};

    fn scores(overall: f64, competition: f64, innovation: f64) -> ScoreBundle {
        ScoreBundle {
            market_demand: 70.0,
            ingredient_trends: 70.0,
            competition_level: competition,
            innovation_factor: innovation,
            overall_score: overall,
        }
    }

    fn stats(trending: usize, regional: usize, growth: f64) -> AggregateStats {
        AggregateStats {
            avg_popularity: 75.0,
            avg_growth_rate: growth,
            trending_count: trending,
            total_ingredients: 3,
            regional_matches: regional,
            category_matches: 1,
        }
    }

    #[test]
    fn recommendation_thresholds_are_ordered() {
        let healthy = stats(1, 1, 10.0);
        let cases = [
            (scores(85.0, 95.0, 50.0), Recommendation::StrongLaunch),
            (scores(80.0, 86.0, 90.0), Recommendation::LaunchWithDifferentiation),
            (scores(75.0, 85.0, 90.0), Recommendation::Launch),
            (scores(70.0, 95.0, 69.9), Recommendation::Reformulate),
            (scores(65.0, 40.0, 70.0), Recommendation::Refine),
            (scores(64.9, 40.0, 40.0), Recommendation::Reconsider),
        ];

        for (input, expected) in cases {
            let advice = advise(&input, &healthy);
            assert_eq!(advice.recommendation, expected, "overall {}", input.overall_score);
            assert_eq!(advice.recommendation_text, expected.message());
        }
    }

    #[test]
    fn single_competition_risk_yields_moderate_message() {
        let advice = advise(&scores(78.0, 90.0, 80.0), &stats(1, 2, 8.0));

        assert_eq!(advice.risk.risks, vec![RiskFactor::HighCompetition]);
        assert_eq!(advice.risk.level, RiskLevel::Moderate);
        assert_eq!(
            advice.risk.message,
            "Moderate risk: High market competition. Address these before committing to a full launch."
        );
    }

    #[test]
    fn missing_trending_ingredients_adds_a_second_risk() {
        let advice = advise(&scores(78.0, 90.0, 80.0), &stats(0, 2, 8.0));

        assert_eq!(
            advice.risk.risks,
            vec![RiskFactor::NoTrendingIngredients, RiskFactor::HighCompetition]
        );
        assert_eq!(advice.risk.level, RiskLevel::Moderate);
        assert!(advice.risk.message.contains("No trending ingredients, High market competition"));
    }

    #[test]
    fn no_risks_yields_standard_message() {
        let advice = advise(&scores(88.0, 40.0, 90.0), &stats(2, 3, 12.0));

        assert!(advice.risk.risks.is_empty());
        assert_eq!(advice.risk.level, RiskLevel::Standard);
        assert!(advice.risk.message.starts_with("Standard market risks apply."));
    }

    #[test]
    fn three_or_more_risks_yield_high_risk() {
        let advice = advise(&scores(50.0, 92.0, 60.0), &stats(0, 0, 4.9));

        assert_eq!(advice.risk.risks.len(), 4);
        assert_eq!(advice.risk.level, RiskLevel::High);
        assert!(advice.risk.message.starts_with("High risk: No trending ingredients"));
    }
}
