//! Rule-based market-position classification of competitors.

use std::cmp::Ordering;

use serde::Serialize;

use super::mean;
use crate::domain::competitor::CompetitorRecord;

/// Companies founded in or after this year are eligible as emerging competitors.
const EMERGING_FOUNDED_FROM: i32 = 2020;
const EMERGING_LIMIT: usize = 5;
/// Share of the field, by market share, reported as leaders.
const LEADER_FRACTION: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPosition {
    MarketLeader,
    RisingStar,
    EstablishedPlayer,
    EmergingCompetitor,
    QualityFocused,
    NichePlayer,
}

impl MarketPosition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MarketLeader => "Market Leader",
            Self::RisingStar => "Rising Star",
            Self::EstablishedPlayer => "Established Player",
            Self::EmergingCompetitor => "Emerging Competitor",
            Self::QualityFocused => "Quality Focused",
            Self::NichePlayer => "Niche Player",
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PositionSignals {
    market_share: f64,
    average_score: f64,
    growth_trend: f64,
}

struct PositionRule {
    position: MarketPosition,
    applies: fn(&PositionSignals) -> bool,
}

/// Evaluated top to bottom; the first rule that applies decides the position.
const POSITION_RULES: [PositionRule; 5] = [
    PositionRule { position: MarketPosition::MarketLeader, applies: leads_share_and_quality },
    PositionRule { position: MarketPosition::RisingStar, applies: grows_with_quality },
    PositionRule { position: MarketPosition::EstablishedPlayer, applies: holds_share },
    PositionRule { position: MarketPosition::EmergingCompetitor, applies: grows_fast },
    PositionRule { position: MarketPosition::QualityFocused, applies: rated_highly },
];

fn leads_share_and_quality(signals: &PositionSignals) -> bool {
    signals.market_share > 15.0 && signals.average_score > 85.0
}

fn grows_with_quality(signals: &PositionSignals) -> bool {
    signals.growth_trend > 10.0 && signals.average_score > 80.0
}

fn holds_share(signals: &PositionSignals) -> bool {
    signals.market_share > 10.0
}

fn grows_fast(signals: &PositionSignals) -> bool {
    signals.growth_trend > 8.0
}

fn rated_highly(signals: &PositionSignals) -> bool {
    signals.average_score > 85.0
}

pub fn classify(market_share: f64, average_score: f64, growth_trend: f64) -> MarketPosition {
    let signals = PositionSignals { market_share, average_score, growth_trend };
    POSITION_RULES
        .iter()
        .find(|rule| (rule.applies)(&signals))
        .map(|rule| rule.position)
        .unwrap_or(MarketPosition::NichePlayer)
}

/// Top 20% of competitors by market share (at least one when any exist).
pub fn market_leaders(competitors: &[CompetitorRecord]) -> Vec<&CompetitorRecord> {
    if competitors.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&CompetitorRecord> = competitors.iter().collect();
    ranked.sort_by(|a, b| descending(a.market_share, b.market_share));

    let take = ((competitors.len() as f64 * LEADER_FRACTION).ceil() as usize).max(1);
    ranked.truncate(take);
    ranked
}

/// Recently founded competitors growing faster than the field as a whole, fastest first.
pub fn emerging_competitors(competitors: &[CompetitorRecord]) -> Vec<&CompetitorRecord> {
    let Some(field_growth) = mean(competitors.iter().map(|competitor| competitor.growth_trend))
    else {
        return Vec::new();
    };

    let mut emerging: Vec<&CompetitorRecord> = competitors
        .iter()
        .filter(|competitor| competitor.founded_year >= EMERGING_FOUNDED_FROM)
        .filter(|competitor| competitor.growth_trend > field_growth)
        .collect();
    emerging.sort_by(|a, b| descending(a.growth_trend, b.growth_trend));
    emerging.truncate(EMERGING_LIMIT);
    emerging
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CompetitorPosition {
    pub company_name: String,
    pub position: MarketPosition,
    pub label: &'static str,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarketLandscape {
    pub positions: Vec<CompetitorPosition>,
    pub leaders: Vec<CompetitorRecord>,
    pub emerging: Vec<CompetitorRecord>,
}

pub fn landscape(competitors: &[CompetitorRecord]) -> MarketLandscape {
    let positions = competitors
        .iter()
        .map(|competitor| {
            let position = classify(
                competitor.market_share,
                competitor.average_score,
                competitor.growth_trend,
            );
            CompetitorPosition {
                company_name: competitor.company_name.clone(),
                position,
                label: position.label(),
            }
        })
        .collect();

    MarketLandscape {
        positions,
        leaders: market_leaders(competitors).into_iter().cloned().collect(),
        emerging: emerging_competitors(competitors).into_iter().cloned().collect(),
    }
}

fn descending(left: f64, right: f64) -> Ordering {
    right.total_cmp(&left)
}
