//! Tiered search for historical analyses that resemble a concept.

use serde::Serialize;
use tracing::debug;

use crate::domain::concept::ProductConcept;
use crate::domain::history::HistoricalAnalysis;

/// Number of leading ingredients used as product-name keywords.
const KEYWORD_INGREDIENTS: usize = 3;

/// Size of the generic benchmark returned when nothing resembles the concept.
const BENCHMARK_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparableTier {
    SameCategory,
    IngredientKeyword,
    /// No evidence of similarity; the leading records serve as a generic benchmark.
    Benchmark,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparableSet<'a> {
    pub tier: ComparableTier,
    pub analyses: Vec<&'a HistoricalAnalysis>,
}

impl ComparableSet<'_> {
    pub fn len(&self) -> usize {
        self.analyses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty()
    }
}

pub fn find_comparable<'a>(
    concept: &ProductConcept,
    analyses: &'a [HistoricalAnalysis],
) -> ComparableSet<'a> {
    let same_category: Vec<&HistoricalAnalysis> =
        analyses.iter().filter(|analysis| analysis.category == concept.category).collect();
    if !same_category.is_empty() {
        return found(ComparableTier::SameCategory, same_category);
    }

    let keywords: Vec<String> = concept
        .ingredients
        .iter()
        .take(KEYWORD_INGREDIENTS)
        .map(|ingredient| ingredient.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    let by_keyword: Vec<&HistoricalAnalysis> = analyses
        .iter()
        .filter(|analysis| {
            let name = analysis.product_name.to_lowercase();
            keywords.iter().any(|keyword| name.contains(keyword.as_str()))
        })
        .collect();
    if !by_keyword.is_empty() {
        return found(ComparableTier::IngredientKeyword, by_keyword);
    }

    found(ComparableTier::Benchmark, analyses.iter().take(BENCHMARK_SIZE).collect())
}

fn found(tier: ComparableTier, analyses: Vec<&HistoricalAnalysis>) -> ComparableSet<'_> {
    debug!(
        event_name = "market.comparable.selected",
        tier = ?tier,
        comparable_count = analyses.len(),
        "comparable analyses selected"
    );
    ComparableSet { tier, analyses }
}
