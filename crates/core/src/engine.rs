//! Entry point for callers: every operation reads one shared snapshot.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::catalog::{self, PageLimits, ProductPage, ProductQuery};
use crate::dashboard::{self, DashboardMetrics};
use crate::domain::concept::ProductConcept;
use crate::domain::product::{Product, ProductDraft};
use crate::errors::ApplicationError;
use crate::intelligence::{self, Advice, ComparableSet, ConceptAnalysis, MarketLandscape};
use crate::snapshot::MarketSnapshot;

/// Analysis and the advice derived from it, as returned to operators.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConceptReport {
    pub analysis: ConceptAnalysis,
    pub advice: Advice,
}

#[derive(Clone, Debug)]
pub struct MarketIntelligence {
    snapshot: Arc<MarketSnapshot>,
    limits: PageLimits,
}

impl MarketIntelligence {
    pub fn new(snapshot: Arc<MarketSnapshot>) -> Self {
        Self { snapshot, limits: PageLimits::default() }
    }

    pub fn with_page_limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Installs a freshly built snapshot and hands back the previous one.
    ///
    /// Results already returned keep referring to the snapshot they were computed from.
    pub fn replace_snapshot(&mut self, snapshot: Arc<MarketSnapshot>) -> Arc<MarketSnapshot> {
        info!(
            event_name = "market.snapshot.replaced",
            trend_count = snapshot.trends().len(),
            product_count = snapshot.products().len(),
            "market snapshot replaced"
        );
        std::mem::replace(&mut self.snapshot, snapshot)
    }

    pub fn score_concept(&self, concept: &ProductConcept) -> Result<f64, ApplicationError> {
        concept.validate()?;
        Ok(intelligence::score_concept(concept, self.snapshot.trends()))
    }

    pub fn analyze(&self, concept: &ProductConcept) -> Result<ConceptAnalysis, ApplicationError> {
        concept.validate()?;
        Ok(intelligence::analyze(
            concept,
            self.snapshot.trends(),
            self.snapshot.historical_analyses(),
        ))
    }

    pub fn find_comparable(
        &self,
        concept: &ProductConcept,
    ) -> Result<ComparableSet<'_>, ApplicationError> {
        concept.validate()?;
        Ok(intelligence::find_comparable(concept, self.snapshot.historical_analyses()))
    }

    pub fn landscape(&self) -> MarketLandscape {
        intelligence::landscape(self.snapshot.competitors())
    }

    pub fn advise(&self, analysis: &ConceptAnalysis) -> Advice {
        intelligence::advise(&analysis.scores, &analysis.stats)
    }

    pub fn evaluate(&self, concept: &ProductConcept) -> Result<ConceptReport, ApplicationError> {
        let analysis = self.analyze(concept)?;
        let advice = self.advise(&analysis);

        info!(
            event_name = "market.concept.evaluated",
            category = %concept.category,
            region = %concept.region,
            overall_score = analysis.scores.overall_score,
            recommendation = ?advice.recommendation,
            risk_level = ?advice.risk.level,
            "concept evaluated"
        );

        Ok(ConceptReport { analysis, advice })
    }

    pub fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, ApplicationError> {
        Ok(catalog::list_products(self.snapshot.products(), query, self.limits)?)
    }

    pub fn create_product(
        &self,
        draft: ProductDraft,
        created_date: NaiveDate,
    ) -> Result<Product, ApplicationError> {
        let product = catalog::create_product(
            self.snapshot.products(),
            self.snapshot.trends(),
            draft,
            created_date,
        )?;

        info!(
            event_name = "market.product.created",
            product_id = product.id.0,
            market_score = product.market_score,
            "product scored and assigned an id"
        );

        Ok(product)
    }

    pub fn dashboard_metrics(&self, timeframe: &str, region: Option<&str>) -> DashboardMetrics {
        dashboard::dashboard_metrics(self.snapshot.dashboard_metrics(), timeframe, region)
    }
}
