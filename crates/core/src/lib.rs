pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod intelligence;
pub mod snapshot;

pub use catalog::{PageLimits, Pagination, ProductPage, ProductQuery, ProductSort};
pub use config::{AppConfig, LoadOptions, LogFormat, TrendOrder};
pub use dashboard::{DashboardMetrics, GrowthMetrics, Timeframe};
pub use domain::competitor::CompetitorRecord;
pub use domain::concept::{ProductConcept, TargetDemographic};
pub use domain::history::HistoricalAnalysis;
pub use domain::metric::DashboardMetricRow;
pub use domain::product::{Product, ProductDraft, ProductId};
pub use domain::trend::TrendRecord;
pub use engine::{ConceptReport, MarketIntelligence};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use intelligence::{
    Advice, AggregateStats, ComparableTier, ConceptAnalysis, MarketLandscape, MarketPosition,
    Recommendation, RiskLevel, ScoreBundle,
};
pub use snapshot::{MarketSnapshot, SnapshotRecords};
