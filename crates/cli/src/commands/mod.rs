pub mod analyze;
pub mod compare;
pub mod config;
pub mod dashboard;
pub mod landscape;
pub mod products;
pub mod score;

use std::sync::Arc;

use clap::Args;
use flavorforge_core::config::{AppConfig, LoadOptions};
use flavorforge_core::domain::concept::{ProductConcept, TargetDemographic};
use flavorforge_core::engine::MarketIntelligence;
use flavorforge_core::errors::{ApplicationError, InterfaceError};
use serde::Serialize;

use crate::snapshot::load_snapshot;

pub(crate) const EXIT_UNAVAILABLE: u8 = 2;
pub(crate) const EXIT_INVALID_INPUT: u8 = 3;
pub(crate) const EXIT_INTERNAL: u8 = 1;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>, data: &impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(
                    command,
                    "serialization",
                    format!("failed to encode command output: {error}"),
                    EXIT_INTERNAL,
                );
            }
        };

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps an engine failure onto the CLI's error classes and exit codes.
    ///
    /// The message leads with the operator-facing summary and keeps the detail after it.
    pub fn rejected(command: &str, error: ApplicationError) -> Self {
        let interface = error.into_interface(format!("cli-{command}"));
        let summary = interface.user_message();
        match interface {
            InterfaceError::BadRequest { message, .. } => Self::failure(
                command,
                "input_validation",
                format!("{summary} ({message})"),
                EXIT_INVALID_INPUT,
            ),
            InterfaceError::ServiceUnavailable { message, .. } => Self::failure(
                command,
                "snapshot_load",
                format!("{summary} ({message})"),
                EXIT_UNAVAILABLE,
            ),
            InterfaceError::Internal { message, .. } => Self::failure(
                command,
                "config_validation",
                format!("{summary} ({message})"),
                EXIT_UNAVAILABLE,
            ),
        }
    }
}

/// Concept flags shared by `score`, `analyze` and `compare`.
#[derive(Debug, Clone, Args)]
pub struct ConceptArgs {
    #[arg(long, help = "Comma-separated ingredient list, e.g. \"Matcha, Oat Milk\"")]
    pub ingredients: String,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub region: String,
    #[arg(long, default_value = "", help = "One of 18-25, 26-35, 35-45, 45+")]
    pub demographic: String,
}

impl ConceptArgs {
    pub fn to_concept(&self) -> ProductConcept {
        ProductConcept::from_ingredient_list(
            &self.ingredients,
            self.category.trim(),
            self.region.trim(),
            TargetDemographic::from_label(&self.demographic),
        )
    }
}

/// Loads configuration and the configured snapshot, then builds the engine.
pub(crate) fn open_engine(command: &str) -> Result<MarketIntelligence, CommandResult> {
    let config = AppConfig::load(LoadOptions::default())
        .map_err(|error| ApplicationError::Configuration(error.to_string()))
        .map_err(|error| CommandResult::rejected(command, error))?;

    let snapshot = load_snapshot(&config.data.snapshot_path, config.matching.trend_order)
        .map_err(|error| ApplicationError::Snapshot(format!("{error:#}")))
        .map_err(|error| CommandResult::rejected(command, error))?;

    Ok(MarketIntelligence::new(Arc::new(snapshot)).with_page_limits(config.catalog.limits()))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
