pub mod commands;
pub mod snapshot;

use clap::{Parser, Subcommand};
use flavorforge_core::config::{AppConfig, LoadOptions, LogFormat};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use commands::products::ProductsAction;
use commands::ConceptArgs;

#[derive(Debug, Parser)]
#[command(
    name = "flavorforge",
    about = "FlavorForge market intelligence CLI",
    long_about = "Score product concepts against ingredient trends, compare them with past analyses, and inspect the competitive landscape.",
    after_help = "Examples:\n  flavorforge score --ingredients \"Matcha, Oat Milk\" --category Beverages --region Asia\n  flavorforge products list --sort-by market_score\n  flavorforge config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Compute the viability score for a product concept")]
    Score(ConceptArgs),
    #[command(about = "Run the full concept analysis and return scores with launch advice")]
    Analyze(ConceptArgs),
    #[command(about = "Show the historical analyses a concept is compared against")]
    Compare(ConceptArgs),
    #[command(about = "Classify competitors and list market leaders and emerging players")]
    Landscape,
    #[command(about = "Query or score catalog products")]
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    #[command(about = "Show headline dashboard metrics for a timeframe and region")]
    Dashboard {
        #[arg(long, default_value = "30d", help = "7d | 30d | 90d | 1y")]
        timeframe: String,
        #[arg(long)]
        region: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

/// `RUST_LOG` directives win over the configured level; unparsable directives are ignored.
fn log_filter(level: &str, directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

fn init_logging(config: &AppConfig) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = log_filter(&config.logging.level, rust_log.as_deref());

    // stdout carries the JSON command payload, so logs go to stderr.
    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(filter)
                .compact()
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(filter)
                .pretty()
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_env_filter(filter)
                .json()
                .init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    // A broken config is reported by the command itself; logging just stays off.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match &cli.command {
        Command::Score(args) => commands::score::run(args),
        Command::Analyze(args) => commands::analyze::run(args),
        Command::Compare(args) => commands::compare::run(args),
        Command::Landscape => commands::landscape::run(),
        Command::Products { action } => commands::products::run(action),
        Command::Dashboard { timeframe, region } => {
            commands::dashboard::run(timeframe, region.as_deref())
        }
        Command::Config => commands::config::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use super::log_filter;

    #[test]
    fn configured_level_applies_without_directives() {
        assert_eq!(log_filter("debug", None).to_string(), "debug");
    }

    #[test]
    fn rust_log_directives_override_configured_level() {
        let filter = log_filter("info", Some("flavorforge_core=trace"));

        assert_eq!(filter.to_string(), "flavorforge_core=trace");
    }

    #[test]
    fn unparsable_directives_fall_back_to_configured_level() {
        assert_eq!(log_filter("warn", Some("flavorforge_core=loud")).to_string(), "warn");
    }
}
