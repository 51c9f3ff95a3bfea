use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use flavorforge_core::config::{AppConfig, LoadOptions};
use serde::Serialize;
use toml::Value;

use crate::commands::{CommandResult, EXIT_UNAVAILABLE};

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                EXIT_UNAVAILABLE,
            );
        }
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key: &str, env_keys: &[&str]| {
        field_source(key, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let entries = vec![
        ConfigEntry {
            key: "data.snapshot_path",
            value: config.data.snapshot_path.display().to_string(),
            source: source("data.snapshot_path", &["FLAVORFORGE_DATA_SNAPSHOT_PATH"]),
        },
        ConfigEntry {
            key: "matching.trend_order",
            value: format!("{:?}", config.matching.trend_order),
            source: source("matching.trend_order", &["FLAVORFORGE_MATCHING_TREND_ORDER"]),
        },
        ConfigEntry {
            key: "catalog.default_page_size",
            value: config.catalog.default_page_size.to_string(),
            source: source(
                "catalog.default_page_size",
                &["FLAVORFORGE_CATALOG_DEFAULT_PAGE_SIZE"],
            ),
        },
        ConfigEntry {
            key: "catalog.max_page_size",
            value: config.catalog.max_page_size.to_string(),
            source: source("catalog.max_page_size", &["FLAVORFORGE_CATALOG_MAX_PAGE_SIZE"]),
        },
        ConfigEntry {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source(
                "logging.level",
                &["FLAVORFORGE_LOGGING_LEVEL", "FLAVORFORGE_LOG_LEVEL"],
            ),
        },
        ConfigEntry {
            key: "logging.format",
            value: format!("{:?}", config.logging.format),
            source: source(
                "logging.format",
                &["FLAVORFORGE_LOGGING_FORMAT", "FLAVORFORGE_LOG_FORMAT"],
            ),
        },
    ];

    CommandResult::success(
        "config",
        "effective config (source precedence: env > file > default)",
        &entries,
    )
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("flavorforge.toml"), PathBuf::from("config/flavorforge.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
