//! Reads a JSON market snapshot from disk.
//!
//! The file mirrors `SnapshotRecords`: top-level arrays named `trends`,
//! `historical_analyses`, `competitors`, `products` and `dashboard_metrics`.
//! Missing arrays are treated as empty.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flavorforge_core::config::TrendOrder;
use flavorforge_core::snapshot::{MarketSnapshot, SnapshotRecords};

pub fn load_snapshot(path: &Path, trend_order: TrendOrder) -> Result<MarketSnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot `{}`", path.display()))?;
    let records: SnapshotRecords = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse snapshot `{}`", path.display()))?;
    let snapshot = MarketSnapshot::new(records, trend_order)
        .with_context(|| format!("snapshot `{}` contains an invalid record", path.display()))?;

    tracing::info!(
        event_name = "cli.snapshot.loaded",
        path = %path.display(),
        trend_count = snapshot.trends().len(),
        product_count = snapshot.products().len(),
        "market snapshot loaded"
    );

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use flavorforge_core::config::TrendOrder;
    use tempfile::TempDir;

    use super::load_snapshot;

    #[test]
    fn missing_arrays_default_to_empty() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("snapshot.json");
        fs::write(
            &path,
            r#"{"trends":[{"ingredient_name":"Yuzu","region":"Asia","category":"Beverages",
                "popularity_score":82.0,"growth_rate":14.5,"year":2024,"month":6}]}"#,
        )
        .expect("write snapshot");

        let snapshot = load_snapshot(&path, TrendOrder::Stored).expect("snapshot should load");

        assert_eq!(snapshot.trends().len(), 1);
        assert!(snapshot.products().is_empty());
    }

    #[test]
    fn invalid_record_reports_its_position() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("snapshot.json");
        fs::write(
            &path,
            r#"{"trends":[{"ingredient_name":"Yuzu","region":"Asia","category":"Beverages",
                "popularity_score":82.0,"growth_rate":14.5,"year":2024,"month":13}]}"#,
        )
        .expect("write snapshot");

        let error = load_snapshot(&path, TrendOrder::Stored).expect_err("month 13 is invalid");

        assert!(format!("{error:#}").contains("trends[0].month"));
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("absent.json");

        let error = load_snapshot(&path, TrendOrder::Stored).expect_err("file is absent");

        assert!(error.to_string().contains("absent.json"));
    }
}
