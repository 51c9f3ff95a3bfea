use crate::commands::{open_engine, CommandResult};

pub fn run(timeframe: &str, region: Option<&str>) -> CommandResult {
    let engine = match open_engine("dashboard") {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let metrics = engine.dashboard_metrics(timeframe, region);
    CommandResult::success(
        "dashboard",
        format!("dashboard metrics for {} over {} days", metrics.region, metrics.timeframe_days),
        &metrics,
    )
}
