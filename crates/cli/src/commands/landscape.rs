use crate::commands::{open_engine, CommandResult};

pub fn run() -> CommandResult {
    let engine = match open_engine("landscape") {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let landscape = engine.landscape();
    CommandResult::success(
        "landscape",
        format!(
            "{} competitors classified, {} leaders, {} emerging",
            landscape.positions.len(),
            landscape.leaders.len(),
            landscape.emerging.len()
        ),
        &landscape,
    )
}
