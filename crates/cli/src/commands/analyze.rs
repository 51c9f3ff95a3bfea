use crate::commands::{open_engine, CommandResult, ConceptArgs};

pub fn run(args: &ConceptArgs) -> CommandResult {
    let engine = match open_engine("analyze") {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    match engine.evaluate(&args.to_concept()) {
        Ok(report) => CommandResult::success(
            "analyze",
            report.advice.recommendation_text.clone(),
            &report,
        ),
        Err(error) => CommandResult::rejected("analyze", error),
    }
}
