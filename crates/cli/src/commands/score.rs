use serde_json::json;

use crate::commands::{open_engine, CommandResult, ConceptArgs};

pub fn run(args: &ConceptArgs) -> CommandResult {
    let engine = match open_engine("score") {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let concept = args.to_concept();
    match engine.score_concept(&concept) {
        Ok(score) => CommandResult::success(
            "score",
            format!("viability score {score} for {} ingredient(s)", concept.ingredients.len()),
            &json!({ "score": score, "concept": concept }),
        ),
        Err(error) => CommandResult::rejected("score", error),
    }
}
