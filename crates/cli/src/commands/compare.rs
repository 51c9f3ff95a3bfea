use crate::commands::{open_engine, CommandResult, ConceptArgs};

pub fn run(args: &ConceptArgs) -> CommandResult {
    let engine = match open_engine("compare") {
        Ok(engine) => engine,
        Err(result) => return result,
    };

    let concept = args.to_concept();
    match engine.find_comparable(&concept) {
        Ok(comparable) => CommandResult::success(
            "compare",
            format!("{} comparable analyses ({:?})", comparable.len(), comparable.tier),
            &comparable,
        ),
        Err(error) => CommandResult::rejected("compare", error),
    }
}
