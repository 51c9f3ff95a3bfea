use std::process::ExitCode;

fn main() -> ExitCode {
    flavorforge_cli::run()
}
