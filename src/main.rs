use std::process::ExitCode;

fn main() -> ExitCode {
    ankistry::run()
}
