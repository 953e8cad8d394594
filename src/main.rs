use std::process::ExitCode;

fn main() -> ExitCode {
    match kr_crisis_index::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
