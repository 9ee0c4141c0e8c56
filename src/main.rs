use std::process::ExitCode;

use quarterlog::ui::output;

fn main() -> ExitCode {
    match quarterlog::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
