use std::process::ExitCode;

use wayfarer::{cli, logger, ui};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = logger::init() {
        eprintln!("Failed to initialize logger: {e}");
    }

    match cli::main().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            wayfarer::log_error!("Command failed: {e:#}");
            ui::print_error(&format!("Error: {e:#}"));
            ExitCode::FAILURE
        }
    }
}
