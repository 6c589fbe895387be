//! dokk - launch team documentation links from the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = dokk_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
