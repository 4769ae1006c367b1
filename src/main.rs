//! inidata - Read and edit INI-style data files

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = inidata::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
