//! # Bikeshare Explorer Entry Point
//!
//! Parses the command line, sets up logging and runs either a single
//! filtered report (`--city/--month/--day`) or the interactive session on
//! stdin/stdout.
//!
//! ```bash
//! bikeshare --data-dir ./data
//! bikeshare --data-dir ./data --city n --month 3 --day -1
//! ```

#![warn(clippy::all, rust_2018_idioms)]

mod cli;

use bikeshare::explorer::Console;
use clap::Parser as _;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(e) = bikeshare::logging::init() {
        // Still report warnings and the final error on stderr.
        let _ = bikeshare::logging::init_stderr();
        tracing::warn!("File logging unavailable: {e:#}");
    }

    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());

    match cli::run(&cli, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
