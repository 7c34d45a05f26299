//! Helio: an orrery of planets on fixed ellipses around a spinning sun.
//!
//! Loads the body table from `config.ron`, builds the scene, and runs the
//! frame loop headless, reporting where every body ends up.
//!
//! Run with: `cargo run -p helio-app -- --frames 600 --json`

mod app;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use helio_config::CliArgs;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match app::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("helio: {e}");
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
