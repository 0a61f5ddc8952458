//! Terragan CLI
//!
//! # Usage
//!
//! ```bash
//! # Synthetic training data
//! terragan synth data/voxels --count 50 --input-shape 16,16,16
//!
//! # Train, then sample from a checkpoint
//! terragan train --directory data/voxels --input-shape 16,16,16 --batch-size 32
//! terragan generate results/20260101-120000/generated-100 25 samples/
//!
//! # Train from config with overrides
//! terragan train --config terragan.yaml --epochs 10 --seed 7
//! ```

use clap::error::ErrorKind;
use clap::Parser;
use std::process::ExitCode;
use terragan::cli::{run_command, Cli, LogLevel};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let level = LogLevel::from_flags(cli.quiet, cli.verbose);
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.filter().to_string()),
    )
    .format_timestamp(None)
    .init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
