//! CLI command implementations

mod clean;
mod generate;
mod metadata;
mod synth;
mod train;
mod voxelize;

#[cfg(test)]
mod tests;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    match cli.command {
        Command::Train(args) => train::run_train(args, log_level),
        Command::Generate(args) => generate::run_generate(args, log_level),
        Command::Voxelize(args) => voxelize::run_voxelize(args, log_level),
        Command::Metadata(args) => metadata::run_metadata(args, log_level),
        Command::Clean(args) => clean::run_clean(args, log_level),
        Command::Synth(args) => synth::run_synth(args, log_level),
    }
}
