//! Clean command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::CleanArgs;
use crate::voxel::clean_file;

pub fn run_clean(args: CleanArgs, level: LogLevel) -> Result<(), String> {
    let count = clean_file(&args.input, &args.output).map_err(|e| format!("Clean error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Wrote {count} points to {}", args.output.display()),
    );
    Ok(())
}
