//! Synth command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::SynthArgs;
use crate::voxel::write_synthetic;

pub fn run_synth(args: SynthArgs, level: LogLevel) -> Result<(), String> {
    let written = write_synthetic(&args.output_dir, args.input_shape, args.count)
        .map_err(|e| format!("Synth error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Wrote {} synthetic samples of {} to {}",
            written.len(),
            args.input_shape,
            args.output_dir.display()
        ),
    );
    Ok(())
}
