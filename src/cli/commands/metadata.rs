//! Metadata command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::MetadataArgs;
use crate::voxel::metadata::write_metadata_dir;

pub fn run_metadata(args: MetadataArgs, level: LogLevel) -> Result<(), String> {
    let count = write_metadata_dir(&args.dir, args.input_shape)
        .map_err(|e| format!("Metadata error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Wrote {count} metadata files for {}", args.input_shape),
    );
    Ok(())
}
