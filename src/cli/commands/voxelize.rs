//! Voxelize command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::VoxelizeArgs;
use crate::voxel::voxelize_dir;

pub fn run_voxelize(args: VoxelizeArgs, level: LogLevel) -> Result<(), String> {
    let count = voxelize_dir(&args.raw_dir, &args.out_dir, args.input_shape)
        .map_err(|e| format!("Voxelize error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Voxelized {count} files into {} ({})",
            args.out_dir.display(),
            args.input_shape
        ),
    );
    Ok(())
}
