//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! terragan synth data/voxels --count 50 --input-shape 16,16,16
//! terragan voxelize data/raw data/voxels --input-shape 64,64,32
//! terragan train --directory data/voxels --input-shape 16,16,16 --batch-size 32
//! terragan train --config terragan.yaml --epochs 100 --dry-run
//! terragan generate results/run/generated-100 25 samples/
//! ```

mod core;

pub use core::{
    apply_overrides, parse_args, CleanArgs, Cli, Command, GenerateArgs, MetadataArgs, SynthArgs,
    TrainArgs, VoxelizeArgs,
};

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod tests;
