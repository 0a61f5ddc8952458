//! Declarative configuration and command-line arguments
//!
//! A [`TrainSpec`] can be read from YAML with [`load_config`], built from
//! defaults, and then adjusted by command-line flags via
//! [`apply_overrides`]. [`parse_config`] skips validation so it can run
//! once, after the overrides.

mod cli;
mod loader;
mod schema;
mod validate;

pub use cli::{
    apply_overrides, parse_args, CleanArgs, Cli, Command, GenerateArgs, MetadataArgs, SynthArgs,
    TrainArgs, VoxelizeArgs,
};
pub use loader::{load_config, parse_config};
pub use schema::{DataSpec, ModelSpec, OptimSpec, TrainSpec, TrainingSpec};
pub use validate::{validate_config, ValidationError};
