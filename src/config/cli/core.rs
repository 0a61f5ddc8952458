//! Cli, Command and the per-command argument structs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::TrainSpec;
use crate::data::DataLayout;
use crate::voxel::VoxelShape;

/// Terragan: voxel terrain GAN
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "terragan")]
#[command(version)]
#[command(about = "Voxelize terrain point clouds and train a GAN to generate new terrain")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train the GAN on a directory of voxelized samples
    Train(TrainArgs),

    /// Sample terrain from a saved checkpoint
    Generate(GenerateArgs),

    /// Convert raw point files into voxel samples
    Voxelize(VoxelizeArgs),

    /// Write `.meta` shape sidecars for every sample in a directory
    Metadata(MetadataArgs),

    /// Normalize a headered x,y,z point table into integer triples
    Clean(CleanArgs),

    /// Write synthetic Gaussian terrain samples
    Synth(SynthArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// YAML configuration file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grid shape as X,Y,Z
    #[arg(long, value_name = "X,Y,Z")]
    pub input_shape: Option<VoxelShape>,

    /// Samples per batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Directory of voxelized samples
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Parent directory for run output
    #[arg(short, long)]
    pub results_dir: Option<PathBuf>,

    /// Checkpoint directory to resume from
    #[arg(short, long)]
    pub load_dir: Option<PathBuf>,

    /// Override number of epochs
    #[arg(short, long)]
    pub epochs: Option<usize>,

    /// Checkpoint every N epochs
    #[arg(long)]
    pub save_interval: Option<usize>,

    /// Override learning rate
    #[arg(long)]
    pub lr: Option<f32>,

    /// Log the generator gradient norm at every step
    #[arg(long)]
    pub gradient_norm: bool,

    /// Clip each network's gradients to this global L2 norm
    #[arg(long, value_name = "MAX_NORM")]
    pub grad_clip: Option<f32>,

    /// Use soft real/fake labels
    #[arg(long)]
    pub label_smoothing: bool,

    /// Keep sample order fixed across epochs
    #[arg(long)]
    pub no_shuffle: bool,

    /// Walk epochs in order instead of drawing from a continuous cursor
    #[arg(long)]
    pub sequential: bool,

    /// Put the channel axis before the spatial axes
    #[arg(long)]
    pub channels_first: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run directory name (defaults to a UTC timestamp)
    #[arg(long)]
    pub run_name: Option<String>,

    /// Dry run (validate config and data but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the generate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Checkpoint directory holding generator.json
    #[arg(value_name = "MODEL_DIR")]
    pub model_dir: PathBuf,

    /// Number of samples to write
    #[arg(value_name = "COUNT")]
    pub count: usize,

    /// Directory the samples are written into
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Grid shape as X,Y,Z
    #[arg(long, value_name = "X,Y,Z", default_value = "16,16,16")]
    pub input_shape: VoxelShape,
}

/// Arguments for the voxelize command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct VoxelizeArgs {
    /// Directory of raw point files
    #[arg(value_name = "RAW_DIR")]
    pub raw_dir: PathBuf,

    /// Directory the samples are written into
    #[arg(value_name = "OUT_DIR")]
    pub out_dir: PathBuf,

    /// Grid shape as X,Y,Z
    #[arg(long, value_name = "X,Y,Z", default_value = "16,16,16")]
    pub input_shape: VoxelShape,
}

/// Arguments for the metadata command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct MetadataArgs {
    /// Directory of samples
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Grid shape as X,Y,Z
    #[arg(long, value_name = "X,Y,Z", default_value = "16,16,16")]
    pub input_shape: VoxelShape,
}

/// Arguments for the clean command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CleanArgs {
    /// Headered point table
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output point file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}

/// Arguments for the synth command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SynthArgs {
    /// Directory the samples are written into
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Number of samples
    #[arg(short, long, default_value_t = 50)]
    pub count: usize,

    /// Grid shape as X,Y,Z
    #[arg(long, value_name = "X,Y,Z", default_value = "16,16,16")]
    pub input_shape: VoxelShape,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a TrainSpec
///
/// Boolean flags only ever switch a setting on (or shuffling off); leaving
/// a flag out keeps the config file's value.
pub fn apply_overrides(spec: &mut TrainSpec, args: &TrainArgs) {
    if let Some(shape) = args.input_shape {
        spec.data.input_shape = shape;
    }
    if let Some(batch_size) = args.batch_size {
        spec.data.batch_size = batch_size;
    }
    if let Some(directory) = &args.directory {
        spec.data.directory = directory.clone();
    }
    if let Some(seed) = args.seed {
        spec.data.seed = Some(seed);
    }
    if args.no_shuffle {
        spec.data.shuffle = false;
    }
    if args.sequential {
        spec.data.sequential = true;
    }
    if args.channels_first {
        spec.data.layout = DataLayout::ChannelsFirst;
    }
    if let Some(lr) = args.lr {
        spec.optimizer.lr = lr;
    }
    if let Some(results_dir) = &args.results_dir {
        spec.training.results_dir = results_dir.clone();
    }
    if let Some(load_dir) = &args.load_dir {
        spec.training.load_dir = Some(load_dir.clone());
    }
    if let Some(epochs) = args.epochs {
        spec.training.epochs = epochs;
    }
    if let Some(save_interval) = args.save_interval {
        spec.training.save_interval = save_interval;
    }
    if args.gradient_norm {
        spec.training.gradient_norm = true;
    }
    if let Some(max_norm) = args.grad_clip {
        spec.training.grad_clip = Some(max_norm);
    }
    if args.label_smoothing {
        spec.training.label_smoothing = true;
    }
    if let Some(run_name) = &args.run_name {
        spec.training.run_name = Some(run_name.clone());
    }
}
