//! YAML schema for declarative GAN training
//!
//! Every section and field has a default, so a config file only needs the
//! values it changes and the CLI can run with no file at all.

use crate::data::{DataLayout, LoaderConfig};
use crate::gan::{DiscriminatorConfig, GanConfig, GeneratorConfig, TrainConfig};
use crate::voxel::VoxelShape;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete training specification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainSpec {
    /// Where samples come from and how they are batched
    pub data: DataSpec,

    /// Network architecture
    pub model: ModelSpec,

    /// Adam settings shared by both networks
    pub optimizer: OptimSpec,

    /// Epochs, checkpoints and output locations
    pub training: TrainingSpec,
}

/// Data section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSpec {
    /// Directory searched recursively for voxelized samples
    pub directory: PathBuf,

    /// Grid shape, written as `"X,Y,Z"`
    pub input_shape: VoxelShape,

    pub batch_size: usize,

    /// Reshuffle sample order every epoch
    pub shuffle: bool,

    pub layout: DataLayout,

    /// Seed for sample order, network initialization and noise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Walk epochs in order, handing out a short final batch, instead of
    /// drawing full batches from a continuous cursor
    pub sequential: bool,
}

impl Default for DataSpec {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            input_shape: VoxelShape::default(),
            batch_size: 32,
            shuffle: true,
            layout: DataLayout::default(),
            seed: None,
            sequential: false,
        }
    }
}

/// Model section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSpec {
    pub generator: GeneratorConfig,
    pub discriminator: DiscriminatorConfig,
}

/// Optimizer section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimSpec {
    pub lr: f32,
    pub beta1: f32,
    pub beta2: f32,
}

impl Default for OptimSpec {
    fn default() -> Self {
        Self { lr: 0.0002, beta1: 0.5, beta2: 0.999 }
    }
}

/// Training section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSpec {
    pub epochs: usize,

    /// Checkpoint every N epochs
    pub save_interval: usize,

    pub label_smoothing: bool,

    /// Log the generator gradient norm at every step
    pub gradient_norm: bool,

    /// Global L2 bound on each network's gradients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grad_clip: Option<f32>,

    /// Parent of the per-run output directories
    pub results_dir: PathBuf,

    /// Checkpoint directory to resume from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_dir: Option<PathBuf>,

    pub samples_per_checkpoint: usize,

    /// Run directory name (UTC timestamp when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_name: Option<String>,
}

impl Default for TrainingSpec {
    fn default() -> Self {
        let defaults = TrainConfig::default();
        Self {
            epochs: defaults.epochs,
            save_interval: defaults.save_interval,
            label_smoothing: defaults.label_smoothing,
            gradient_norm: defaults.gradient_norm,
            grad_clip: defaults.grad_clip,
            results_dir: defaults.results_dir,
            load_dir: None,
            samples_per_checkpoint: defaults.samples_per_checkpoint,
            run_name: None,
        }
    }
}

impl TrainSpec {
    /// Loader settings for the data section
    pub fn loader_config(&self) -> LoaderConfig {
        let config = LoaderConfig::new()
            .with_batch_size(self.data.batch_size)
            .with_shuffle(self.data.shuffle)
            .with_shape(self.data.input_shape)
            .with_layout(self.data.layout);
        match self.data.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Network and optimizer settings
    pub fn gan_config(&self) -> GanConfig {
        GanConfig {
            shape: self.data.input_shape,
            generator: self.model.generator.clone(),
            discriminator: self.model.discriminator.clone(),
            learning_rate: self.optimizer.lr,
            beta1: self.optimizer.beta1,
            beta2: self.optimizer.beta2,
        }
    }

    /// Training loop settings
    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            epochs: self.training.epochs,
            save_interval: self.training.save_interval,
            label_smoothing: self.training.label_smoothing,
            gradient_norm: self.training.gradient_norm,
            grad_clip: self.training.grad_clip,
            samples_per_checkpoint: self.training.samples_per_checkpoint,
            results_dir: self.training.results_dir.clone(),
            run_name: self.training.run_name.clone(),
        }
    }
}
