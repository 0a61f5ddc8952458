//! Configuration types for the terrain GAN and its training loop.

use crate::voxel::VoxelShape;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the generator network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Dimension of the latent noise vector
    pub latent_dim: usize,
    /// Hidden layer sizes (ReLU)
    pub hidden_dims: Vec<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { latent_dim: 100, hidden_dims: vec![256, 512] }
    }
}

/// Configuration for the discriminator network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscriminatorConfig {
    /// Hidden layer sizes (LeakyReLU)
    pub hidden_dims: Vec<usize>,
    /// Dropout after each hidden layer during training
    pub dropout: f32,
    /// Negative slope of the LeakyReLU activations
    pub leaky_slope: f32,
}

impl Default for DiscriminatorConfig {
    fn default() -> Self {
        Self { hidden_dims: vec![512, 256], dropout: 0.25, leaky_slope: 0.2 }
    }
}

/// Configuration for the complete terrain GAN
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanConfig {
    /// Grid shape of real and generated samples
    pub shape: VoxelShape,
    pub generator: GeneratorConfig,
    pub discriminator: DiscriminatorConfig,
    /// Adam learning rate, shared by both networks
    pub learning_rate: f32,
    /// Adam first-moment decay
    pub beta1: f32,
    /// Adam second-moment decay
    pub beta2: f32,
}

impl Default for GanConfig {
    fn default() -> Self {
        Self {
            shape: VoxelShape::default(),
            generator: GeneratorConfig::default(),
            discriminator: DiscriminatorConfig::default(),
            learning_rate: 0.0002,
            beta1: 0.5,
            beta2: 0.999,
        }
    }
}

impl GanConfig {
    /// Default networks for a given grid shape
    pub fn for_shape(shape: VoxelShape) -> Self {
        Self { shape, ..Self::default() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.shape.volume() == 0 {
            return Err(Error::ConfigError("shape must have every dimension > 0".to_string()));
        }
        if self.generator.latent_dim == 0 {
            return Err(Error::ConfigError("latent_dim must be > 0".to_string()));
        }
        if self
            .generator
            .hidden_dims
            .iter()
            .chain(&self.discriminator.hidden_dims)
            .any(|&d| d == 0)
        {
            return Err(Error::ConfigError("hidden layer sizes must be > 0".to_string()));
        }
        if !(0.0..1.0).contains(&self.discriminator.dropout) {
            return Err(Error::ConfigError(format!(
                "dropout must be in [0, 1), got {}",
                self.discriminator.dropout
            )));
        }
        if self.learning_rate <= 0.0 {
            return Err(Error::ConfigError("learning_rate must be > 0".to_string()));
        }
        for (name, beta) in [("beta1", self.beta1), ("beta2", self.beta2)] {
            if !(0.0..1.0).contains(&beta) {
                return Err(Error::ConfigError(format!("{name} must be in [0, 1), got {beta}")));
            }
        }
        Ok(())
    }
}

/// Configuration for [`GanTrainer`](super::GanTrainer)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Number of epochs to train
    pub epochs: usize,
    /// Checkpoint every this many epochs
    pub save_interval: usize,
    /// Soft labels: real in (0.7, 1], fake in [0, 0.3)
    pub label_smoothing: bool,
    /// Compute and log the generator gradient norm every step
    pub gradient_norm: bool,
    /// Rescale each network's gradients to at most this global L2 norm
    /// before its optimizer step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grad_clip: Option<f32>,
    /// Samples generated into each checkpoint
    pub samples_per_checkpoint: usize,
    /// Parent directory of run directories
    pub results_dir: PathBuf,
    /// Run directory name; a UTC timestamp when unset
    pub run_name: Option<String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 4000,
            save_interval: 10,
            label_smoothing: false,
            gradient_norm: false,
            grad_clip: None,
            samples_per_checkpoint: 25,
            results_dir: PathBuf::from("results"),
            run_name: None,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.save_interval == 0 {
            return Err(Error::ConfigError("save_interval must be > 0".to_string()));
        }
        if let Some(max) = self.grad_clip {
            if !(max.is_finite() && max > 0.0) {
                return Err(Error::ConfigError(format!("grad_clip must be > 0, got {max}")));
            }
        }
        Ok(())
    }

    /// The per-step subset handed to [`TerrainGan::train_step`](super::TerrainGan::train_step)
    pub fn step_options(&self) -> StepOptions {
        StepOptions {
            label_smoothing: self.label_smoothing,
            gradient_norm: self.gradient_norm,
            grad_clip: self.grad_clip,
        }
    }
}

/// Options for a single adversarial update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepOptions {
    /// Draw soft targets instead of hard 0/1 labels
    pub label_smoothing: bool,
    /// Report the generator gradient norm
    pub gradient_norm: bool,
    /// Global L2 bound applied to each network's gradients
    pub grad_clip: Option<f32>,
}
