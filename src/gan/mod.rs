//! Terrain GAN and its training loop
//!
//! - [`Generator`]: latent noise to voxel occupancy probabilities
//! - [`Discriminator`]: flattened grid to a real/fake logit
//! - [`TerrainGan`]: both networks, their Adam optimizers and the
//!   adversarial update
//! - [`GanTrainer`]: epoch accounting, skipping of short batches,
//!   checkpoints and step history

mod config;
mod dense;
mod discriminator;
mod generator;
mod labels;
mod latent;
mod model;
mod trainer;


pub use config::{DiscriminatorConfig, GanConfig, GeneratorConfig, StepOptions, TrainConfig};
pub use dense::Dense;
pub use discriminator::Discriminator;
pub use generator::Generator;
pub use labels::{Labels, SMOOTHING_WIDTH};
pub use latent::{sample_noise, standard_normal};
pub use model::{StepMetrics, TerrainGan, DISCRIMINATOR_FILE, GENERATOR_FILE};
pub use trainer::{GanTrainer, StepRecord, TrainState, TrainingSummary, HISTORY_FILE};
