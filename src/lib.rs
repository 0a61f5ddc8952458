//! Terragan: voxel terrain generation with a 3D GAN
//!
//! The pipeline runs in four stages:
//! - [`voxel`]: turn raw `x,y,z` point files into binary occupancy grids
//!   and persist them as flat text samples with `.meta` shape sidecars
//! - [`data`]: discover samples and serve them as shuffled 5-D batches,
//!   either by index or from a continuous cursor
//! - [`gan`]: a generator/discriminator pair trained adversarially, with
//!   periodic checkpoints of weights and generated samples
//! - [`cli`]: the `terragan` command-line front end
//!
//! Training runs on a small reverse-mode [`autograd`] engine with an
//! [`optim::Adam`] optimizer; weights persist through [`io`].
//!
//! # Example
//!
//! ```no_run
//! use terragan::data::{BatchLoader, LoaderConfig};
//! use terragan::gan::{GanConfig, GanTrainer, TerrainGan, TrainConfig};
//! use terragan::voxel::VoxelShape;
//!
//! let shape = VoxelShape::new(16, 16, 16);
//! let loader = BatchLoader::new("data/voxels", LoaderConfig::new().with_shape(shape))?;
//! let gan = TerrainGan::new(GanConfig::for_shape(shape))?;
//!
//! let mut trainer = GanTrainer::new(gan, TrainConfig { epochs: 100, ..Default::default() })?;
//! let summary = trainer.train(&mut loader.into_cursor())?;
//! println!("{} steps, {} checkpoints", summary.steps, summary.checkpoints.len());
//! # Ok::<(), terragan::Error>(())
//! ```

pub mod autograd;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod gan;
pub mod io;
pub mod optim;
pub mod voxel;

pub use autograd::Tensor;
pub use error::{Error, Result};
