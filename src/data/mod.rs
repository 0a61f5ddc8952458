//! Batch loading of voxelized terrain samples
//!
//! # Example
//!
//! ```ignore
//! use terragan::data::{BatchLoader, LoaderConfig};
//! use terragan::voxel::VoxelShape;
//!
//! let config = LoaderConfig::new()
//!     .with_batch_size(4)
//!     .with_shape(VoxelShape::new(16, 16, 16));
//!
//! let mut loader = BatchLoader::new("data/voxels", config)?;
//! for i in 0..loader.batches_per_epoch() {
//!     let batch = loader.get_batch(i)?;
//! }
//! ```

mod batch;
mod config;
mod cursor;
mod loader;
mod source;


pub use batch::VoxelBatch;
pub use config::{DataLayout, LoaderConfig};
pub use cursor::BatchCursor;
pub use loader::{discover_samples, BatchLoader};
pub use source::{BatchSource, SequentialBatches};
