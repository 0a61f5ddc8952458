//! Loader configuration

use crate::voxel::VoxelShape;
use serde::{Deserialize, Serialize};

/// Position of the singleton channel axis in a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLayout {
    /// `(n, 1, X, Y, Z)`
    ChannelsFirst,
    /// `(n, X, Y, Z, 1)`
    #[default]
    ChannelsLast,
}

impl DataLayout {
    /// Shape of one sample including the channel axis
    pub fn sample_dims(self, shape: VoxelShape) -> [usize; 4] {
        match self {
            Self::ChannelsFirst => [1, shape.x, shape.y, shape.z],
            Self::ChannelsLast => [shape.x, shape.y, shape.z, 1],
        }
    }
}

/// Configuration for [`BatchLoader`](super::BatchLoader) and
/// [`BatchCursor`](super::BatchCursor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderConfig {
    batch_size: usize,
    shuffle: bool,
    shape: VoxelShape,
    layout: DataLayout,
    seed: Option<u64>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: 32,
            shuffle: true,
            shape: VoxelShape::default(),
            layout: DataLayout::default(),
            seed: None,
        }
    }
}

impl LoaderConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the batch size. Zero is rejected when the loader is built.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Enable or disable reshuffling at epoch boundaries.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the grid shape of every sample.
    pub fn with_shape(mut self, shape: VoxelShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the channel layout.
    pub fn with_layout(mut self, layout: DataLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Seed shuffles for reproducible orderings.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn shape(&self) -> VoxelShape {
        self.shape
    }

    pub fn layout(&self) -> DataLayout {
        self.layout
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}
