//! Decoded batch of voxel grids

use super::DataLayout;
use crate::voxel::VoxelShape;
use ndarray::{Array5, ArrayView1};

/// Batch of grids with a singleton channel axis.
///
/// Shape is `(n, 1, X, Y, Z)` or `(n, X, Y, Z, 1)` depending on the layout.
/// Either way a sample's cells are contiguous in row-major grid order.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelBatch {
    data: Array5<f32>,
    layout: DataLayout,
    shape: VoxelShape,
}

impl VoxelBatch {
    pub(crate) fn new(data: Array5<f32>, layout: DataLayout, shape: VoxelShape) -> Self {
        Self { data, layout, shape }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn layout(&self) -> DataLayout {
        self.layout
    }

    /// Grid shape of each sample
    pub fn shape(&self) -> VoxelShape {
        self.shape
    }

    pub fn as_array(&self) -> &Array5<f32> {
        &self.data
    }

    /// All samples concatenated, each flattened row-major
    pub fn to_flat(&self) -> Vec<f32> {
        self.data.iter().copied().collect()
    }

    /// Flattened cells of sample `i`
    pub fn sample(&self, i: usize) -> Option<ArrayView1<'_, f32>> {
        let volume = self.shape.volume();
        let flat = self.data.as_slice()?;
        flat.get(i * volume..(i + 1) * volume).map(ArrayView1::from)
    }
}
