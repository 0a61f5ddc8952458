//! Batch sources consumed by the training loop

use super::{BatchCursor, BatchLoader, VoxelBatch};
use crate::voxel::VoxelShape;
use crate::Result;

/// Anything that can feed batches to the trainer
pub trait BatchSource {
    /// Draw the next batch
    fn next_batch(&mut self) -> Result<VoxelBatch>;

    /// Nominal batch size; drawn batches may be shorter
    fn batch_size(&self) -> usize;

    /// Batches making up one epoch
    fn batches_per_epoch(&self) -> usize;

    /// Grid shape of each sample
    fn shape(&self) -> VoxelShape;
}

impl BatchSource for BatchCursor {
    fn next_batch(&mut self) -> Result<VoxelBatch> {
        BatchCursor::next_batch(self)
    }

    fn batch_size(&self) -> usize {
        self.config().batch_size()
    }

    fn batches_per_epoch(&self) -> usize {
        BatchCursor::batches_per_epoch(self)
    }

    fn shape(&self) -> VoxelShape {
        self.config().shape()
    }
}

/// Epoch-ordered walk over a [`BatchLoader`], including the short final
/// batch of each epoch. Reshuffles after the last batch of every epoch.
#[derive(Debug)]
pub struct SequentialBatches {
    loader: BatchLoader,
    position: usize,
}

impl SequentialBatches {
    pub fn new(loader: BatchLoader) -> Self {
        Self { loader, position: 0 }
    }

    pub fn loader(&self) -> &BatchLoader {
        &self.loader
    }
}

impl BatchSource for SequentialBatches {
    fn next_batch(&mut self) -> Result<VoxelBatch> {
        let batch = self.loader.get_batch(self.position)?;
        self.position += 1;
        if self.position == self.loader.batches_per_epoch() {
            self.position = 0;
            self.loader.on_epoch_end();
        }
        Ok(batch)
    }

    fn batch_size(&self) -> usize {
        self.loader.config().batch_size()
    }

    fn batches_per_epoch(&self) -> usize {
        self.loader.batches_per_epoch()
    }

    fn shape(&self) -> VoxelShape {
        self.loader.config().shape()
    }
}
