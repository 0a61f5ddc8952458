//! Continuous batch cursor

use super::loader::Dataset;
use super::{LoaderConfig, VoxelBatch};
use crate::Result;
use rand::rngs::StdRng;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

#[derive(Debug)]
struct CursorState {
    /// Offset of the next window in `order`
    position: usize,
    total_batches_seen: u64,
    order: Vec<usize>,
    rng: StdRng,
}

/// Endless source of full batches.
///
/// Windows wrap past the end of the dataset: a window that runs off the end
/// is completed from the start of a fresh (reshuffled) ordering, so every
/// batch holds exactly `batch_size` samples. The cursor never ends; callers
/// decide how many batches to draw.
#[derive(Debug)]
pub struct BatchCursor {
    dataset: Dataset,
    state: Mutex<CursorState>,
}

impl BatchCursor {
    /// Discover samples under `dir`
    pub fn new(dir: impl AsRef<Path>, config: LoaderConfig) -> Result<Self> {
        Ok(Self::from_dataset(Dataset::open(dir.as_ref(), config)?))
    }

    pub(crate) fn from_dataset(dataset: Dataset) -> Self {
        let rng = dataset.new_rng();
        let state = CursorState {
            position: 0,
            total_batches_seen: 0,
            order: Vec::new(),
            rng,
        };
        Self { dataset, state: Mutex::new(state) }
    }

    /// Number of sample files
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.len() == 0
    }

    pub fn batches_per_epoch(&self) -> usize {
        self.dataset.batches_per_epoch()
    }

    pub fn config(&self) -> &LoaderConfig {
        self.dataset.config()
    }

    /// Batches drawn so far
    pub fn total_batches_seen(&self) -> u64 {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).total_batches_seen
    }

    /// Indices of the next window
    fn next_indices(&self) -> Vec<usize> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let batch_size = self.dataset.config().batch_size();
        let n = self.dataset.len();

        let mut indices = Vec::with_capacity(batch_size);
        while indices.len() < batch_size {
            if state.position == 0 {
                let seen = state.total_batches_seen;
                let CursorState { rng, .. } = &mut *state;
                let order = self.dataset.ordering(rng, seen);
                state.order = order;
            }
            let take = (batch_size - indices.len()).min(n - state.position);
            indices.extend_from_slice(&state.order[state.position..state.position + take]);
            state.position = (state.position + take) % n;
        }

        state.total_batches_seen += 1;
        indices
    }

    /// Draw and decode the next full batch.
    ///
    /// Safe to call from several threads; only index bookkeeping is
    /// serialized, decoding runs outside the lock.
    pub fn next_batch(&self) -> Result<VoxelBatch> {
        let indices = self.next_indices();
        self.dataset.load(&indices)
    }
}
