//! Sample discovery and indexed batch retrieval

use super::{LoaderConfig, VoxelBatch};
use crate::voxel::{metadata::is_metadata, read_sample};
use crate::{Error, Result};
use ndarray::Array5;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

/// Every non-metadata regular file under `dir`, recursively, sorted by path.
///
/// Symbolic links are not followed, so a link back to an ancestor cannot
/// make the walk revisit directories.
pub fn discover_samples(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current).map_err(|e| Error::file(&current, e))? {
            let entry = entry.map_err(|e| Error::file(&current, e))?;
            let file_type = entry.file_type().map_err(|e| Error::file(entry.path(), e))?;
            let path = entry.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file() && !is_metadata(&path) {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Discovered sample files plus the configuration used to decode them
#[derive(Debug, Clone)]
pub(crate) struct Dataset {
    root: PathBuf,
    files: Vec<PathBuf>,
    config: LoaderConfig,
}

impl Dataset {
    pub(crate) fn open(dir: &Path, config: LoaderConfig) -> Result<Self> {
        if config.batch_size() == 0 {
            return Err(Error::ConfigError("batch_size must be at least 1".to_string()));
        }
        let files = discover_samples(dir)?;
        if files.is_empty() {
            return Err(Error::EmptyDataset(dir.to_path_buf()));
        }
        log::info!("Found {} terrain files in {}", files.len(), dir.display());
        Ok(Self { root: dir.to_path_buf(), files, config })
    }

    pub(crate) fn len(&self) -> usize {
        self.files.len()
    }

    pub(crate) fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub(crate) fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub(crate) fn batches_per_epoch(&self) -> usize {
        self.files.len().div_ceil(self.config.batch_size())
    }

    /// Fresh index ordering. Seeded loaders reseed from
    /// `seed + total_batches_seen` so a rerun reproduces every shuffle.
    pub(crate) fn ordering(&self, rng: &mut StdRng, total_batches_seen: u64) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.files.len()).collect();
        if self.config.shuffle() {
            if let Some(seed) = self.config.seed() {
                *rng = StdRng::seed_from_u64(seed.wrapping_add(total_batches_seen));
            }
            order.shuffle(rng);
        }
        order
    }

    pub(crate) fn new_rng(&self) -> StdRng {
        match self.config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Decode the files at `indices` into one batch
    pub(crate) fn load(&self, indices: &[usize]) -> Result<VoxelBatch> {
        let shape = self.config.shape();
        let layout = self.config.layout();
        let mut values = Vec::with_capacity(indices.len() * shape.volume());
        for &i in indices {
            let grid = read_sample(&self.files[i], shape)?;
            values.extend(grid.iter().copied());
        }

        let [a, b, c, d] = layout.sample_dims(shape);
        let actual = values.len();
        let data = Array5::from_shape_vec((indices.len(), a, b, c, d), values)
            .map_err(|_| Error::ShapeMismatch { expected: shape, actual })?;
        Ok(VoxelBatch::new(data, layout, shape))
    }
}

/// Epoch-indexed access to a directory of samples.
///
/// Batch `i` covers positions `i * batch_size ..` of the current index
/// ordering, so the final batch of an epoch may be short.
#[derive(Debug)]
pub struct BatchLoader {
    dataset: Dataset,
    order: Vec<usize>,
    rng: StdRng,
    total_batches_seen: u64,
}

impl BatchLoader {
    /// Discover samples under `dir`.
    ///
    /// Fails if `dir` is missing, holds no samples, or the batch size is 0.
    pub fn new(dir: impl AsRef<Path>, config: LoaderConfig) -> Result<Self> {
        let dataset = Dataset::open(dir.as_ref(), config)?;
        let mut rng = dataset.new_rng();
        let order = dataset.ordering(&mut rng, 0);
        Ok(Self { dataset, order, rng, total_batches_seen: 0 })
    }

    /// Number of sample files
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.len() == 0
    }

    /// `ceil(len / batch_size)`
    pub fn batches_per_epoch(&self) -> usize {
        self.dataset.batches_per_epoch()
    }

    pub fn config(&self) -> &LoaderConfig {
        self.dataset.config()
    }

    pub fn directory(&self) -> &Path {
        self.dataset.root()
    }

    /// Sample files in discovery order
    pub fn files(&self) -> &[PathBuf] {
        self.dataset.files()
    }

    /// Current index ordering
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn total_batches_seen(&self) -> u64 {
        self.total_batches_seen
    }

    /// Decode batch `index` of the current ordering
    pub fn get_batch(&mut self, index: usize) -> Result<VoxelBatch> {
        let len = self.batches_per_epoch();
        if index >= len {
            return Err(Error::BatchIndexOutOfRange { index, len });
        }
        let batch_size = self.config().batch_size();
        let start = index * batch_size;
        let end = (start + batch_size).min(self.order.len());

        self.total_batches_seen += 1;
        self.dataset.load(&self.order[start..end])
    }

    /// Start a new epoch, reshuffling when enabled
    pub fn on_epoch_end(&mut self) {
        self.order = self.dataset.ordering(&mut self.rng, self.total_batches_seen);
    }

    /// Switch to continuous, always-full batches
    pub fn into_cursor(self) -> super::BatchCursor {
        super::BatchCursor::from_dataset(self.dataset)
    }
}
