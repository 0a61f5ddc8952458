//! Crate error type.
//!
//! Every variant carries enough context (path, line, shape) to act on the
//! failure without re-running under a debugger.

use std::path::PathBuf;
use thiserror::Error;

use crate::voxel::VoxelShape;

/// Errors produced by voxelization, loading, training and model IO.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is invalid or could not be read.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A point file line could not be turned into a voxel coordinate.
    #[error("Malformed point at {path}:{line}: {message} (got {text:?})")]
    MalformedPoint {
        path: PathBuf,
        line: usize,
        text: String,
        message: String,
    },

    /// A point file had no coordinate lines at all.
    #[error("Point file {0} contains no coordinates")]
    EmptyPointFile(PathBuf),

    /// A sample file could not be decoded into a grid.
    #[error("Malformed sample {path}: {message}")]
    MalformedSample { path: PathBuf, message: String },

    /// Flat data length does not match the requested grid shape.
    #[error("Shape mismatch: expected {expected} ({} values), got {actual} values", .expected.volume())]
    ShapeMismatch { expected: VoxelShape, actual: usize },

    /// A coordinate lies outside the grid.
    #[error("Point ({}, {}, {}) lies outside grid {shape}", .point[0], .point[1], .point[2])]
    PointOutOfBounds { point: [usize; 3], shape: VoxelShape },

    /// Source directory does not exist or is not a directory.
    #[error("Data directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    /// Source directory contains no sample files.
    #[error("No sample files found under {0}")]
    EmptyDataset(PathBuf),

    /// Indexed batch retrieval past the end of an epoch.
    #[error("Asked to retrieve batch {index}, but the loader has {len} batches")]
    BatchIndexOutOfRange { index: usize, len: usize },

    /// Model weights do not fit the network they are loaded into.
    #[error("Weight mismatch for '{name}': {message}")]
    WeightMismatch { name: String, message: String },

    /// A training step produced non-finite values.
    #[error("Training diverged: {0}")]
    Diverged(String),

    /// Serialization or deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File IO failure with the path that caused it.
    #[error("IO error on {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bare IO failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Attach a path to an IO error.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File { path: path.into(), source }
    }

    /// Whether the error comes from user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigError(_)
                | Self::MalformedPoint { .. }
                | Self::EmptyPointFile(_)
                | Self::MalformedSample { .. }
                | Self::ShapeMismatch { .. }
                | Self::PointOutOfBounds { .. }
                | Self::DirectoryNotFound(_)
                | Self::EmptyDataset(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
