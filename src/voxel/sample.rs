//! Sample file encoding: one flattened grid per file

use super::metadata::is_metadata;
use super::{VoxelGrid, VoxelShape};
use crate::{Error, Result};
use ndarray::Array3;
use std::fs;
use std::path::{Path, PathBuf};

/// Write a grid as a single comma-separated row
pub fn write_sample(path: &Path, grid: &VoxelGrid) -> Result<()> {
    let mut row = grid.to_csv_row();
    row.push('\n');
    fs::write(path, row).map_err(|e| Error::file(path, e))
}

/// Decode sample text into a grid of `f32` values.
///
/// Values may be integers or floats separated by commas and/or whitespace.
pub fn parse_sample(text: &str, shape: VoxelShape, source: &Path) -> Result<Array3<f32>> {
    let values = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<f32>().map_err(|_| Error::MalformedSample {
                path: source.to_path_buf(),
                message: format!("{tok:?} is not a number"),
            })
        })
        .collect::<Result<Vec<f32>>>()?;

    let actual = values.len();
    Array3::from_shape_vec(shape.dims(), values)
        .map_err(|_| Error::ShapeMismatch { expected: shape, actual })
}

/// Read and decode one sample file
pub fn read_sample(path: &Path, shape: VoxelShape) -> Result<Array3<f32>> {
    let text = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
    parse_sample(&text, shape, path)
}

/// Regular non-metadata files directly inside `dir`, sorted by path
pub fn list_sample_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::file(dir, e))? {
        let path = entry.map_err(|e| Error::file(dir, e))?.path();
        if path.is_file() && !is_metadata(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
