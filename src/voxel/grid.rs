//! Dense binary occupancy grid and point-file voxelization

use super::VoxelShape;
use crate::{Error, Result};
use ndarray::Array3;
use std::fs;
use std::path::Path;

/// Binary occupancy grid indexed `[x][y][z]`.
///
/// Cells are 0 or 1. Storage is standard (row-major) layout, so
/// [`VoxelGrid::flatten`] walks `z` fastest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    cells: Array3<u8>,
}

impl VoxelGrid {
    /// Empty grid of the given shape
    pub fn zeros(shape: VoxelShape) -> Self {
        Self { cells: Array3::zeros(shape.dims()) }
    }

    /// Grid with exactly the given points set
    ///
    /// Duplicate points are harmless. Any point outside the grid fails the
    /// whole call.
    pub fn from_points<I>(shape: VoxelShape, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = [usize; 3]>,
    {
        let mut grid = Self::zeros(shape);
        for point in points {
            grid.set(point)?;
        }
        Ok(grid)
    }

    /// Rebuild a grid from a row-major flat buffer
    pub fn from_flat(shape: VoxelShape, values: Vec<u8>) -> Result<Self> {
        let actual = values.len();
        let cells = Array3::from_shape_vec(shape.dims(), values)
            .map_err(|_| Error::ShapeMismatch { expected: shape, actual })?;
        Ok(Self { cells })
    }

    /// Mark one cell occupied
    pub fn set(&mut self, [x, y, z]: [usize; 3]) -> Result<()> {
        let shape = self.shape();
        if !shape.contains(x, y, z) {
            return Err(Error::PointOutOfBounds { point: [x, y, z], shape });
        }
        self.cells[[x, y, z]] = 1;
        Ok(())
    }

    /// Cell value, or `None` outside the grid
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        self.cells.get([x, y, z]).copied()
    }

    pub fn shape(&self) -> VoxelShape {
        let (x, y, z) = self.cells.dim();
        VoxelShape::new(x, y, z)
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Row-major copy of the cells
    pub fn flatten(&self) -> Vec<u8> {
        self.cells.iter().copied().collect()
    }

    /// Flattened cells joined by commas, without a trailing newline
    pub fn to_csv_row(&self) -> String {
        let mut row = String::with_capacity(self.cells.len() * 2);
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                row.push(',');
            }
            row.push(if *cell == 0 { '0' } else { '1' });
        }
        row
    }

    pub fn as_array(&self) -> &Array3<u8> {
        &self.cells
    }
}

/// Voxelize comma-separated `x,y,z` lines.
///
/// `source` only labels errors. Blank lines are skipped; a text without any
/// coordinate line is rejected.
pub fn voxelize_str(text: &str, shape: VoxelShape, source: &Path) -> Result<VoxelGrid> {
    let mut grid = VoxelGrid::zeros(shape);
    let mut points = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let malformed = |message: String| Error::MalformedPoint {
            path: source.to_path_buf(),
            line: idx + 1,
            text: line.to_string(),
            message,
        };

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(malformed(format!("expected 3 fields, found {}", fields.len())));
        }

        let mut point = [0usize; 3];
        for (axis, (slot, field)) in point.iter_mut().zip(&fields).enumerate() {
            *slot = field.parse().map_err(|_| {
                malformed(format!("field {} is not a non-negative integer", axis + 1))
            })?;
        }

        grid.set(point).map_err(|err| malformed(err.to_string()))?;
        points += 1;
    }

    if points == 0 {
        return Err(Error::EmptyPointFile(source.to_path_buf()));
    }
    log::debug!("voxelized {} points from {}", points, source.display());
    Ok(grid)
}

/// Voxelize one point file
pub fn voxelize_file(path: &Path, shape: VoxelShape) -> Result<VoxelGrid> {
    let text = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;
    voxelize_str(&text, shape, path)
}

/// Voxelize every point file directly inside `raw_dir`.
///
/// Each input produces a sample file of the same name in `out_dir` plus a
/// `.meta` sidecar. Sidecars already present in `raw_dir` are ignored.
/// Returns the number of samples written.
pub fn voxelize_dir(raw_dir: &Path, out_dir: &Path, shape: VoxelShape) -> Result<usize> {
    let inputs = super::list_sample_files(raw_dir)?;
    fs::create_dir_all(out_dir).map_err(|e| Error::file(out_dir, e))?;

    for input in &inputs {
        let grid = voxelize_file(input, shape)?;
        let Some(name) = input.file_name() else {
            continue;
        };
        let target = out_dir.join(name);
        super::write_sample(&target, &grid)?;
        super::metadata::write_metadata(&target, shape)?;
    }

    log::info!(
        "voxelized {} point files from {} into {}",
        inputs.len(),
        raw_dir.display(),
        out_dir.display()
    );
    Ok(inputs.len())
}
