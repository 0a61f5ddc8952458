//! Gaussian height-field terrain for exercising the pipeline without data

use super::metadata::write_metadata;
use super::{write_sample, VoxelGrid, VoxelShape};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn gaussian(x: f64, mu: f64, sigma: f64) -> f64 {
    (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// `n` evenly spaced values from `start` to `end` inclusive
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// One height-field cube.
///
/// Along `y` the surface height follows a unit-width Gaussian centred at
/// `mu` over `[-3, 3]`; every `x` slice is identical and each `(x, y)`
/// column has exactly one occupied cell.
pub fn gaussian_terrain(shape: VoxelShape, mu: f64) -> VoxelGrid {
    let heights: Vec<usize> = linspace(-3.0, 3.0, shape.y)
        .into_iter()
        .map(|t| {
            let level = (gaussian(t, mu, 1.0) * shape.z as f64).floor() as usize;
            level.min(shape.z - 1)
        })
        .collect();

    let mut grid = VoxelGrid::zeros(shape);
    for x in 0..shape.x {
        for (y, &z) in heights.iter().enumerate() {
            // Heights are clamped to the grid
            let _ = grid.set([x, y, z]);
        }
    }
    grid
}

/// `count` cubes with means spread evenly over `[0.5, 1)`
pub fn gaussian_terrains(shape: VoxelShape, count: usize) -> Vec<VoxelGrid> {
    let means = linspace(0.5, 1.0, count + 1);
    means[..count].iter().map(|&mu| gaussian_terrain(shape, mu)).collect()
}

/// Write `count` synthetic samples as `dummy-<i>` with sidecars
pub fn write_synthetic(dir: &Path, shape: VoxelShape, count: usize) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| Error::file(dir, e))?;

    let mut written = Vec::with_capacity(count);
    for (i, grid) in gaussian_terrains(shape, count).iter().enumerate() {
        let path = dir.join(format!("dummy-{i}"));
        write_sample(&path, grid)?;
        write_metadata(&path, shape)?;
        written.push(path);
    }
    log::info!("wrote {} synthetic samples to {}", written.len(), dir.display());
    Ok(written)
}
