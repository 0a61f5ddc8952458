//! Grid dimensions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dimensions `(x, y, z)` of a voxel grid.
///
/// Written and parsed as `"X,Y,Z"`; `XxYxZ` is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VoxelShape {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl VoxelShape {
    /// Create a shape. Dimensions are not validated here; use
    /// [`VoxelShape::from_str`] for untrusted input.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of cells
    pub const fn volume(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Dimensions as an ndarray shape tuple
    pub const fn dims(&self) -> (usize, usize, usize) {
        (self.x, self.y, self.z)
    }

    /// Whether `(x, y, z)` addresses a cell inside the grid
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.x && y < self.y && z < self.z
    }
}

impl Default for VoxelShape {
    fn default() -> Self {
        Self::new(16, 16, 16)
    }
}

impl fmt::Display for VoxelShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for VoxelShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            Error::ConfigError(format!(
                "input shape must be three positive integers X,Y,Z, got {s:?}"
            ))
        };

        let parts: Vec<&str> = if s.contains(',') {
            s.split(',').collect()
        } else {
            s.split(['x', 'X']).collect()
        };
        if parts.len() != 3 {
            return Err(invalid());
        }

        let mut dims = [0usize; 3];
        for (dim, part) in dims.iter_mut().zip(&parts) {
            *dim = part.trim().parse().map_err(|_| invalid())?;
            if *dim == 0 {
                return Err(invalid());
            }
        }
        dims[0]
            .checked_mul(dims[1])
            .and_then(|v| v.checked_mul(dims[2]))
            .ok_or_else(invalid)?;

        Ok(Self::new(dims[0], dims[1], dims[2]))
    }
}

impl TryFrom<String> for VoxelShape {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<VoxelShape> for String {
    fn from(shape: VoxelShape) -> Self {
        shape.to_string()
    }
}
