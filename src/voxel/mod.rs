//! Voxel grids and the text formats around them
//!
//! Raw point files hold one `x,y,z` integer triple per line. Voxelizing one
//! yields a [`VoxelGrid`], persisted as a single comma-separated row in
//! row-major order with a `.meta` sidecar (see [`metadata`]).

mod clean;
mod grid;
pub mod metadata;
mod sample;
mod shape;
mod synthetic;


pub use clean::{clean_file, clean_points};
pub use grid::{voxelize_dir, voxelize_file, voxelize_str, VoxelGrid};
pub use sample::{list_sample_files, parse_sample, read_sample, write_sample};
pub use shape::VoxelShape;
pub use synthetic::{gaussian_terrain, gaussian_terrains, write_synthetic};
