//! `.meta` sidecars recording the grid dimensions of a sample file
//!
//! A sidecar lives next to its sample as `<sample path>.meta` and holds the
//! text `X,Y,Z`.

use super::VoxelShape;
use crate::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension marking a sidecar
pub const META_EXTENSION: &str = "meta";

/// Whether `path` is a sidecar rather than a sample
pub fn is_metadata(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == META_EXTENSION)
}

/// Sidecar path for a sample: the sample path with `.meta` appended
pub fn metadata_path(sample: &Path) -> PathBuf {
    let mut name = OsString::from(sample.as_os_str());
    name.push(".");
    name.push(META_EXTENSION);
    PathBuf::from(name)
}

/// Write the sidecar for `sample`
pub fn write_metadata(sample: &Path, shape: VoxelShape) -> Result<PathBuf> {
    let path = metadata_path(sample);
    fs::write(&path, shape.to_string()).map_err(|e| Error::file(&path, e))?;
    Ok(path)
}

/// Read the sidecar for `sample`
pub fn read_metadata(sample: &Path) -> Result<VoxelShape> {
    let path = metadata_path(sample);
    let text = fs::read_to_string(&path).map_err(|e| Error::file(&path, e))?;
    text.trim().parse().map_err(|_| Error::MalformedSample {
        path,
        message: format!("metadata {:?} is not X,Y,Z", text.trim()),
    })
}

/// Write sidecars for every sample directly inside `dir`.
///
/// Returns the number of sidecars written.
pub fn write_metadata_dir(dir: &Path, shape: VoxelShape) -> Result<usize> {
    let samples = super::list_sample_files(dir)?;
    for sample in &samples {
        write_metadata(sample, shape)?;
    }
    log::info!("wrote {} metadata sidecars in {}", samples.len(), dir.display());
    Ok(samples.len())
}
