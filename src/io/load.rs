//! Model loading

use super::format::ModelFormat;
use super::model::{Model, ModelState};
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a model from a file
///
/// The format is detected from the file extension.
///
/// # Example
///
/// ```no_run
/// use terragan::io::load_model;
///
/// let model = load_model("generator.json").expect("failed to load model");
/// println!("Loaded model: {}", model.metadata.name);
/// ```
pub fn load_model(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();

    let format = ModelFormat::from_path(path).ok_or_else(|| {
        Error::Serialization(format!("Unsupported model file extension: {}", path.display()))
    })?;

    let content = fs::read_to_string(path).map_err(|e| Error::file(path, e))?;

    let state: ModelState = match format {
        ModelFormat::Json => serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("JSON deserialization failed: {e}")))?,
        ModelFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| Error::Serialization(format!("YAML deserialization failed: {e}")))?,
    };

    Model::from_state(state)
}
