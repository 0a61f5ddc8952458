//! Model saving

use super::format::{ModelFormat, SaveConfig};
use super::model::Model;
use crate::{Error, Result};
use std::fs;
use std::path::Path;

/// Save a model to a file
///
/// # Example
///
/// ```no_run
/// use terragan::io::{Model, ModelMetadata, save_model, SaveConfig, ModelFormat};
/// # use terragan::Tensor;
///
/// let params = vec![
///     ("weight".to_string(), Tensor::from_vec(vec![1.0, 2.0], true)),
/// ];
/// let model = Model::new(ModelMetadata::new("my-model", "mlp"), params);
/// let config = SaveConfig::new(ModelFormat::Json);
///
/// save_model(&model, "model.json", &config).unwrap();
/// ```
pub fn save_model(model: &Model, path: impl AsRef<Path>, config: &SaveConfig) -> Result<()> {
    let path = path.as_ref();
    let state = model.to_state();

    let data = match config.format {
        ModelFormat::Json if config.pretty => serde_json::to_string_pretty(&state)
            .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?,
        ModelFormat::Json => serde_json::to_string(&state)
            .map_err(|e| Error::Serialization(format!("JSON serialization failed: {e}")))?,
        ModelFormat::Yaml => serde_yaml::to_string(&state)
            .map_err(|e| Error::Serialization(format!("YAML serialization failed: {e}")))?,
    };

    fs::write(path, data).map_err(|e| Error::file(path, e))
}
