//! Loading training specifications from YAML files

use crate::config::schema::TrainSpec;
use crate::config::validate::validate_config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read and parse a YAML training config without validating it
///
/// Use this when further changes, such as command-line overrides, are
/// applied before [`validate_config`] runs.
pub fn parse_config<P: AsRef<Path>>(config_path: P) -> Result<TrainSpec> {
    let yaml_content = fs::read_to_string(config_path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read config file {}: {}",
            config_path.as_ref().display(),
            e
        ))
    })?;

    serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML config: {e}")))
}

/// Read, parse and validate a YAML training config
///
/// # Example
///
/// ```no_run
/// use terragan::config::load_config;
///
/// let spec = load_config("terragan.yaml")?;
/// println!("training for {} epochs", spec.training.epochs);
/// # Ok::<(), terragan::Error>(())
/// ```
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<TrainSpec> {
    let spec = parse_config(config_path)?;
    validate_config(&spec)?;
    Ok(spec)
}
