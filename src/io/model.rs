//! Model structure for serialization

use crate::{Error, Result, Tensor};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model metadata containing architecture and training information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier
    pub name: String,

    /// Architecture tag (e.g. "mlp-generator")
    pub architecture: String,

    /// Model version
    pub version: String,

    /// Custom metadata fields
    #[serde(default)]
    pub custom: HashMap<String, serde_json::Value>,
}

impl ModelMetadata {
    /// Create new metadata with minimal fields
    pub fn new(name: impl Into<String>, architecture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            architecture: architecture.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            custom: HashMap::new(),
        }
    }

    /// Add custom metadata field
    pub fn with_custom(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.custom.insert(key.into(), value);
        self
    }
}

/// Information about a model parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name (e.g., "layer1.weight")
    pub name: String,

    /// Parameter shape
    pub shape: Vec<usize>,
}

/// Serializable model state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelState {
    pub metadata: ModelMetadata,

    pub parameters: Vec<ParameterInfo>,

    /// Flattened parameter data, in parameter order
    pub data: Vec<f32>,
}

/// Named parameters plus metadata
#[derive(Debug)]
pub struct Model {
    pub metadata: ModelMetadata,

    pub parameters: Vec<(String, Tensor)>,
}

impl Model {
    pub fn new(metadata: ModelMetadata, parameters: Vec<(String, Tensor)>) -> Self {
        Self { metadata, parameters }
    }

    /// Get parameter by name
    pub fn get_parameter(&self, name: &str) -> Option<&Tensor> {
        self.parameters.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// Total number of scalar parameters
    pub fn num_parameters(&self) -> usize {
        self.parameters.iter().map(|(_, t)| t.len()).sum()
    }

    /// Convert model to serializable state
    pub fn to_state(&self) -> ModelState {
        let mut data = Vec::with_capacity(self.num_parameters());
        let parameters = self
            .parameters
            .iter()
            .map(|(name, tensor)| {
                data.extend(tensor.data().iter().copied());
                ParameterInfo { name: name.clone(), shape: vec![tensor.len()] }
            })
            .collect();

        ModelState { metadata: self.metadata.clone(), parameters, data }
    }

    /// Create model from serializable state.
    ///
    /// Fails if the parameter shapes do not account for exactly the stored
    /// data.
    pub fn from_state(state: ModelState) -> Result<Self> {
        let mut offset = 0;
        let mut parameters = Vec::with_capacity(state.parameters.len());
        for info in state.parameters {
            let size: usize = info.shape.iter().product();
            let Some(values) = state.data.get(offset..offset + size) else {
                return Err(Error::Serialization(format!(
                    "parameter '{}' needs {size} values but only {} remain",
                    info.name,
                    state.data.len().saturating_sub(offset)
                )));
            };
            offset += size;
            parameters.push((info.name, Tensor::from_vec(values.to_vec(), true)));
        }

        if offset != state.data.len() {
            return Err(Error::Serialization(format!(
                "{} trailing values after the last parameter",
                state.data.len() - offset
            )));
        }

        Ok(Self { metadata: state.metadata, parameters })
    }
}
