//! Generator network: latent noise to voxel occupancy

use super::config::GeneratorConfig;
use super::dense::{export_layers, import_layers, Dense};
use crate::autograd::{relu, sigmoid};
use crate::io::{Model, ModelMetadata};
use crate::{Error, Result, Tensor};
use rand::Rng;

/// MLP mapping `latent_dim` noise to `output_dim` occupancy probabilities.
///
/// Hidden layers use ReLU; the output layer uses a sigmoid so values lie in
/// `(0, 1)` and round to binary voxels.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    output_dim: usize,
    layers: Vec<Dense>,
}

impl Generator {
    pub fn new<R: Rng>(config: GeneratorConfig, output_dim: usize, rng: &mut R) -> Self {
        let mut dims = vec![config.latent_dim];
        dims.extend(&config.hidden_dims);
        dims.push(output_dim);

        let layers = dims.windows(2).map(|w| Dense::new(w[0], w[1], rng)).collect();
        Self { config, output_dim, layers }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn latent_dim(&self) -> usize {
        self.config.latent_dim
    }

    pub fn output_dim(&self) -> usize {
        self.output_dim
    }

    /// Differentiable forward pass over `batch` concatenated latent vectors
    pub fn forward(&self, noise: &Tensor, batch: usize) -> Tensor {
        let last = self.layers.len() - 1;
        let mut x = noise.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            let h = layer.forward(&x, batch);
            x = if i == last { sigmoid(&h) } else { relu(&h) };
        }
        x
    }

    /// Forward pass without keeping the graph
    pub fn predict(&self, noise: &[f32], batch: usize) -> Vec<f32> {
        self.forward(&Tensor::from_vec(noise.to_vec(), false), batch)
            .data()
            .to_vec()
    }

    pub fn parameters(&self) -> Vec<&Tensor> {
        self.layers.iter().flat_map(Dense::parameters).collect()
    }

    pub fn parameters_mut(&mut self) -> Vec<&mut Tensor> {
        self.layers.iter_mut().flat_map(Dense::parameters_mut).collect()
    }

    pub fn num_parameters(&self) -> usize {
        self.layers.iter().map(Dense::num_parameters).sum()
    }

    /// Snapshot of the weights for saving
    pub fn to_model(&self) -> Model {
        let metadata = ModelMetadata::new("generator", "mlp-generator")
            .with_custom("latent_dim", serde_json::json!(self.config.latent_dim))
            .with_custom("hidden_dims", serde_json::json!(self.config.hidden_dims))
            .with_custom("output_dim", serde_json::json!(self.output_dim));
        Model::new(metadata, export_layers(&self.layers))
    }

    /// Architecture recorded in a saved generator: `(config, output_dim)`
    pub fn architecture_of(model: &Model) -> Result<(GeneratorConfig, usize)> {
        let config = GeneratorConfig {
            latent_dim: metadata_field(model, "latent_dim")?,
            hidden_dims: metadata_field(model, "hidden_dims")?,
        };
        let output_dim = metadata_field(model, "output_dim")?;
        Ok((config, output_dim))
    }

    /// Replace the weights with those of a saved generator of the same shape
    pub fn load_model(&mut self, model: &Model) -> Result<()> {
        import_layers(&mut self.layers, model)
    }
}

fn metadata_field<T: serde::de::DeserializeOwned>(model: &Model, key: &str) -> Result<T> {
    let mismatch = |message: String| Error::WeightMismatch {
        name: model.metadata.name.clone(),
        message,
    };
    let value = model
        .metadata
        .custom
        .get(key)
        .cloned()
        .ok_or_else(|| mismatch(format!("metadata is missing '{key}'")))?;
    serde_json::from_value(value).map_err(|e| mismatch(format!("bad '{key}' in metadata: {e}")))
}
