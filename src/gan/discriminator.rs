//! Discriminator network: voxel grid to real/fake logit

use super::config::DiscriminatorConfig;
use super::dense::{export_layers, import_layers, Dense};
use crate::autograd::{dropout, leaky_relu, sigmoid_scalar};
use crate::io::{Model, ModelMetadata};
use crate::{Result, Tensor};
use rand::rngs::StdRng;
use rand::Rng;

/// MLP scoring flattened grids.
///
/// Hidden layers use LeakyReLU followed by dropout during training. The
/// output is one raw logit per sample; pair it with
/// [`bce_with_logits`](crate::autograd::bce_with_logits).
#[derive(Debug, Clone)]
pub struct Discriminator {
    config: DiscriminatorConfig,
    input_dim: usize,
    layers: Vec<Dense>,
}

impl Discriminator {
    pub fn new<R: Rng>(config: DiscriminatorConfig, input_dim: usize, rng: &mut R) -> Self {
        let mut dims = vec![input_dim];
        dims.extend(&config.hidden_dims);
        dims.push(1);

        let layers = dims.windows(2).map(|w| Dense::new(w[0], w[1], rng)).collect();
        Self { config, input_dim, layers }
    }

    pub fn config(&self) -> &DiscriminatorConfig {
        &self.config
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Logits for `batch` concatenated samples.
    ///
    /// Dropout is applied only when `training` supplies an RNG.
    pub fn forward(&self, x: &Tensor, batch: usize, training: Option<&mut StdRng>) -> Tensor {
        let last = self.layers.len() - 1;
        let mut rng = training;
        let mut h = x.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            h = layer.forward(&h, batch);
            if i == last {
                break;
            }
            h = leaky_relu(&h, self.config.leaky_slope);
            if let Some(rng) = rng.as_deref_mut() {
                h = dropout(&h, self.config.dropout, rng);
            }
        }
        h
    }

    /// Probability that each sample is real, without dropout or graph
    pub fn score(&self, x: &[f32], batch: usize) -> Vec<f32> {
        self.forward(&Tensor::from_vec(x.to_vec(), false), batch, None)
            .data()
            .iter()
            .map(|&l| sigmoid_scalar(l))
            .collect()
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

    pub fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }

    pub fn to_model(&self) -> Model {
        let metadata = ModelMetadata::new("discriminator", "mlp-discriminator")
            .with_custom("input_dim", serde_json::json!(self.input_dim))
            .with_custom("hidden_dims", serde_json::json!(self.config.hidden_dims));
        Model::new(metadata, export_layers(&self.layers))
    }

    pub fn load_model(&mut self, model: &Model) -> Result<()> {
        import_layers(&mut self.layers, model)
    }
}
