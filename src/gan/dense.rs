//! Fully connected layer and parameter export shared by both networks

use super::latent::standard_normal;
use crate::autograd::{linear, LinearDims};
use crate::io::Model;
use crate::{Error, Result, Tensor};
use rand::Rng;

/// `y = x · W + b` with `W` stored `(in, out)` row-major
#[derive(Debug, Clone)]
pub struct Dense {
    weight: Tensor,
    bias: Tensor,
    in_features: usize,
    out_features: usize,
}

impl Dense {
    /// Xavier-normal weights, zero bias
    pub fn new<R: Rng>(in_features: usize, out_features: usize, rng: &mut R) -> Self {
        let std = (2.0 / (in_features + out_features) as f64).sqrt() as f32;
        let weight: Vec<f32> = (0..in_features * out_features)
            .map(|_| standard_normal(rng) * std)
            .collect();

        Self {
            weight: Tensor::from_vec(weight, true),
            bias: Tensor::zeros(out_features, true),
            in_features,
            out_features,
        }
    }

    pub fn forward(&self, x: &Tensor, batch: usize) -> Tensor {
        let dims = LinearDims {
            batch,
            in_features: self.in_features,
            out_features: self.out_features,
        };
        linear(x, &self.weight, &self.bias, dims)
    }

    pub fn in_features(&self) -> usize {
        self.in_features
    }

    pub fn out_features(&self) -> usize {
        self.out_features
    }

    pub fn parameters(&self) -> [&Tensor; 2] {
        [&self.weight, &self.bias]
    }

    pub fn parameters_mut(&mut self) -> [&mut Tensor; 2] {
        [&mut self.weight, &mut self.bias]
    }

    pub fn num_parameters(&self) -> usize {
        self.weight.len() + self.bias.len()
    }
}

/// Named copies of every layer's weight and bias (`layer<i>.weight`, ...)
pub(crate) fn export_layers(layers: &[Dense]) -> Vec<(String, Tensor)> {
    layers
        .iter()
        .enumerate()
        .flat_map(|(i, layer)| {
            [
                (format!("layer{i}.weight"), layer.weight.detach()),
                (format!("layer{i}.bias"), layer.bias.detach()),
            ]
        })
        .collect()
}

/// Overwrite layer parameters with the matching entries of `model`.
///
/// Every layer parameter must be present with the same length; nothing is
/// modified unless all of them are.
pub(crate) fn import_layers(layers: &mut [Dense], model: &Model) -> Result<()> {
    let mut staged = Vec::with_capacity(layers.len() * 2);
    for (i, layer) in layers.iter().enumerate() {
        for (suffix, param) in ["weight", "bias"].into_iter().zip(layer.parameters()) {
            let name = format!("layer{i}.{suffix}");
            let source = model.get_parameter(&name).ok_or_else(|| Error::WeightMismatch {
                name: name.clone(),
                message: format!("missing from '{}'", model.metadata.name),
            })?;
            if source.len() != param.len() {
                return Err(Error::WeightMismatch {
                    name,
                    message: format!("expected {} values, found {}", param.len(), source.len()),
                });
            }
            staged.push(source.data().clone());
        }
    }

    let mut staged = staged.into_iter();
    for layer in layers.iter_mut() {
        for param in layer.parameters_mut() {
            if let Some(values) = staged.next() {
                *param.data_mut() = values;
            }
        }
    }
    Ok(())
}
