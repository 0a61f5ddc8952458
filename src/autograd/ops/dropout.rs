//! Inverted dropout

use super::basic::mul;
use crate::autograd::Tensor;
use rand::Rng;

/// Zero each element with probability `rate`, scaling survivors by
/// `1 / (1 - rate)` so the expected activation is unchanged.
///
/// A rate of zero (or less) returns the input unchanged.
pub fn dropout<R: Rng>(a: &Tensor, rate: f32, rng: &mut R) -> Tensor {
    if rate <= 0.0 {
        return a.clone();
    }
    let rate = rate.min(0.999);
    let keep_scale = 1.0 / (1.0 - rate);
    let mask: Vec<f32> = (0..a.len())
        .map(|_| if rng.random::<f32>() < rate { 0.0 } else { keep_scale })
        .collect();

    mul(a, &Tensor::from_vec(mask, false))
}
