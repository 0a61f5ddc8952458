//! Autograd operations with backward passes
//!
//! This module provides differentiable operations for automatic differentiation.

mod activations;
mod basic;
mod dropout;
mod linear;
mod loss;

pub use activations::{leaky_relu, relu, sigmoid, sigmoid_scalar};
pub use basic::mul;
pub use dropout::dropout;
pub use linear::{linear, LinearDims};
pub use loss::bce_with_logits;
