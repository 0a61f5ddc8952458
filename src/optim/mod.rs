//! Optimizers for training neural networks

mod adam;
mod clip;
mod optimizer;

pub use adam::Adam;
pub use clip::{clip_grad_norm_refs, grad_norm};
pub use optimizer::Optimizer;
