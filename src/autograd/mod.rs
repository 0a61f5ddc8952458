//! Reverse-mode autograd engine
//!
//! Tensors are flat `Array1<f32>` buffers. Each op that produces a tensor
//! requiring gradients attaches a [`BackwardOp`] holding clones of its
//! inputs; [`backward`] seeds the output gradient and walks those ops back
//! to the leaves. Every intermediate is consumed once by the networks in
//! this crate, so the recursive walk visits each op exactly once.

mod backward;
mod ops;
mod tensor;

#[cfg(test)]
mod tests;

pub use backward::BackwardOp;
pub use ops::*;
pub use tensor::Tensor;

/// Perform backward pass on a tensor
pub fn backward(tensor: &mut Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    if let Some(grad) = grad_output {
        tensor.set_grad(grad);
    } else {
        // Initialize with ones for scalar loss
        let ones = ndarray::Array1::ones(tensor.data().len());
        tensor.set_grad(ones);
    }

    if let Some(op) = tensor.backward_op() {
        op.backward();
    }
}
