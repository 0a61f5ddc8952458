//! Elementwise product
//!
//! The local derivative of each input is known at forward time, so the
//! backward op only multiplies the upstream gradient by a stored factor.

use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::cell::RefCell;
use std::rc::Rc;

/// Inputs paired with `∂out/∂input`, elementwise
struct ElementwiseBackward {
    inputs: Vec<(Tensor, Array1<f32>)>,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for ElementwiseBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            for (input, local) in &self.inputs {
                if input.requires_grad() {
                    input.accumulate_grad(grad * local);
                }
            }
            for (input, _) in &self.inputs {
                if let Some(op) = input.backward_op() {
                    op.backward();
                }
            }
        }
    }
}

fn elementwise(data: Array1<f32>, inputs: Vec<(Tensor, Array1<f32>)>) -> Tensor {
    let requires_grad = inputs.iter().any(|(t, _)| t.requires_grad());
    let mut result = Tensor::new(data, requires_grad);
    if requires_grad {
        let backward_op = Rc::new(ElementwiseBackward { inputs, result_grad: result.grad_cell() });
        result.set_backward_op(backward_op);
    }
    result
}

/// Multiply two tensors element-wise
pub fn mul(a: &Tensor, b: &Tensor) -> Tensor {
    // ∂(a·b)/∂a = b, ∂(a·b)/∂b = a
    elementwise(
        a.data() * b.data(),
        vec![(a.clone(), b.data().clone()), (b.clone(), a.data().clone())],
    )
}
