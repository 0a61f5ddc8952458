//! Batched dense layer: `y = x · W + b`
//!
//! `x` is `(batch, in)`, `W` is `(in, out)`, `b` is `(out)`; all row-major
//! and flattened.

use crate::autograd::{BackwardOp, Tensor};
use ndarray::{Array1, ArrayView2, Axis};
use std::cell::RefCell;
use std::rc::Rc;

/// Shape of a dense layer application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearDims {
    pub batch: usize,
    pub in_features: usize,
    pub out_features: usize,
}

fn view2(data: &Array1<f32>, rows: usize, cols: usize) -> ArrayView2<'_, f32> {
    data.view()
        .into_shape_with_order((rows, cols))
        .expect("flat buffer length checked against dims")
}

fn flatten(rows: ndarray::Array2<f32>) -> Array1<f32> {
    rows.iter().copied().collect()
}

/// Dense layer forward pass
pub fn linear(x: &Tensor, weight: &Tensor, bias: &Tensor, dims: LinearDims) -> Tensor {
    let LinearDims { batch, in_features, out_features } = dims;
    assert_eq!(x.len(), batch * in_features, "input length must be batch * in_features");
    assert_eq!(weight.len(), in_features * out_features, "weight length must be in * out");
    assert_eq!(bias.len(), out_features, "bias length must be out_features");

    let xs = view2(x.data(), batch, in_features);
    let w = view2(weight.data(), in_features, out_features);
    let mut y = xs.dot(&w);
    y += &bias.data().view();

    let requires_grad = x.requires_grad() || weight.requires_grad() || bias.requires_grad();
    let mut result = Tensor::new(flatten(y), requires_grad);

    if requires_grad {
        let backward_op = Rc::new(LinearBackward {
            x: x.clone(),
            weight: weight.clone(),
            bias: bias.clone(),
            dims,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct LinearBackward {
    x: Tensor,
    weight: Tensor,
    bias: Tensor,
    dims: LinearDims,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for LinearBackward {
    fn backward(&self) {
        let LinearDims { batch, in_features, out_features } = self.dims;

        if let Some(grad) = self.result_grad.borrow().as_ref() {
            let g = view2(grad, batch, out_features);

            if self.weight.requires_grad() {
                // ∂L/∂W = xᵀ · g
                let xs = view2(self.x.data(), batch, in_features);
                self.weight.accumulate_grad(flatten(xs.t().dot(&g)));
            }
            if self.bias.requires_grad() {
                // ∂L/∂b = Σ_batch g
                self.bias.accumulate_grad(g.sum_axis(Axis(0)));
            }
            if self.x.requires_grad() {
                // ∂L/∂x = g · Wᵀ
                let w = view2(self.weight.data(), in_features, out_features);
                self.x.accumulate_grad(flatten(g.dot(&w.t())));
            }

            if let Some(op) = self.x.backward_op() {
                op.backward();
            }
        }
    }
}
