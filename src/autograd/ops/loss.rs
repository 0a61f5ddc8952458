//! Binary cross-entropy on logits
//!
//! ```text
//! L_i = max(x_i, 0) - x_i * t_i + log(1 + exp(-|x_i|))
//! L   = mean(L_i)
//! ∂L/∂x_i = (σ(x_i) - t_i) / N
//! ```

use super::activations::sigmoid_scalar;
use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::cell::RefCell;
use std::rc::Rc;

fn stable_bce(logit: f32, target: f32) -> f32 {
    logit.max(0.0) - logit * target + (1.0 + (-logit.abs()).exp()).ln()
}

/// Mean sigmoid binary cross-entropy between logits and soft targets
///
/// Targets are constants; only the logits receive gradient.
pub fn bce_with_logits(logits: &Tensor, targets: &[f32]) -> Tensor {
    assert_eq!(logits.len(), targets.len(), "logits and targets must have same length");
    let n = logits.len().max(1) as f32;

    let loss: f32 = logits
        .data()
        .iter()
        .zip(targets)
        .map(|(&x, &t)| stable_bce(x, t))
        .sum::<f32>()
        / n;

    let requires_grad = logits.requires_grad();
    let mut result = Tensor::from_vec(vec![loss], requires_grad);

    if requires_grad {
        let local: Array1<f32> = logits
            .data()
            .iter()
            .zip(targets)
            .map(|(&x, &t)| (sigmoid_scalar(x) - t) / n)
            .collect();
        let backward_op = Rc::new(BceBackward {
            logits: logits.clone(),
            local,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct BceBackward {
    logits: Tensor,
    local: Array1<f32>,
    result_grad: Rc<RefCell<Option<Array1<f32>>>>,
}

impl BackwardOp for BceBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.logits.requires_grad() {
                self.logits.accumulate_grad(&self.local * grad[0]);
            }

            if let Some(op) = self.logits.backward_op() {
                op.backward();
            }
        }
    }
}
