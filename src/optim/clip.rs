//! Gradient norm and clipping

use crate::Tensor;

/// Global L2 norm of the gradients held by `params`
///
/// Parameters without a gradient contribute nothing.
pub fn grad_norm(params: &[&Tensor]) -> f32 {
    params
        .iter()
        .filter_map(|p| p.grad())
        .map(|grad| grad.iter().map(|&g| g * g).sum::<f32>())
        .sum::<f32>()
        .sqrt()
}

/// Clip gradients by global norm on borrowed parameter references.
///
/// Algorithm:
/// 1. global_norm = sqrt(sum of all gradient squared norms)
/// 2. If global_norm > max_norm, every gradient is scaled by
///    `max_norm / global_norm`
///
/// Returns the global norm before clipping.
pub fn clip_grad_norm_refs(params: &mut [&mut Tensor], max_norm: f32) -> f32 {
    let global_norm = {
        let shared: Vec<&Tensor> = params.iter().map(|p| &**p).collect();
        grad_norm(&shared)
    };

    if global_norm > max_norm {
        let clip_coef = max_norm / global_norm;
        for param in params.iter_mut() {
            if let Some(grad) = param.grad() {
                param.set_grad(grad * clip_coef);
            }
        }
    }

    global_norm
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr1;

    #[test]
    fn test_grad_norm_combines_params() {
        let a = Tensor::from_vec(vec![0.0, 0.0], true);
        let b = Tensor::from_vec(vec![0.0], true);
        a.set_grad(arr1(&[3.0, 0.0]));
        b.set_grad(arr1(&[4.0]));

        assert_abs_diff_eq!(grad_norm(&[&a, &b]), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_grad_norm_ignores_missing_grads() {
        let a = Tensor::from_vec(vec![1.0], true);
        let b = Tensor::from_vec(vec![1.0], true);
        a.set_grad(arr1(&[2.0]));

        assert_abs_diff_eq!(grad_norm(&[&a, &b]), 2.0, epsilon = 1e-6);
        assert_eq!(grad_norm(&[]), 0.0);
    }

    #[test]
    fn test_clip_grad_norm_refs_scales_down() {
        let mut a = Tensor::from_vec(vec![0.0, 0.0], true);
        a.set_grad(arr1(&[3.0, 4.0]));

        let norm = clip_grad_norm_refs(&mut [&mut a], 1.0);

        assert_abs_diff_eq!(norm, 5.0, epsilon = 1e-6);
        let grad = a.grad().expect("gradient should be set");
        assert_abs_diff_eq!(grad[0], 0.6, epsilon = 1e-6);
        assert_abs_diff_eq!(grad[1], 0.8, epsilon = 1e-6);
    }

    #[test]
    fn test_clip_grad_norm_refs_below_threshold_untouched() {
        let mut a = Tensor::from_vec(vec![0.0, 0.0], true);
        a.set_grad(arr1(&[0.3, 0.4]));

        let norm = clip_grad_norm_refs(&mut [&mut a], 1.0);

        assert_abs_diff_eq!(norm, 0.5, epsilon = 1e-6);
        let grad = a.grad().expect("gradient should be set");
        assert_abs_diff_eq!(grad[0], 0.3, epsilon = 1e-6);
    }
}
