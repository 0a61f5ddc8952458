//! Unit tests for autograd operations (forward and backward)

use super::grad_check::numeric_gradient;
use crate::autograd::{
    backward, bce_with_logits, dropout, leaky_relu, linear, mul, relu, sigmoid, LinearDims, Tensor,
};
use approx::assert_abs_diff_eq;
use rand::SeedableRng;

#[test]
fn test_tensor_creation() {
    let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
    assert_eq!(t.len(), 3);
    assert!(t.requires_grad());
    assert!(t.grad().is_none());
}

#[test]
fn test_tensor_grad_accumulation() {
    let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);

    t.accumulate_grad(ndarray::arr1(&[1.0, 1.0, 1.0]));
    t.accumulate_grad(ndarray::arr1(&[1.0, 1.0, 1.0]));
    let grad = t.grad().expect("gradient should be available");
    assert_eq!(grad[0], 2.0);

    t.zero_grad();
    assert!(t.grad().is_none());
}

#[test]
fn test_clone_shares_gradient_cell() {
    let t = Tensor::from_vec(vec![1.0, 2.0], true);
    let c = t.clone();
    c.accumulate_grad(ndarray::arr1(&[0.5, 0.5]));
    assert_eq!(t.grad().expect("shared grad")[1], 0.5);

    let d = t.detach();
    assert!(!d.requires_grad());
    assert!(d.grad().is_none());
}

#[test]
fn test_mul_backward() {
    let a = Tensor::from_vec(vec![2.0, 3.0], true);
    let b = Tensor::from_vec(vec![5.0, 7.0], true);
    let mut c = mul(&mul(&a, &b), &b);

    backward(&mut c, Some(ndarray::arr1(&[1.0, 1.0])));

    // c = a * b²  →  ∂c/∂a = b², ∂c/∂b = 2ab
    let grad_a = a.grad().expect("gradient should be available");
    let grad_b = b.grad().expect("gradient should be available");
    assert_abs_diff_eq!(grad_a[0], 25.0);
    assert_abs_diff_eq!(grad_b[1], 42.0);
}

#[test]
fn test_mul_with_constant_leaves_constant_untouched() {
    let a = Tensor::from_vec(vec![1.0, -2.0, 4.0], true);
    let k = Tensor::from_vec(vec![0.5, 0.5, 0.0], false);
    let mut c = mul(&a, &k);
    assert_eq!(c.data().to_vec(), vec![0.5, -1.0, 0.0]);

    backward(&mut c, None);
    assert_eq!(a.grad().expect("gradient should be available").to_vec(), vec![0.5, 0.5, 0.0]);
    assert!(k.grad().is_none());
}

#[test]
fn test_relu_and_leaky_relu() {
    let a = Tensor::from_vec(vec![-2.0, 0.5], true);
    assert_eq!(relu(&a).data().to_vec(), vec![0.0, 0.5]);

    let mut l = leaky_relu(&a, 0.2);
    assert_abs_diff_eq!(l.data()[0], -0.4);
    backward(&mut l, None);
    let grad = a.grad().expect("gradient should be available");
    assert_abs_diff_eq!(grad[0], 0.2);
    assert_abs_diff_eq!(grad[1], 1.0);
}

#[test]
fn test_sigmoid_backward_matches_numeric_gradient() {
    let x = vec![-3.0, -0.5, 0.0, 0.7, 4.0];
    let a = Tensor::from_vec(x.clone(), true);
    let mut s = sigmoid(&a);
    backward(&mut s, None);
    let analytical = a.grad().expect("gradient should be available");

    let numerical = numeric_gradient(
        |v| sigmoid(&Tensor::from_vec(v.to_vec(), false)).data().sum(),
        &x,
        1e-3,
    );
    for i in 0..x.len() {
        assert_abs_diff_eq!(analytical[i], numerical[i], epsilon = 1e-2);
    }
}

#[test]
fn test_linear_forward() {
    // x: 2x3, W: 3x2, b: 2
    let x = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], false);
    let w = Tensor::from_vec(vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0], true);
    let b = Tensor::from_vec(vec![0.5, -0.5], true);
    let dims = LinearDims { batch: 2, in_features: 3, out_features: 2 };

    let y = linear(&x, &w, &b, dims);
    assert_eq!(y.data().to_vec(), vec![4.5, 4.5, 10.5, 10.5]);
}

#[test]
fn test_linear_backward_matches_numeric_gradient() {
    let dims = LinearDims { batch: 2, in_features: 3, out_features: 2 };
    let xv = vec![0.3, -1.2, 0.8, 1.5, 0.1, -0.4];
    let wv = vec![0.2, -0.3, 0.5, 0.1, -0.7, 0.9];
    let bv = vec![0.05, -0.02];

    let x = Tensor::from_vec(xv.clone(), true);
    let w = Tensor::from_vec(wv.clone(), true);
    let b = Tensor::from_vec(bv.clone(), true);
    let mut out = sigmoid(&linear(&x, &w, &b, dims));
    backward(&mut out, None);

    let forward_w = |v: &[f32]| {
        let y = linear(
            &Tensor::from_vec(xv.clone(), false),
            &Tensor::from_vec(v.to_vec(), false),
            &Tensor::from_vec(bv.clone(), false),
            dims,
        );
        sigmoid(&y).data().sum()
    };
    let forward_x = |v: &[f32]| {
        let y = linear(
            &Tensor::from_vec(v.to_vec(), false),
            &Tensor::from_vec(wv.clone(), false),
            &Tensor::from_vec(bv.clone(), false),
            dims,
        );
        sigmoid(&y).data().sum()
    };
    let forward_b = |v: &[f32]| {
        let y = linear(
            &Tensor::from_vec(xv.clone(), false),
            &Tensor::from_vec(wv.clone(), false),
            &Tensor::from_vec(v.to_vec(), false),
            dims,
        );
        sigmoid(&y).data().sum()
    };

    let checks = [
        (w.grad().expect("weight grad"), numeric_gradient(forward_w, &wv, 1e-3)),
        (x.grad().expect("input grad"), numeric_gradient(forward_x, &xv, 1e-3)),
        (b.grad().expect("bias grad"), numeric_gradient(forward_b, &bv, 1e-3)),
    ];
    for (analytical, numerical) in &checks {
        for (a, n) in analytical.iter().zip(numerical) {
            assert_abs_diff_eq!(*a, *n, epsilon = 1e-2);
        }
    }
}

#[test]
fn test_bce_with_logits_values_and_gradient() {
    let logits = Tensor::from_vec(vec![0.0, 0.0], true);
    let mut loss = bce_with_logits(&logits, &[1.0, 0.0]);
    // -ln(0.5) for both
    assert_abs_diff_eq!(loss.data()[0], std::f32::consts::LN_2, epsilon = 1e-6);

    backward(&mut loss, None);
    let grad = logits.grad().expect("gradient should be available");
    assert_abs_diff_eq!(grad[0], -0.25, epsilon = 1e-6);
    assert_abs_diff_eq!(grad[1], 0.25, epsilon = 1e-6);
}

#[test]
fn test_bce_with_logits_is_stable_for_large_logits() {
    let logits = Tensor::from_vec(vec![80.0, -80.0], false);
    let loss = bce_with_logits(&logits, &[1.0, 0.0]);
    assert!(loss.data()[0].is_finite());
    assert!(loss.data()[0] < 1e-6);
}

#[test]
fn test_dropout_zero_rate_is_identity() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0);
    let a = Tensor::from_vec(vec![1.0, 2.0, 3.0], true);
    let d = dropout(&a, 0.0, &mut rng);
    assert_eq!(d.data(), a.data());
}

#[test]
fn test_dropout_scales_survivors() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let a = Tensor::from_vec(vec![1.0; 1000], true);
    let mut d = dropout(&a, 0.25, &mut rng);

    let zeros = d.data().iter().filter(|&&v| v == 0.0).count();
    assert!(zeros > 150 && zeros < 350, "dropped {zeros} of 1000");
    for &v in d.data().iter().filter(|&&v| v != 0.0) {
        assert_abs_diff_eq!(v, 1.0 / 0.75, epsilon = 1e-6);
    }

    backward(&mut d, None);
    let grad = a.grad().expect("gradient should be available");
    assert_eq!(grad.iter().filter(|&&g| g == 0.0).count(), zeros);
}
