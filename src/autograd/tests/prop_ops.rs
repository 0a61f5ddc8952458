//! Property-based gradient checks for the ops used by the GAN networks

use super::grad_check::numeric_gradient;
use crate::autograd::{backward, bce_with_logits, leaky_relu, Tensor};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_leaky_relu_gradient_check(
        x in prop::collection::vec(-5.0f32..5.0, 2..20),
        slope in 0.0f32..0.5,
    ) {
        // Keep away from the kink where finite differences are meaningless
        prop_assume!(x.iter().all(|v| v.abs() > 1e-2));

        let a = Tensor::from_vec(x.clone(), true);
        let mut out = leaky_relu(&a, slope);
        backward(&mut out, None);
        let analytical = a.grad().expect("gradient should be available");

        let numerical = numeric_gradient(
            |v| leaky_relu(&Tensor::from_vec(v.to_vec(), false), slope).data().sum(),
            &x,
            1e-3,
        );

        for i in 0..x.len() {
            let diff = (analytical[i] - numerical[i]).abs();
            prop_assert!(diff < 0.05, "mismatch at {}: {} vs {}", i, analytical[i], numerical[i]);
        }
    }

    #[test]
    fn prop_bce_gradient_check(
        pairs in prop::collection::vec((-6.0f32..6.0, 0.0f32..1.0), 1..16)
    ) {
        let (x, t): (Vec<f32>, Vec<f32>) = pairs.into_iter().unzip();

        let a = Tensor::from_vec(x.clone(), true);
        let mut loss = bce_with_logits(&a, &t);
        prop_assert!(loss.data()[0] >= 0.0);
        backward(&mut loss, None);
        let analytical = a.grad().expect("gradient should be available");

        let numerical = numeric_gradient(
            |v| bce_with_logits(&Tensor::from_vec(v.to_vec(), false), &t).data()[0],
            &x,
            1e-2,
        );

        for i in 0..x.len() {
            let diff = (analytical[i] - numerical[i]).abs();
            prop_assert!(diff < 1e-2, "mismatch at {}: {} vs {}", i, analytical[i], numerical[i]);
        }
    }
}
