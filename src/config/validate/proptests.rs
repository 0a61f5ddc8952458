//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_spec() -> impl Strategy<Value = TrainSpec> {
    (
        1usize..256,   // batch_size
        1e-6f32..1.0,  // lr
        1usize..5000,  // epochs
        1usize..100,   // save_interval
        0.0f32..0.95,  // dropout
    )
        .prop_map(|(batch_size, lr, epochs, save_interval, dropout)| {
            let mut spec = TrainSpec::default();
            spec.data.batch_size = batch_size;
            spec.optimizer.lr = lr;
            spec.training.epochs = epochs;
            spec.training.save_interval = save_interval;
            spec.model.discriminator.dropout = dropout;
            spec
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_spec_passes(spec in arb_valid_spec()) {
        prop_assert!(validate_config(&spec).is_ok());
    }

    #[test]
    fn prop_zero_batch_size_fails(spec in arb_valid_spec()) {
        let mut spec = spec;
        spec.data.batch_size = 0;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn prop_non_positive_lr_fails(spec in arb_valid_spec(), lr in -1.0f32..=0.0) {
        let mut spec = spec;
        spec.optimizer.lr = lr;
        prop_assert!(matches!(
            validate_config(&spec),
            Err(ValidationError::InvalidLearningRate(_))
        ));
    }
}
