//! Property-based tests for CLI argument parsing

use super::*;
use crate::voxel::VoxelShape;
use proptest::prelude::*;

// Strategy for valid directory names
fn dir_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,20}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_input_shape_parses(x in 1usize..512, y in 1usize..512, z in 1usize..512) {
        let shape = format!("{x},{y},{z}");
        let cli = parse_args(["terragan", "train", "--input-shape", &shape]).unwrap();
        match cli.command {
            Command::Train(args) => {
                prop_assert_eq!(args.input_shape, Some(VoxelShape::new(x, y, z)));
            }
            _ => prop_assert!(false, "Expected Train command"),
        }
    }

    #[test]
    fn prop_generate_positionals_parse(
        model in dir_strategy(),
        count in 0usize..10_000,
        out in dir_strategy(),
    ) {
        let count_arg = count.to_string();
        let cli = parse_args(["terragan", "generate", &model, &count_arg, &out]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                prop_assert_eq!(args.model_dir.to_str().unwrap(), &model);
                prop_assert_eq!(args.count, count);
                prop_assert_eq!(args.output_dir.to_str().unwrap(), &out);
            }
            _ => prop_assert!(false, "Expected Generate command"),
        }
    }

    #[test]
    fn prop_epochs_override_applies(epochs in 1usize..100_000) {
        let epochs_arg = epochs.to_string();
        let cli = parse_args(["terragan", "train", "--epochs", &epochs_arg]).unwrap();
        let Command::Train(args) = cli.command else {
            return Err(TestCaseError::fail("Expected Train command"));
        };
        let mut spec = crate::config::TrainSpec::default();
        apply_overrides(&mut spec, &args);
        prop_assert_eq!(spec.training.epochs, epochs);
    }
}
