//! Tests for CLI argument parsing and overrides

use super::*;
use crate::config::TrainSpec;
use crate::data::DataLayout;
use crate::voxel::VoxelShape;
use std::path::PathBuf;

fn train_args(extra: &[&str]) -> TrainArgs {
    let mut argv = vec!["terragan", "train"];
    argv.extend_from_slice(extra);
    match parse_args(argv).expect("parsing should succeed").command {
        Command::Train(args) => args,
        _ => panic!("Expected Train command"),
    }
}

#[test]
fn test_parse_train_command() {
    let args = train_args(&[]);
    assert_eq!(args.config, None);
    assert_eq!(args.input_shape, None);
    assert!(!args.dry_run);
    assert!(!args.no_shuffle);
}

#[test]
fn test_parse_train_with_overrides() {
    let args = train_args(&[
        "--input-shape",
        "64,64,32",
        "--batch-size",
        "8",
        "--directory",
        "data/voxels",
        "--results-dir",
        "out",
        "--epochs",
        "10",
        "--save-interval",
        "2",
        "--gradient-norm",
        "--grad-clip",
        "1.5",
        "--label-smoothing",
        "--seed",
        "7",
    ]);

    assert_eq!(args.input_shape, Some(VoxelShape::new(64, 64, 32)));
    assert_eq!(args.batch_size, Some(8));
    assert_eq!(args.directory, Some(PathBuf::from("data/voxels")));
    assert_eq!(args.results_dir, Some(PathBuf::from("out")));
    assert_eq!(args.epochs, Some(10));
    assert_eq!(args.save_interval, Some(2));
    assert!(args.gradient_norm);
    assert_eq!(args.grad_clip, Some(1.5));
    assert!(args.label_smoothing);
    assert_eq!(args.seed, Some(7));
}

#[test]
fn test_parse_train_with_config_and_resume() {
    let args = train_args(&["--config", "terragan.yaml", "--load-dir", "results/run/generated-10"]);
    assert_eq!(args.config, Some(PathBuf::from("terragan.yaml")));
    assert_eq!(args.load_dir, Some(PathBuf::from("results/run/generated-10")));
}

#[test]
fn test_malformed_shape_is_rejected() {
    for bad in ["16,16", "16,16,16,16", "a,b,c", "16,0,16", ""] {
        let result = parse_args(["terragan", "train", "--input-shape", bad]);
        assert!(result.is_err(), "shape {bad:?} should be rejected");
    }
}

#[test]
fn test_parse_generate_command() {
    let cli = parse_args(["terragan", "generate", "ckpt", "30", "samples", "--input-shape", "8,8,4"])
        .expect("parsing should succeed");
    match cli.command {
        Command::Generate(args) => {
            assert_eq!(args.model_dir, PathBuf::from("ckpt"));
            assert_eq!(args.count, 30);
            assert_eq!(args.output_dir, PathBuf::from("samples"));
            assert_eq!(args.input_shape, VoxelShape::new(8, 8, 4));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_requires_all_positionals() {
    assert!(parse_args(["terragan", "generate", "ckpt", "30"]).is_err());
    assert!(parse_args(["terragan", "generate", "ckpt", "many", "out"]).is_err());
}

#[test]
fn test_parse_voxelize_default_shape() {
    let cli = parse_args(["terragan", "voxelize", "raw", "voxels"]).expect("parsing should succeed");
    match cli.command {
        Command::Voxelize(args) => {
            assert_eq!(args.raw_dir, PathBuf::from("raw"));
            assert_eq!(args.out_dir, PathBuf::from("voxels"));
            assert_eq!(args.input_shape, VoxelShape::new(16, 16, 16));
        }
        _ => panic!("Expected Voxelize command"),
    }
}

#[test]
fn test_parse_metadata_clean_synth() {
    let cli = parse_args(["terragan", "metadata", "voxels", "--input-shape", "4x4x2"])
        .expect("parsing should succeed");
    assert!(matches!(
        cli.command,
        Command::Metadata(MetadataArgs { input_shape, .. }) if input_shape == VoxelShape::new(4, 4, 2)
    ));

    let cli = parse_args(["terragan", "clean", "in.csv", "out.txt"]).expect("parsing should succeed");
    assert!(matches!(cli.command, Command::Clean(_)));

    let cli = parse_args(["terragan", "synth", "dummy", "--count", "5"]).expect("parsing should succeed");
    match cli.command {
        Command::Synth(args) => {
            assert_eq!(args.count, 5);
            assert_eq!(args.output_dir, PathBuf::from("dummy"));
        }
        _ => panic!("Expected Synth command"),
    }
}

#[test]
fn test_global_flags() {
    let cli = parse_args(["terragan", "synth", "dummy", "-v"]).expect("parsing should succeed");
    assert!(cli.verbose);
    assert!(!cli.quiet);

    let cli = parse_args(["terragan", "-q", "synth", "dummy"]).expect("parsing should succeed");
    assert!(cli.quiet);
}

#[test]
fn test_apply_overrides() {
    let mut spec = TrainSpec::default();
    let args = train_args(&[
        "--input-shape",
        "8,8,8",
        "--batch-size",
        "4",
        "--no-shuffle",
        "--channels-first",
        "--sequential",
        "--lr",
        "0.001",
        "--load-dir",
        "ckpt",
        "--run-name",
        "first",
        "--grad-clip",
        "0.5",
    ]);
    apply_overrides(&mut spec, &args);

    assert_eq!(spec.data.input_shape, VoxelShape::new(8, 8, 8));
    assert_eq!(spec.data.batch_size, 4);
    assert!(!spec.data.shuffle);
    assert!(spec.data.sequential);
    assert_eq!(spec.data.layout, DataLayout::ChannelsFirst);
    assert!((spec.optimizer.lr - 0.001).abs() < 1e-9);
    assert_eq!(spec.training.load_dir, Some(PathBuf::from("ckpt")));
    assert_eq!(spec.training.run_name.as_deref(), Some("first"));
    assert_eq!(spec.training.grad_clip, Some(0.5));
}

#[test]
fn test_absent_flags_keep_config_values() {
    let mut spec = TrainSpec::default();
    spec.training.label_smoothing = true;
    spec.data.shuffle = false;
    spec.training.epochs = 12;
    spec.training.grad_clip = Some(3.0);

    apply_overrides(&mut spec, &train_args(&[]));
    assert_eq!(spec.training.grad_clip, Some(3.0));
    assert!(spec.training.label_smoothing);
    assert!(!spec.data.shuffle);
    assert_eq!(spec.training.epochs, 12);
}
