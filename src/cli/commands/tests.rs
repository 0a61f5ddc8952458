//! CLI command tests
//!
//! Each command runs end to end against temporary directories.

use super::*;
use crate::cli::LogLevel;
use crate::config::*;
use crate::voxel::{metadata::read_metadata, read_sample, VoxelShape};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SHAPE: VoxelShape = VoxelShape::new(4, 4, 2);

/// A small-network config file pointing at `data`, writing under `results`
fn create_test_config(dir: &Path, data: &Path, results: &Path) -> PathBuf {
    let config_path = dir.join("terragan.yaml");
    let config = format!(
        r#"
data:
  directory: {}
  input_shape: "4,4,2"
  batch_size: 4
  seed: 5

model:
  generator:
    latent_dim: 8
    hidden_dims: [16]
  discriminator:
    hidden_dims: [16]

optimizer:
  lr: 0.01

training:
  epochs: 2
  save_interval: 1
  samples_per_checkpoint: 3
  results_dir: {}
  run_name: test-run
"#,
        data.display(),
        results.display()
    );
    fs::write(&config_path, config).expect("file write should succeed");
    config_path
}

fn synth_into(dir: &Path, count: usize) {
    let args = SynthArgs { output_dir: dir.to_path_buf(), count, input_shape: SHAPE };
    synth::run_synth(args, LogLevel::Quiet).expect("synth should succeed");
}

fn train_args(config: Option<PathBuf>) -> TrainArgs {
    let Command::Train(mut args) = parse_args(["terragan", "train"])
        .expect("parsing should succeed")
        .command
    else {
        panic!("Expected Train command");
    };
    args.config = config;
    args
}

#[test]
fn test_synth_writes_samples_and_sidecars() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    synth_into(dir.path(), 3);

    for i in 0..3 {
        let sample = dir.path().join(format!("dummy-{i}"));
        read_sample(&sample, SHAPE).expect("sample should load");
        assert_eq!(read_metadata(&sample).expect("metadata should load"), SHAPE);
    }
    assert!(!dir.path().join("dummy-3").exists());
}

#[test]
fn test_train_then_generate() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let data = dir.path().join("data");
    let results = dir.path().join("results");
    synth_into(&data, 10);
    let config = create_test_config(dir.path(), &data, &results);

    train::run_train(train_args(Some(config)), LogLevel::Quiet).expect("train should succeed");

    let run_dir = results.join("test-run");
    for epoch in 0..2 {
        let checkpoint = run_dir.join(format!("generated-{epoch}"));
        assert!(checkpoint.join("generator.json").exists());
        assert!(checkpoint.join("discriminator.json").exists());
        assert!(checkpoint.join("gen-2").exists());
        assert!(!checkpoint.join("gen-3").exists());
    }
    assert!(run_dir.join("history.jsonl").exists());

    let out = dir.path().join("samples");
    let args = GenerateArgs {
        model_dir: run_dir.join("generated-1"),
        count: 7,
        output_dir: out.clone(),
        input_shape: SHAPE,
    };
    generate::run_generate(args, LogLevel::Quiet).expect("generate should succeed");
    let grid = read_sample(&out.join("gen-6"), SHAPE).expect("sample should load");
    assert!(grid.iter().all(|&v| v == 0.0 || v == 1.0));
    assert!(!out.join("gen-7").exists());
}

#[test]
fn test_train_sequential_with_overrides() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let data = dir.path().join("data");
    let results = dir.path().join("results");
    synth_into(&data, 6);
    let config = create_test_config(dir.path(), &data, &results);

    let mut args = train_args(Some(config));
    args.sequential = true;
    args.epochs = Some(1);
    args.run_name = Some("sequential".to_string());
    args.channels_first = true;
    train::run_train(args, LogLevel::Quiet).expect("train should succeed");

    let history = fs::read_to_string(results.join("sequential").join("history.jsonl"))
        .expect("history should be written");
    // 6 samples in batches of 4: the short batch of 2 is skipped
    assert_eq!(history.lines().count(), 1);
}

#[test]
fn test_train_dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let data = dir.path().join("data");
    let results = dir.path().join("results");
    synth_into(&data, 4);
    let config = create_test_config(dir.path(), &data, &results);

    let mut args = train_args(Some(config));
    args.dry_run = true;
    train::run_train(args, LogLevel::Quiet).expect("dry run should succeed");
    assert!(!results.exists());
}

#[test]
fn test_flags_override_config_before_validation() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let data = dir.path().join("data");
    let results = dir.path().join("results");
    synth_into(&data, 4);
    let config = create_test_config(dir.path(), &data, &results);
    let yaml = fs::read_to_string(&config).expect("config should be readable");
    fs::write(&config, yaml.replace("epochs: 2", "epochs: 0")).expect("file write should succeed");

    let mut args = train_args(Some(config.clone()));
    args.dry_run = true;
    let err = train::run_train(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("Invalid epochs"), "{err}");

    let mut args = train_args(Some(config));
    args.dry_run = true;
    args.epochs = Some(5);
    train::run_train(args, LogLevel::Quiet).expect("overridden epochs should validate");
}

#[test]
fn test_train_with_grad_clip() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let data = dir.path().join("data");
    let results = dir.path().join("results");
    synth_into(&data, 4);
    let config = create_test_config(dir.path(), &data, &results);

    let mut args = train_args(Some(config.clone()));
    args.grad_clip = Some(0.0);
    args.dry_run = true;
    let err = train::run_train(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("Invalid gradient clip norm"), "{err}");

    let mut args = train_args(Some(config));
    args.grad_clip = Some(0.5);
    args.gradient_norm = true;
    args.epochs = Some(1);
    args.run_name = Some("clipped".to_string());
    train::run_train(args, LogLevel::Quiet).expect("train should succeed");

    let history = fs::read_to_string(results.join("clipped").join("history.jsonl"))
        .expect("history should be written");
    assert_eq!(history.lines().count(), 1);
}

#[test]
fn test_train_missing_directory_fails() {
    let mut args = train_args(None);
    args.directory = Some(PathBuf::from("/nonexistent/terragan/data"));
    let err = train::run_train(args, LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("Data error"));
}

#[test]
fn test_train_invalid_override_fails() {
    let mut args = train_args(None);
    args.batch_size = Some(0);
    let err = train::run_train(args, LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("Config error"));
}

#[test]
fn test_train_missing_config_file_fails() {
    let args = train_args(Some(PathBuf::from("/nonexistent/terragan.yaml")));
    let err = train::run_train(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("Failed to read config file"));
}

#[test]
fn test_generate_missing_model_fails() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let args = GenerateArgs {
        model_dir: dir.path().join("missing"),
        count: 1,
        output_dir: dir.path().join("out"),
        input_shape: SHAPE,
    };
    assert!(generate::run_generate(args, LogLevel::Quiet).is_err());
}

#[test]
fn test_voxelize_and_metadata_commands() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let raw = dir.path().join("raw");
    let out = dir.path().join("voxels");
    fs::create_dir_all(&raw).expect("directory creation should succeed");
    fs::write(raw.join("tile-a"), "0,0,0\n3,3,1\n").expect("file write should succeed");
    fs::write(raw.join("tile-b"), "1,2,1\n").expect("file write should succeed");

    let args = VoxelizeArgs { raw_dir: raw, out_dir: out.clone(), input_shape: SHAPE };
    voxelize::run_voxelize(args, LogLevel::Quiet).expect("voxelize should succeed");

    let grid = read_sample(&out.join("tile-a"), SHAPE).expect("sample should load");
    assert_eq!(grid[[0, 0, 0]], 1.0);
    assert_eq!(grid[[3, 3, 1]], 1.0);
    assert_eq!(grid.sum(), 2.0);

    fs::remove_file(out.join("tile-b.meta")).expect("file removal should succeed");
    let other = VoxelShape::new(2, 4, 4);
    let args = MetadataArgs { dir: out.clone(), input_shape: other };
    metadata::run_metadata(args, LogLevel::Quiet).expect("metadata should succeed");
    assert_eq!(read_metadata(&out.join("tile-b")).expect("metadata should load"), other);
}

#[test]
fn test_voxelize_out_of_bounds_fails() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let raw = dir.path().join("raw");
    fs::create_dir_all(&raw).expect("directory creation should succeed");
    fs::write(raw.join("tile"), "4,0,0\n").expect("file write should succeed");

    let args = VoxelizeArgs { raw_dir: raw, out_dir: dir.path().join("out"), input_shape: SHAPE };
    let err = voxelize::run_voxelize(args, LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("Voxelize error"));
}

#[test]
fn test_clean_command() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let input = dir.path().join("points.csv");
    let output = dir.path().join("points.txt");
    fs::write(&input, "X,Y,Z\n5.0,5.0,2.0\n6.0,5.0,3.0\n").expect("file write should succeed");

    clean::run_clean(CleanArgs { input, output: output.clone() }, LogLevel::Quiet)
        .expect("clean should succeed");
    let text = fs::read_to_string(&output).expect("output should exist");
    assert_eq!(text, "0,0,0\n1,0,1\n");
}

#[test]
fn test_run_command_dispatches() {
    let dir = TempDir::new().expect("temp file creation should succeed");
    let out = dir.path().join("dummy");
    let cli = parse_args(["terragan", "-q", "synth", out.to_str().expect("utf-8 path"), "--count", "2"])
        .expect("parsing should succeed");
    run_command(cli).expect("command should succeed");
    assert!(out.join("dummy-1").exists());
}
