//! Train command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, parse_config, validate_config, TrainArgs, TrainSpec};
use crate::data::{BatchLoader, SequentialBatches};
use crate::gan::{GanTrainer, TerrainGan, TrainingSummary};
use std::path::PathBuf;

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    let mut spec = match &args.config {
        Some(path) => {
            log(level, LogLevel::Normal, &format!("Terragan: Training from {}", path.display()));
            parse_config(path).map_err(|e| format!("Config error: {e}"))?
        }
        None => TrainSpec::default(),
    };

    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Config error: {e}"))?;

    let loader = BatchLoader::new(&spec.data.directory, spec.loader_config())
        .map_err(|e| format!("Data error: {e}"))?;

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Data: {} samples of {} in {} ({} batches per epoch)",
            loader.len(),
            spec.data.input_shape,
            spec.data.directory.display(),
            loader.batches_per_epoch()
        ),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Optimizer: adam (lr={}, beta1={}, beta2={})",
            spec.optimizer.lr, spec.optimizer.beta1, spec.optimizer.beta2
        ),
    );
    log(level, LogLevel::Verbose, &format!("  Epochs: {}", spec.training.epochs));
    log(level, LogLevel::Verbose, &format!("  Batch size: {}", spec.data.batch_size));
    if let Some(max_norm) = spec.training.grad_clip {
        log(level, LogLevel::Verbose, &format!("  Gradient clip: {max_norm}"));
    }

    if args.dry_run {
        log(level, LogLevel::Normal, "Dry run - config and data validated successfully");
        return Ok(());
    }

    let (summary, run_dir) = train(&spec, loader).map_err(|e| {
        if e.is_user_error() {
            format!("Data error: {e}")
        } else {
            format!("Training error: {e}")
        }
    })?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Training complete! {} steps ({} short batches skipped), {} checkpoints in {}",
            summary.steps,
            summary.skipped,
            summary.checkpoints.len(),
            run_dir.display()
        ),
    );
    if let Some(last) = &summary.last {
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  Final: D loss {:.4}, acc {:.2}%, G loss {:.4}",
                last.d_loss,
                100.0 * last.d_accuracy,
                last.g_loss
            ),
        );
    }
    Ok(())
}

fn train(spec: &TrainSpec, loader: BatchLoader) -> crate::Result<(TrainingSummary, PathBuf)> {
    let mut gan = match spec.data.seed {
        Some(seed) => TerrainGan::with_seed(spec.gan_config(), seed)?,
        None => TerrainGan::new(spec.gan_config())?,
    };
    if let Some(load_dir) = &spec.training.load_dir {
        gan.load_weights(load_dir)?;
    }

    let mut trainer = GanTrainer::new(gan, spec.train_config())?;
    let summary = if spec.data.sequential {
        trainer.train(&mut SequentialBatches::new(loader))?
    } else {
        trainer.train(&mut loader.into_cursor())?
    };
    Ok((summary, trainer.run_dir().to_path_buf()))
}
