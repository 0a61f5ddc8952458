//! Epoch-driven adversarial training loop with periodic checkpoints

use super::config::TrainConfig;
use super::model::{StepMetrics, TerrainGan};
use crate::data::BatchSource;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// History file written into the run directory
pub const HISTORY_FILE: &str = "history.jsonl";

/// Lifecycle of a [`GanTrainer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainState {
    /// Not started
    Idle,
    /// Drawing batches and updating the networks
    Running,
    /// Writing a checkpoint
    Checkpointing,
    /// Budget exhausted
    Finished,
}

/// One line of `history.jsonl`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub epoch: usize,
    /// Position of the batch within its epoch
    pub batch: usize,
    pub batches_per_epoch: usize,
    pub d_loss: f32,
    pub d_accuracy: f32,
    pub g_loss: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grad_norm: Option<f32>,
}

impl StepRecord {
    fn new(epoch: usize, batch: usize, batches_per_epoch: usize, metrics: StepMetrics) -> Self {
        Self {
            epoch,
            batch,
            batches_per_epoch,
            d_loss: metrics.d_loss,
            d_accuracy: metrics.d_accuracy,
            g_loss: metrics.g_loss,
            grad_norm: metrics.grad_norm,
        }
    }
}

/// Outcome of [`GanTrainer::train`]
#[derive(Debug, Clone, Default)]
pub struct TrainingSummary {
    /// Batches drawn from the source
    pub batches_drawn: usize,
    /// Steps actually trained
    pub steps: usize,
    /// Short batches skipped
    pub skipped: usize,
    /// Checkpoint directories in the order written
    pub checkpoints: Vec<PathBuf>,
    /// Metrics of the last trained step
    pub last: Option<StepRecord>,
}

/// Drives a [`TerrainGan`] over a [`BatchSource`].
///
/// Batch number `b` belongs to epoch `b / batches_per_epoch` at position
/// `b % batches_per_epoch`. The run draws exactly
/// `epochs * batches_per_epoch` batches. A checkpoint is written after the
/// first batch of every epoch that is a multiple of `save_interval`.
#[derive(Debug)]
pub struct GanTrainer {
    gan: TerrainGan,
    config: TrainConfig,
    run_dir: PathBuf,
    state: TrainState,
}

impl GanTrainer {
    /// Create a trainer; the run directory is
    /// `<results_dir>/<run_name or UTC timestamp>`
    pub fn new(gan: TerrainGan, config: TrainConfig) -> Result<Self> {
        config.validate()?;
        let run_name = config
            .run_name
            .clone()
            .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d-%H%M%S").to_string());
        let run_dir = config.results_dir.join(run_name);
        Ok(Self { gan, config, run_dir, state: TrainState::Idle })
    }

    pub fn state(&self) -> TrainState {
        self.state
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn gan(&self) -> &TerrainGan {
        &self.gan
    }

    pub fn gan_mut(&mut self) -> &mut TerrainGan {
        &mut self.gan
    }

    pub fn into_gan(self) -> TerrainGan {
        self.gan
    }

    /// Checkpoint directory for an epoch
    pub fn checkpoint_dir(&self, epoch: usize) -> PathBuf {
        self.run_dir.join(format!("generated-{epoch}"))
    }

    /// Run the whole training budget.
    ///
    /// Any error aborts the run; the trainer is left in the state it failed in.
    pub fn train<S: BatchSource>(&mut self, source: &mut S) -> Result<TrainingSummary> {
        if source.shape() != self.gan.config().shape {
            return Err(Error::ConfigError(format!(
                "data shape {} does not match model shape {}",
                source.shape(),
                self.gan.config().shape
            )));
        }

        fs::create_dir_all(&self.run_dir).map_err(|e| Error::file(&self.run_dir, e))?;
        let history_path = self.run_dir.join(HISTORY_FILE);
        let file = File::create(&history_path).map_err(|e| Error::file(&history_path, e))?;
        let mut history = BufWriter::new(file);

        let batch_size = source.batch_size();
        let batches_per_epoch = source.batches_per_epoch();
        let total = self.config.epochs * batches_per_epoch;
        let mut summary = TrainingSummary::default();

        log::info!(
            "training for {} epochs of {} batches into {}",
            self.config.epochs,
            batches_per_epoch,
            self.run_dir.display()
        );
        self.state = TrainState::Running;

        for batch_number in 0..total {
            let position = batch_number % batches_per_epoch;
            let epoch = batch_number / batches_per_epoch;

            let batch = source.next_batch()?;
            summary.batches_drawn += 1;

            if batch.len() < batch_size {
                log::debug!("skipping short batch of {} at epoch {epoch}", batch.len());
                summary.skipped += 1;
            } else {
                let metrics = self.gan.train_step(&batch, self.config.step_options())?;
                let record = StepRecord::new(epoch, position, batches_per_epoch, metrics);
                log_step(&record);

                serde_json::to_writer(&mut history, &record)
                    .map_err(|e| Error::Serialization(format!("history write failed: {e}")))?;
                writeln!(history).map_err(|e| Error::file(&history_path, e))?;

                summary.steps += 1;
                summary.last = Some(record);
            }

            if position == 0 && epoch % self.config.save_interval == 0 {
                self.state = TrainState::Checkpointing;
                history.flush().map_err(|e| Error::file(&history_path, e))?;
                summary.checkpoints.push(self.checkpoint(epoch)?);
                self.state = TrainState::Running;
            }
        }

        history.flush().map_err(|e| Error::file(&history_path, e))?;
        self.state = TrainState::Finished;
        log::info!(
            "training finished: {} steps, {} skipped, {} checkpoints",
            summary.steps,
            summary.skipped,
            summary.checkpoints.len()
        );
        Ok(summary)
    }

    /// Write generated samples and both networks' weights for `epoch`
    pub fn checkpoint(&mut self, epoch: usize) -> Result<PathBuf> {
        let dir = self.checkpoint_dir(epoch);
        self.gan.generate_samples(&dir, self.config.samples_per_checkpoint)?;
        self.gan.save_weights(&dir)?;
        log::info!("saved checkpoint {}", dir.display());
        Ok(dir)
    }
}

fn log_step(record: &StepRecord) {
    match record.grad_norm {
        Some(norm) => log::info!(
            "Epoch: {} Batch: {}/{} [D loss: {:.6}, acc.: {:.2}%] [G loss: {:.6}] [Gradient norm: {:.6}]",
            record.epoch,
            record.batch,
            record.batches_per_epoch,
            record.d_loss,
            100.0 * record.d_accuracy,
            record.g_loss,
            norm
        ),
        None => log::info!(
            "Epoch: {} Batch: {}/{} [D loss: {:.6}, acc.: {:.2}%] [G loss: {:.6}]",
            record.epoch,
            record.batch,
            record.batches_per_epoch,
            record.d_loss,
            100.0 * record.d_accuracy,
            record.g_loss
        ),
    }
}
