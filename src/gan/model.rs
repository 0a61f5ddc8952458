//! Terrain GAN: generator, discriminator and their optimizers

use super::config::{GanConfig, StepOptions};
use super::discriminator::Discriminator;
use super::generator::Generator;
use super::labels::Labels;
use super::latent::sample_noise;
use crate::autograd::{backward, bce_with_logits};
use crate::data::VoxelBatch;
use crate::io::{load_model, save_model, ModelFormat, SaveConfig};
use crate::optim::{clip_grad_norm_refs, grad_norm, Adam, Optimizer};
use crate::voxel::{metadata::write_metadata, write_sample, VoxelGrid, VoxelShape};
use crate::{Error, Result, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

/// Generator weights file inside a checkpoint directory
pub const GENERATOR_FILE: &str = "generator.json";
/// Discriminator weights file inside a checkpoint directory
pub const DISCRIMINATOR_FILE: &str = "discriminator.json";

/// Samples generated per forward pass when writing sample files
const GENERATION_CHUNK: usize = 25;

/// Metrics from one adversarial update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMetrics {
    /// Mean of the real and fake discriminator losses
    pub d_loss: f32,
    /// Mean of real-scored-real and fake-scored-fake rates
    pub d_accuracy: f32,
    /// Generator loss against the real-side targets
    pub g_loss: f32,
    /// Global generator gradient norm, when requested. Taken before
    /// clipping when clipping is on.
    pub grad_norm: Option<f32>,
}

/// Generator and discriminator trained adversarially on flattened grids
#[derive(Debug)]
pub struct TerrainGan {
    config: GanConfig,
    generator: Generator,
    discriminator: Discriminator,
    gen_optimizer: Adam,
    disc_optimizer: Adam,
    rng: StdRng,
}

impl TerrainGan {
    /// Create a GAN with randomly initialized networks
    pub fn new(config: GanConfig) -> Result<Self> {
        Self::build(config, StdRng::from_os_rng())
    }

    /// Create a GAN whose initialization, noise and dropout are reproducible
    pub fn with_seed(config: GanConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: GanConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let volume = config.shape.volume();
        let generator = Generator::new(config.generator.clone(), volume, &mut rng);
        let discriminator = Discriminator::new(config.discriminator.clone(), volume, &mut rng);
        let adam = Adam::new(config.learning_rate, config.beta1, config.beta2, 1e-7);

        log::debug!(
            "built GAN for {}: generator {} params, discriminator {} params",
            config.shape,
            generator.num_parameters(),
            discriminator.num_parameters()
        );

        Ok(Self {
            config,
            generator,
            discriminator,
            gen_optimizer: adam.clone(),
            disc_optimizer: adam,
            rng,
        })
    }

    /// Rebuild a GAN for sampling from a checkpoint directory.
    ///
    /// The generator architecture comes from the saved metadata and must
    /// produce `shape.volume()` cells. The discriminator is left untrained.
    pub fn from_checkpoint(dir: &Path, shape: VoxelShape) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound(dir.to_path_buf()));
        }
        let saved = load_model(dir.join(GENERATOR_FILE))?;
        let (generator, output_dim) = Generator::architecture_of(&saved)?;
        if output_dim != shape.volume() {
            return Err(Error::ShapeMismatch { expected: shape, actual: output_dim });
        }

        let config = GanConfig { shape, generator, ..GanConfig::default() };
        let mut gan = Self::new(config)?;
        gan.generator.load_model(&saved)?;
        log::info!("loaded generator from {}", dir.display());
        Ok(gan)
    }

    pub fn config(&self) -> &GanConfig {
        &self.config
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn discriminator(&self) -> &Discriminator {
        &self.discriminator
    }

    /// Total number of parameters
    #[must_use]
    pub fn num_parameters(&self) -> usize {
        self.generator.num_parameters() + self.discriminator.num_parameters()
    }

    /// Fresh latent noise for `batch` samples
    pub fn sample_noise(&mut self, batch: usize) -> Vec<f32> {
        sample_noise(&mut self.rng, batch, self.config.generator.latent_dim)
    }

    /// Generate `count` grids, rounding each cell to 0 or 1
    pub fn generate(&mut self, count: usize) -> Result<Vec<VoxelGrid>> {
        let volume = self.config.shape.volume();
        let noise = self.sample_noise(count);
        let cells = self.generator.predict(&noise, count);

        cells
            .chunks(volume)
            .map(|chunk| {
                let values = chunk.iter().map(|&p| u8::from(p.round() >= 1.0)).collect();
                VoxelGrid::from_flat(self.config.shape, values)
            })
            .collect()
    }

    /// One discriminator update on `samples` against `targets`.
    /// Returns the loss and the fraction classified on the correct side.
    ///
    /// A non-finite loss discards the gradients and leaves the weights as
    /// they were.
    fn discriminator_step(
        &mut self,
        samples: Vec<f32>,
        targets: &[f32],
        real: bool,
        grad_clip: Option<f32>,
    ) -> Result<(f32, f32)> {
        let batch = targets.len();
        let input = Tensor::from_vec(samples, false);
        let logits = self.discriminator.forward(&input, batch, Some(&mut self.rng));
        let mut loss = bce_with_logits(&logits, targets);
        backward(&mut loss, None);
        let loss = loss.data()[0];

        let mut params = self.discriminator.parameters_mut();
        if !loss.is_finite() {
            self.disc_optimizer.zero_grad_refs(&mut params);
            let side = if real { "real" } else { "generated" };
            return Err(Error::Diverged(format!("D loss on {side} batch is {loss}")));
        }

        let correct = logits
            .data()
            .iter()
            .filter(|&&l| if real { l > 0.0 } else { l < 0.0 })
            .count();

        if let Some(max_norm) = grad_clip {
            clip_grad_norm_refs(&mut params, max_norm);
        }
        self.disc_optimizer.step_refs(&mut params);
        self.disc_optimizer.zero_grad_refs(&mut params);

        Ok((loss, correct as f32 / batch as f32))
    }

    /// One adversarial step on a full batch of real samples.
    ///
    /// The discriminator is updated on the real batch, then on a generated
    /// batch; the generator is then updated through the frozen
    /// discriminator using the same noise and the real-side targets.
    ///
    /// Every loss is checked before its optimizer step, so a
    /// [`Error::Diverged`] step never writes non-finite updates.
    pub fn train_step(&mut self, real: &VoxelBatch, options: StepOptions) -> Result<StepMetrics> {
        let batch = real.len();
        let volume = self.config.shape.volume();
        if real.shape() != self.config.shape {
            return Err(Error::ShapeMismatch { expected: self.config.shape, actual: real.shape().volume() });
        }
        if batch == 0 {
            return Err(Error::ConfigError("cannot train on an empty batch".to_string()));
        }

        let labels = Labels::new(batch, options.label_smoothing, &mut self.rng);
        let noise = self.sample_noise(batch);
        let generated = self.generator.predict(&noise, batch);
        debug_assert_eq!(generated.len(), batch * volume);

        let (real_loss, real_acc) =
            self.discriminator_step(real.to_flat(), &labels.real, true, options.grad_clip)?;
        let (fake_loss, fake_acc) =
            self.discriminator_step(generated, &labels.fake, false, options.grad_clip)?;

        // Generator update through the discriminator; discriminator grads are discarded
        let z = Tensor::from_vec(noise, false);
        let fake = self.generator.forward(&z, batch);
        let logits = self.discriminator.forward(&fake, batch, Some(&mut self.rng));
        let mut g_loss = bce_with_logits(&logits, &labels.real);
        backward(&mut g_loss, None);
        self.discriminator.zero_grad();
        let g_loss = g_loss.data()[0];

        if !g_loss.is_finite() {
            self.gen_optimizer.zero_grad_refs(&mut self.generator.parameters_mut());
            return Err(Error::Diverged(format!("G loss is {g_loss}")));
        }

        let norm = match options.grad_clip {
            Some(max_norm) => {
                let before = clip_grad_norm_refs(&mut self.generator.parameters_mut(), max_norm);
                options.gradient_norm.then_some(before)
            }
            None => options.gradient_norm.then(|| grad_norm(&self.generator.parameters())),
        };
        let mut params = self.generator.parameters_mut();
        self.gen_optimizer.step_refs(&mut params);
        self.gen_optimizer.zero_grad_refs(&mut params);

        Ok(StepMetrics {
            d_loss: 0.5 * (real_loss + fake_loss),
            d_accuracy: 0.5 * (real_acc + fake_acc),
            g_loss,
            grad_norm: norm,
        })
    }

    /// Write `generator.json` and `discriminator.json` into `dir`
    pub fn save_weights(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| Error::file(dir, e))?;
        let config = SaveConfig::new(ModelFormat::Json);
        save_model(&self.generator.to_model(), dir.join(GENERATOR_FILE), &config)?;
        save_model(&self.discriminator.to_model(), dir.join(DISCRIMINATOR_FILE), &config)?;
        Ok(())
    }

    /// Restore both networks from a directory written by
    /// [`save_weights`](Self::save_weights)
    pub fn load_weights(&mut self, dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound(dir.to_path_buf()));
        }
        self.load_generator(dir)?;
        let discriminator = load_model(dir.join(DISCRIMINATOR_FILE))?;
        self.discriminator.load_model(&discriminator)?;
        log::info!("loaded weights from {}", dir.display());
        Ok(())
    }

    /// Restore only the generator (enough for sampling)
    pub fn load_generator(&mut self, dir: &Path) -> Result<()> {
        let generator = load_model(dir.join(GENERATOR_FILE))?;
        self.generator.load_model(&generator)
    }

    /// Write exactly `count` generated samples as `gen-<i>` plus sidecars
    pub fn generate_samples(&mut self, dir: &Path, count: usize) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|e| Error::file(dir, e))?;

        let mut written = Vec::with_capacity(count);
        while written.len() < count {
            let chunk = GENERATION_CHUNK.min(count - written.len());
            for grid in self.generate(chunk)? {
                let path = dir.join(format!("gen-{}", written.len()));
                write_sample(&path, &grid)?;
                write_metadata(&path, self.config.shape)?;
                written.push(path);
            }
        }
        Ok(written)
    }
}
