//! Discriminator targets, optionally smoothed

use rand::Rng;

/// Upper bound of the uniform perturbation applied when smoothing
pub const SMOOTHING_WIDTH: f32 = 0.3;

/// Per-sample targets for one step
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    pub real: Vec<f32>,
    pub fake: Vec<f32>,
}

impl Labels {
    /// Hard targets: 1 for real, 0 for fake
    pub fn hard(batch: usize) -> Self {
        Self { real: vec![1.0; batch], fake: vec![0.0; batch] }
    }

    /// Targets for one step. With smoothing, real targets are drawn from
    /// `(0.7, 1.0]` and fake targets from `[0.0, 0.3)`.
    pub fn new<R: Rng>(batch: usize, smoothing: bool, rng: &mut R) -> Self {
        if !smoothing {
            return Self::hard(batch);
        }
        let real = (0..batch).map(|_| 1.0 - rng.random_range(0.0..SMOOTHING_WIDTH)).collect();
        let fake = (0..batch).map(|_| rng.random_range(0.0..SMOOTHING_WIDTH)).collect();
        Self { real, fake }
    }
}
