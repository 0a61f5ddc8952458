//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::TrainSpec;

/// Validate a training specification
///
/// Checks numeric values only; paths are checked when they are opened so
/// the error names the file that is actually missing.
pub fn validate_config(spec: &TrainSpec) -> Result<(), ValidationError> {
    if spec.data.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(spec.data.batch_size));
    }

    if spec.optimizer.lr <= 0.0 || spec.optimizer.lr > 1.0 {
        return Err(ValidationError::InvalidLearningRate(spec.optimizer.lr));
    }
    for (name, value) in [("beta1", spec.optimizer.beta1), ("beta2", spec.optimizer.beta2)] {
        if !(0.0..1.0).contains(&value) {
            return Err(ValidationError::InvalidBeta { name, value });
        }
    }

    if spec.training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(spec.training.epochs));
    }
    if spec.training.save_interval == 0 {
        return Err(ValidationError::InvalidSaveInterval(spec.training.save_interval));
    }
    if let Some(max_norm) = spec.training.grad_clip {
        if !(max_norm.is_finite() && max_norm > 0.0) {
            return Err(ValidationError::InvalidGradClip(max_norm));
        }
    }

    let generator = &spec.model.generator;
    let discriminator = &spec.model.discriminator;
    if generator.latent_dim == 0 {
        return Err(ValidationError::InvalidLatentDim(generator.latent_dim));
    }
    for dims in [&generator.hidden_dims, &discriminator.hidden_dims] {
        if dims.contains(&0) {
            return Err(ValidationError::InvalidHiddenDims(dims.clone()));
        }
    }
    if !(0.0..1.0).contains(&discriminator.dropout) {
        return Err(ValidationError::InvalidDropout(discriminator.dropout));
    }
    if discriminator.leaky_slope < 0.0 {
        return Err(ValidationError::InvalidLeakySlope(discriminator.leaky_slope));
    }

    Ok(())
}
