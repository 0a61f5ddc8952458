//! Generate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::GenerateArgs;
use crate::gan::TerrainGan;

pub fn run_generate(args: GenerateArgs, level: LogLevel) -> Result<(), String> {
    let mut gan = TerrainGan::from_checkpoint(&args.model_dir, args.input_shape)
        .map_err(|e| format!("Model error: {e}"))?;

    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Generator: latent {} -> {} ({} params)",
            gan.config().generator.latent_dim,
            args.input_shape,
            gan.generator().num_parameters()
        ),
    );

    let written = gan
        .generate_samples(&args.output_dir, args.count)
        .map_err(|e| format!("Generation error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Generated {} samples in {}", written.len(), args.output_dir.display()),
    );
    Ok(())
}
