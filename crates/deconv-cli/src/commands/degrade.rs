use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deconv_core::consts::DEFAULT_NOISE_STD_DEV;
use deconv_core::degrade::{degrade, DegradationConfig, NoiseConfig};
use deconv_core::io::image_io::{load_image, save_image};

use super::psf::PsfArgs;

#[derive(Args)]
pub struct DegradeArgs {
    /// Ground-truth input image
    pub file: PathBuf,

    #[command(flatten)]
    pub psf: PsfArgs,

    /// Gaussian noise standard deviation in 8-bit units
    #[arg(long, default_value_t = DEFAULT_NOISE_STD_DEV)]
    pub noise_std: f32,

    /// Gaussian noise mean in 8-bit units
    #[arg(long, default_value = "0.0")]
    pub noise_mean: f32,

    /// RNG seed for reproducible noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output path for the blurred image
    #[arg(long, default_value = "blurred.png")]
    pub blurred: PathBuf,

    /// Output path for the blurred and noisy image
    #[arg(long, default_value = "noisy.png")]
    pub noisy: PathBuf,
}

pub fn run(args: &DegradeArgs) -> Result<()> {
    let frame = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let config = DegradationConfig {
        blur: args.psf.model(),
        noise: NoiseConfig {
            mean: args.noise_mean,
            std_dev: args.noise_std,
            seed: args.seed,
        },
    };
    let degraded = degrade(&frame, &config)?;

    save_image(&degraded.blurred, &args.blurred)
        .with_context(|| format!("Failed to write {}", args.blurred.display()))?;
    save_image(&degraded.noisy, &args.noisy)
        .with_context(|| format!("Failed to write {}", args.noisy.display()))?;

    println!("Blur:   {}", config.blur);
    println!("Saved {}", args.blurred.display());
    println!("Saved {}", args.noisy.display());
    Ok(())
}
