use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deconv_core::consts::{DATA_RANGE_U8, DEFAULT_SSIM_WINDOW};
use deconv_core::io::image_io::load_image;
use deconv_core::quality::{score, SsimConfig};

#[derive(Args)]
pub struct ScoreArgs {
    /// Ground-truth image
    pub reference: PathBuf,

    /// Image to score
    pub candidate: PathBuf,

    /// Maximum representable intensity
    #[arg(long, default_value_t = DATA_RANGE_U8)]
    pub data_range: f64,

    /// SSIM window side (odd); ignored with --gaussian
    #[arg(long, default_value_t = DEFAULT_SSIM_WINDOW)]
    pub window: usize,

    /// Use the 11x11 Gaussian-weighted SSIM window (sigma 1.5)
    #[arg(long)]
    pub gaussian: bool,
}

pub fn run(args: &ScoreArgs) -> Result<()> {
    let reference = load_image(&args.reference)
        .with_context(|| format!("Failed to load {}", args.reference.display()))?;
    let candidate = load_image(&args.candidate)
        .with_context(|| format!("Failed to load {}", args.candidate.display()))?;

    let ssim_config = if args.gaussian {
        SsimConfig::gaussian()
    } else {
        SsimConfig {
            window_size: args.window,
            ..SsimConfig::default()
        }
    };

    let quality = score(&reference, &candidate, args.data_range, &ssim_config)?;
    println!("PSNR: {:.2} dB", quality.psnr);
    println!("SSIM: {:.4}", quality.ssim);
    Ok(())
}
