use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deconv_core::consts::DEFAULT_RL_ITERATIONS;
use deconv_core::deconvolution::{DeconvolutionMethod, RichardsonLucyConfig};

use super::psf::PsfArgs;

#[derive(Args)]
pub struct RlArgs {
    /// Degraded input image
    pub file: PathBuf,

    #[command(flatten)]
    pub psf: PsfArgs,

    /// Iteration count
    #[arg(long, default_value_t = DEFAULT_RL_ITERATIONS)]
    pub iterations: usize,

    /// Stop early once the largest per-pixel change drops below this value
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Ground-truth image to score the result against
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "richardson_lucy.png")]
    pub output: PathBuf,
}

pub fn run(args: &RlArgs) -> Result<()> {
    let method = DeconvolutionMethod::RichardsonLucy(RichardsonLucyConfig {
        iterations: args.iterations,
        tolerance: args.tolerance,
    });
    super::restore(&args.file, &args.psf, &method, args.reference.as_deref(), &args.output)
        .with_context(|| format!("Richardson-Lucy restoration of {} failed", args.file.display()))
}
