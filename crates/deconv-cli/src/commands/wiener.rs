use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use deconv_core::consts::DEFAULT_WIENER_KERNEL_SIZE;
use deconv_core::deconvolution::{DeconvolutionMethod, Regularizer, WienerConfig};

use super::psf::PsfArgs;

#[derive(Clone, Copy, ValueEnum)]
pub enum RegularizerArg {
    Identity,
    Laplacian,
}

impl From<RegularizerArg> for Regularizer {
    fn from(arg: RegularizerArg) -> Self {
        match arg {
            RegularizerArg::Identity => Regularizer::Identity,
            RegularizerArg::Laplacian => Regularizer::Laplacian,
        }
    }
}

#[derive(Args)]
pub struct WienerArgs {
    /// Degraded input image
    pub file: PathBuf,

    #[command(flatten)]
    pub psf: PsfArgs,

    /// Box size of the noise-estimation smoothing pass (odd)
    #[arg(long, default_value_t = DEFAULT_WIENER_KERNEL_SIZE)]
    pub kernel_size: usize,

    /// Noise variance in normalized units; estimated from the image if omitted
    #[arg(long)]
    pub noise_variance: Option<f64>,

    /// Frequency penalty scaled by the noise term
    #[arg(long, value_enum, default_value = "identity")]
    pub regularizer: RegularizerArg,

    /// Ground-truth image to score the result against
    #[arg(long)]
    pub reference: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "wiener.png")]
    pub output: PathBuf,
}

pub fn run(args: &WienerArgs) -> Result<()> {
    let method = DeconvolutionMethod::Wiener(WienerConfig {
        kernel_size: args.kernel_size,
        noise_variance: args.noise_variance,
        regularizer: args.regularizer.into(),
    });
    super::restore(&args.file, &args.psf, &method, args.reference.as_deref(), &args.output)
        .with_context(|| format!("Wiener restoration of {} failed", args.file.display()))
}
