use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::Args;
use deconv_core::consts::{DEFAULT_NOISE_STD_DEV, DEFAULT_RL_ITERATIONS, DEFAULT_WIENER_KERNEL_SIZE};
use deconv_core::degrade::{DegradationConfig, NoiseConfig};
use deconv_core::pipeline::config::PipelineConfig;
use deconv_core::pipeline::{run_pipeline_reported, PipelineStage, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::psf::PsfArgs;

#[derive(Args)]
pub struct RunArgs {
    /// Ground-truth input images
    pub files: Vec<PathBuf>,

    /// Pipeline config file (TOML); flags are ignored when given
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub psf: PsfArgs,

    /// Gaussian noise standard deviation in 8-bit units
    #[arg(long, default_value_t = DEFAULT_NOISE_STD_DEV)]
    pub noise_std: f32,

    /// RNG seed for reproducible noise
    #[arg(long)]
    pub seed: Option<u64>,

    /// Wiener noise-estimation box size (odd)
    #[arg(long, default_value_t = DEFAULT_WIENER_KERNEL_SIZE)]
    pub kernel_size: usize,

    /// Richardson-Lucy iteration count
    #[arg(long, default_value_t = DEFAULT_RL_ITERATIONS)]
    pub iterations: usize,

    /// Do not write images, only print scores
    #[arg(long)]
    pub no_save: bool,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    pub output_dir: PathBuf,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        let mut config: PipelineConfig =
            toml::from_str(&contents).context("Invalid pipeline config")?;
        if !args.files.is_empty() {
            config.inputs = args.files.clone();
        }
        info!(path = %config_path.display(), "Loaded pipeline config");
        config
    } else {
        build_config_from_args(args)
    };

    crate::summary::print_pipeline_summary(&config);

    let reporter = Arc::new(BarReporter::default());
    let report = run_pipeline_reported(&config, reporter.clone())?;
    reporter.clear();

    crate::summary::print_report(&report);
    if config.save_images {
        println!("\nOutput saved to {}", config.output_dir.display());
    }

    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> PipelineConfig {
    let mut config = PipelineConfig {
        inputs: args.files.clone(),
        output_dir: args.output_dir.clone(),
        save_images: !args.no_save,
        degradation: DegradationConfig {
            blur: args.psf.model(),
            noise: NoiseConfig {
                std_dev: args.noise_std,
                seed: args.seed,
                ..Default::default()
            },
        },
        ..PipelineConfig::default()
    };
    config.wiener.kernel_size = args.kernel_size;
    config.richardson_lucy.iterations = args.iterations;
    config
}

/// Drives one indicatif bar per pipeline stage.
#[derive(Default)]
struct BarReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl BarReporter {
    fn clear(&self) {
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(pb) = slot.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        let pb = ProgressBar::new(total_items.unwrap_or(0) as u64);
        if let Ok(style) = ProgressStyle::default_bar().template("{msg:20} [{bar:40}] {pos}/{len}")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        pb.set_message(stage.to_string());
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(old) = slot.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn advance(&self, items_done: usize) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.set_position(items_done as u64);
            }
        }
    }

    fn finish_stage(&self) {
        if let Ok(slot) = self.bar.lock() {
            if let Some(pb) = slot.as_ref() {
                pb.finish();
            }
        }
    }
}
