use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use deconv_core::pipeline::config::PipelineConfig;

#[derive(Args)]
pub struct ConfigArgs {
    /// Destination file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Emit the default pipeline config as TOML, ready to edit and pass to
/// `deconv run --config`.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let template = PipelineConfig {
        inputs: vec![PathBuf::from("input.png")],
        ..PipelineConfig::default()
    };
    let rendered = toml::to_string_pretty(&template).context("Failed to render config")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
