mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deconv", about = "Non-blind image deconvolution and restoration scoring")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Worker threads for multi-image runs (default: all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Degrade, restore and score one or more images
    Run(commands::run::RunArgs),
    /// Write blurred and noisy copies of an image
    Degrade(commands::degrade::DegradeArgs),
    /// Restore an image with Wiener deconvolution
    Wiener(commands::wiener::WienerArgs),
    /// Restore an image with Richardson-Lucy deconvolution
    Rl(commands::rl::RlArgs),
    /// Compute PSNR and SSIM between two images
    Score(commands::score::ScoreArgs),
    /// Print the default pipeline config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Degrade(args) => commands::degrade::run(args),
        Commands::Wiener(args) => commands::wiener::run(args),
        Commands::Rl(args) => commands::rl::run(args),
        Commands::Score(args) => commands::score::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
