pub mod config;
pub mod degrade;
pub mod psf;
pub mod rl;
pub mod run;
pub mod score;
pub mod wiener;

use std::path::Path;

use anyhow::{Context, Result};
use deconv_core::consts::DATA_RANGE_U8;
use deconv_core::deconvolution::{deconvolve, DeconvolutionMethod};
use deconv_core::io::image_io::{load_image, save_image};
use deconv_core::quality::{score, SsimConfig};

use psf::PsfArgs;

/// Shared body of the single-image restoration commands.
fn restore(
    input: &Path,
    psf_args: &PsfArgs,
    method: &DeconvolutionMethod,
    reference: Option<&Path>,
    output: &Path,
) -> Result<()> {
    let frame =
        load_image(input).with_context(|| format!("Failed to load {}", input.display()))?;
    let model = psf_args.model();
    let psf = model.build().context("Invalid PSF")?;

    crate::summary::print_restore_summary(input, &frame, &model, method);

    let restored = deconvolve(&frame, &psf, method)?;
    save_image(&restored, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    println!("Saved to {}", output.display());

    if let Some(reference) = reference {
        let truth = load_image(reference)
            .with_context(|| format!("Failed to load {}", reference.display()))?;
        let before = score(&truth, &frame, DATA_RANGE_U8, &SsimConfig::default())?;
        let after = score(&truth, &restored, DATA_RANGE_U8, &SsimConfig::default())?;
        crate::summary::print_comparison(&before, &after);
    }

    Ok(())
}
