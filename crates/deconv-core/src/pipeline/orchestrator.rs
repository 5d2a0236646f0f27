use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::info;

use crate::deconvolution::{deconvolve, DeconvolutionMethod};
use crate::degrade::degrade;
use crate::error::Result;
use crate::frame::Frame;
use crate::io::image_io::{load_image, save_png};
use crate::quality::score;

use super::config::PipelineConfig;
use super::types::{
    ImageRun, NoOpReporter, PipelineReport, PipelineStage, ProgressReporter, Restoration, Route,
};

/// Degrade one ground-truth frame, restore both routes with both methods
/// and score everything against the original. No file I/O.
pub fn process_frame(name: &str, original: &Frame, config: &PipelineConfig) -> Result<ImageRun> {
    let degraded = degrade(original, &config.degradation)?;
    let methods = [
        DeconvolutionMethod::Wiener(config.wiener.clone()),
        DeconvolutionMethod::RichardsonLucy(config.richardson_lucy.clone()),
    ];

    let mut baselines = Vec::with_capacity(Route::ALL.len());
    let mut restorations = Vec::with_capacity(Route::ALL.len() * methods.len());

    for route in Route::ALL {
        let input = match route {
            Route::Noisy => &degraded.noisy,
            Route::BlurOnly => &degraded.blurred,
        };
        baselines.push((
            route,
            score(original, input, config.data_range, &config.ssim)?,
        ));

        for method in &methods {
            let restored = deconvolve(input, &degraded.psf, method)?;
            let quality = score(original, &restored, config.data_range, &config.ssim)?;
            info!(
                image = name,
                route = %route,
                method = %method.kind(),
                psnr = quality.psnr,
                ssim = quality.ssim,
                "Restored"
            );
            restorations.push(Restoration {
                route,
                method: method.kind(),
                frame: restored,
                quality,
            });
        }
    }

    Ok(ImageRun {
        name: name.to_string(),
        original: original.clone(),
        degraded,
        baselines,
        restorations,
    })
}

/// Run the full pipeline with a thread-safe progress reporter.
///
/// Inputs are independent and processed in parallel; the report keeps input
/// order.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PipelineReport> {
    config.validate()?;
    let names = unique_names(&config.inputs);
    let total = config.inputs.len();
    info!(
        images = total,
        blur = %config.degradation.blur,
        iterations = config.richardson_lucy.iterations,
        "Starting restoration pipeline"
    );

    reporter.begin_stage(PipelineStage::Processing, Some(total));
    let done = AtomicUsize::new(0);
    let images: Vec<ImageRun> = config
        .inputs
        .par_iter()
        .zip(names.par_iter())
        .map(|(path, name)| {
            let original = load_image(path)?;
            let run = process_frame(name, &original, config)?;
            let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
            reporter.advance(completed);
            Ok(run)
        })
        .collect::<Result<_>>()?;
    reporter.finish_stage();

    if config.save_images {
        reporter.begin_stage(PipelineStage::Writing, Some(total));
        for (i, run) in images.iter().enumerate() {
            write_outputs(run, &config.output_dir)?;
            reporter.advance(i + 1);
        }
        reporter.finish_stage();
        info!(dir = %config.output_dir.display(), "Outputs written");
    }

    Ok(PipelineReport { images })
}

/// Run the full pipeline without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}

fn write_outputs(run: &ImageRun, output_dir: &Path) -> Result<()> {
    let dir = output_dir.join(&run.name);
    std::fs::create_dir_all(&dir)?;

    save_png(&run.original, &dir.join("original.png"))?;
    save_png(&run.degraded.blurred, &dir.join("blurred.png"))?;
    save_png(&run.degraded.noisy, &dir.join("noisy.png"))?;

    for r in &run.restorations {
        let file = format!("{}_{}_deblurred.png", r.route.slug(), r.method.slug());
        save_png(&r.frame, &dir.join(file))?;
    }
    Ok(())
}

/// Output subdirectory name per input: the file stem, suffixed with the
/// input index when two inputs share a stem.
fn unique_names(inputs: &[PathBuf]) -> Vec<String> {
    let mut seen = HashSet::new();
    inputs
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("image_{i}"));
            if seen.insert(stem.clone()) {
                stem
            } else {
                format!("{stem}_{i}")
            }
        })
        .collect()
}
