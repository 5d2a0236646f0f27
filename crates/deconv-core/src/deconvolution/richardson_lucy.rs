use ndarray::{Array2, Zip};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{DEFAULT_RL_ITERATIONS, RL_EPSILON};
use crate::error::{DeconvError, Result};
use crate::frame::{ensure_non_empty, Frame};
use crate::psf::Psf;
use crate::spectral::{crop, pad_reflect, psf_transfer, SpectralPlan};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RichardsonLucyConfig {
    /// Fixed iteration budget. More iterations sharpen further but also
    /// amplify noise.
    pub iterations: usize,
    /// Optional early stop: halt once the largest per-pixel change between
    /// successive estimates falls below this value. `None` always runs the
    /// full budget.
    pub tolerance: Option<f64>,
}

impl Default for RichardsonLucyConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_RL_ITERATIONS,
            tolerance: None,
        }
    }
}

/// Restore an 8-bit frame by Richardson-Lucy deconvolution.
pub fn richardson_lucy_deconvolve(
    frame: &Frame,
    psf: &Psf,
    config: &RichardsonLucyConfig,
) -> Result<Frame> {
    let restored = richardson_lucy_array(&frame.to_normalized(), psf, config)?;
    Ok(Frame::from_normalized(&restored))
}

/// Richardson-Lucy deconvolution of normalized, non-negative data.
///
/// Starts from the observed image and applies the multiplicative update
/// `estimate *= (observed / (estimate ⊛ psf)) ⊛ psf_mirrored`. Both
/// convolutions use reflect-101 borders: each operand is padded by the PSF
/// radius, convolved in the frequency domain and cropped again, so no
/// wrap-around reaches the image. Output is clipped to [0, 1]; with zero
/// iterations the input comes back unchanged.
pub fn richardson_lucy_array(
    data: &Array2<f32>,
    psf: &Psf,
    config: &RichardsonLucyConfig,
) -> Result<Array2<f32>> {
    let dim = data.dim();
    ensure_non_empty(dim, "image")?;
    psf.ensure_fits(dim)?;
    if data.iter().any(|v| !v.is_finite()) {
        return Err(DeconvError::invalid("image contains non-finite intensities"));
    }
    if data.iter().any(|&v| v < 0.0) {
        return Err(DeconvError::invalid(
            "Richardson-Lucy requires non-negative intensities",
        ));
    }
    if let Some(t) = config.tolerance {
        if !t.is_finite() || t < 0.0 {
            return Err(DeconvError::invalid(format!(
                "tolerance must be finite and non-negative, got {t}"
            )));
        }
    }

    if config.iterations == 0 {
        return Ok(data.clone());
    }

    let pad = psf.radius();
    let plan = SpectralPlan::new(dim.0 + 2 * pad.0, dim.1 + 2 * pad.1);
    let otf = psf_transfer(&plan, psf);
    let otf_adjoint = psf_transfer(&plan, &psf.mirrored());
    let blur_with = |image: &Array2<f64>, otf: &Array2<Complex<f64>>| {
        crop(&plan.convolve(&pad_reflect(image, pad), otf), pad, dim)
    };

    let observed = data.mapv(f64::from);
    let mut estimate = observed.clone();
    let mut ratio = Array2::<f64>::zeros(dim);
    let mut performed = 0;

    for _iter in 0..config.iterations {
        let predicted = blur_with(&estimate, &otf);

        Zip::from(&mut ratio)
            .and(&observed)
            .and(&predicted)
            .for_each(|r, &o, &p| *r = o / (p.max(0.0) + RL_EPSILON));

        let correction = blur_with(&ratio, &otf_adjoint);

        let mut max_change = 0.0f64;
        Zip::from(&mut estimate)
            .and(&correction)
            .for_each(|e, &c| {
                let next = (*e * c).max(0.0);
                max_change = max_change.max((next - *e).abs());
                *e = next;
            });
        performed += 1;

        if config.tolerance.is_some_and(|t| max_change < t) {
            debug!(iteration = performed, max_change, "Richardson-Lucy converged early");
            break;
        }
    }

    debug!(
        width = dim.1,
        height = dim.0,
        iterations = performed,
        "Richardson-Lucy deconvolution"
    );

    Ok(estimate.mapv(|v| (v as f32).clamp(0.0, 1.0)))
}
