use ndarray::{array, Array2};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::DEFAULT_WIENER_KERNEL_SIZE;
use crate::error::{DeconvError, Result};
use crate::frame::{ensure_non_empty, Frame};
use crate::psf::Psf;
use crate::spectral::{crop, embed_kernel, mirror_extend, psf_transfer, SpectralPlan};

use super::noise::{estimate_noise_variance, image_variance, regularization_term};

/// Penalty applied to each frequency bin, scaled by `K`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Regularizer {
    /// Constant penalty: `H* / (|H|^2 + K)`. The DC bin is left unpenalized;
    /// blur does not change the mean, so it needs no damping.
    #[default]
    Identity,
    /// Discrete Laplacian penalty: `H* / (|H|^2 + K |L|^2)`. Leaves the mean
    /// level untouched and damps high frequencies hardest.
    Laplacian,
}

impl std::fmt::Display for Regularizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => write!(f, "Identity"),
            Self::Laplacian => write!(f, "Laplacian"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WienerConfig {
    /// Box size of the smoothing pass used by the noise estimator.
    pub kernel_size: usize,
    /// Use this noise variance (normalized units) instead of estimating it.
    pub noise_variance: Option<f64>,
    pub regularizer: Regularizer,
}

impl Default for WienerConfig {
    fn default() -> Self {
        Self {
            kernel_size: DEFAULT_WIENER_KERNEL_SIZE,
            noise_variance: None,
            regularizer: Regularizer::Identity,
        }
    }
}

impl WienerConfig {
    fn validate(&self, dim: (usize, usize)) -> Result<()> {
        let k = self.kernel_size;
        if k == 0 || k % 2 == 0 {
            return Err(DeconvError::invalid(format!(
                "Wiener kernel size must be odd and positive, got {k}"
            )));
        }
        if k > dim.0 || k > dim.1 {
            return Err(DeconvError::invalid(format!(
                "Wiener kernel size {k} exceeds image {}x{}",
                dim.1, dim.0
            )));
        }
        if let Some(v) = self.noise_variance {
            if !v.is_finite() || v < 0.0 {
                return Err(DeconvError::invalid(format!(
                    "noise variance override must be finite and non-negative, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Restore an 8-bit frame by Wiener deconvolution.
pub fn wiener_deconvolve(frame: &Frame, psf: &Psf, config: &WienerConfig) -> Result<Frame> {
    let restored = wiener_deconvolve_array(&frame.to_normalized(), psf, config)?;
    Ok(Frame::from_normalized(&restored))
}

/// Wiener deconvolution of normalized data. Output is clipped to [0, 1].
///
/// The image is mirror-extended to one full reflect-101 period before the
/// FFT, so the transform wraps without an edge seam. `K` is the
/// noise-to-signal ratio from [`regularization_term`].
pub fn wiener_deconvolve_array(
    data: &Array2<f32>,
    psf: &Psf,
    config: &WienerConfig,
) -> Result<Array2<f32>> {
    let dim = data.dim();
    ensure_non_empty(dim, "image")?;
    psf.ensure_fits(dim)?;
    config.validate(dim)?;

    let variance = match config.noise_variance {
        Some(v) => v,
        None => estimate_noise_variance(data, config.kernel_size),
    };
    let k = regularization_term(variance, image_variance(data));
    debug!(
        width = dim.1,
        height = dim.0,
        noise_variance = variance,
        k,
        regularizer = %config.regularizer,
        "Wiener deconvolution"
    );

    let extended = mirror_extend(data);
    let plan = SpectralPlan::new(extended.nrows(), extended.ncols());

    let g = plan.forward(&extended);
    let h = psf_transfer(&plan, psf);
    let penalty = penalty_spectrum(&plan, config.regularizer);

    // F = G * conj(H) / (|H|^2 + K * |R|^2)
    let mut f = Array2::<Complex<f64>>::zeros(plan.dim());
    for ((idx, out), &h_val) in f.indexed_iter_mut().zip(h.iter()) {
        let denom = h_val.norm_sqr() + k * penalty[idx];
        *out = g[idx] * h_val.conj() / denom;
    }

    let restored = plan.inverse(&f);
    let cropped = crop(&restored, (0, 0), dim);
    Ok(cropped.mapv(|v| (v as f32).clamp(0.0, 1.0)))
}

/// `|R|^2` per frequency bin for the chosen regularizer.
fn penalty_spectrum(plan: &SpectralPlan, regularizer: Regularizer) -> Array2<f64> {
    match regularizer {
        Regularizer::Identity => {
            let mut penalty = Array2::from_elem(plan.dim(), 1.0);
            penalty[[0, 0]] = 0.0;
            penalty
        }
        Regularizer::Laplacian => {
            let laplacian: Array2<f32> = array![[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]];
            plan.forward(&embed_kernel(&laplacian, plan.dim()))
                .mapv(|v| v.norm_sqr())
        }
    }
}
