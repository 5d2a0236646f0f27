use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_SSIM_WINDOW, GAUSSIAN_SSIM_SIGMA, GAUSSIAN_SSIM_WINDOW, SSIM_K1, SSIM_K2,
};
use crate::error::{DeconvError, Result};
use crate::frame::{ensure_non_empty, ensure_same_dim, Frame};

use super::psnr::validate_data_range;

/// How samples inside an SSIM window are weighted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SsimWeighting {
    /// Equal weights; local variances use the unbiased `N / (N - 1)` form.
    Uniform,
    /// Gaussian weights with the given sigma, in pixels.
    Gaussian { sigma: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SsimConfig {
    /// Side of the square sliding window. Odd, at least 3.
    pub window_size: usize,
    pub weighting: SsimWeighting,
    pub k1: f64,
    pub k2: f64,
}

impl Default for SsimConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_SSIM_WINDOW,
            weighting: SsimWeighting::Uniform,
            k1: SSIM_K1,
            k2: SSIM_K2,
        }
    }
}

impl SsimConfig {
    /// 11x11 Gaussian window with sigma 1.5.
    pub fn gaussian() -> Self {
        Self {
            window_size: GAUSSIAN_SSIM_WINDOW,
            weighting: SsimWeighting::Gaussian {
                sigma: GAUSSIAN_SSIM_SIGMA,
            },
            ..Self::default()
        }
    }

    fn validate(&self, dim: (usize, usize)) -> Result<()> {
        let n = self.window_size;
        if n < 3 || n % 2 == 0 {
            return Err(DeconvError::invalid(format!(
                "SSIM window must be odd and at least 3, got {n}"
            )));
        }
        if n > dim.0 || n > dim.1 {
            return Err(DeconvError::invalid(format!(
                "SSIM window {n} exceeds image {}x{}",
                dim.1, dim.0
            )));
        }
        if !(self.k1.is_finite() && self.k1 > 0.0 && self.k2.is_finite() && self.k2 > 0.0) {
            return Err(DeconvError::invalid("SSIM constants K1 and K2 must be positive"));
        }
        if let SsimWeighting::Gaussian { sigma } = self.weighting {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(DeconvError::invalid(format!(
                    "SSIM Gaussian sigma must be positive, got {sigma}"
                )));
            }
        }
        Ok(())
    }

    fn taps(&self) -> Vec<f64> {
        let n = self.window_size;
        match self.weighting {
            SsimWeighting::Uniform => vec![1.0 / n as f64; n],
            SsimWeighting::Gaussian { sigma } => {
                let center = (n / 2) as f64;
                let raw: Vec<f64> = (0..n)
                    .map(|i| {
                        let x = i as f64 - center;
                        (-x * x / (2.0 * sigma * sigma)).exp()
                    })
                    .collect();
                let sum: f64 = raw.iter().sum();
                raw.into_iter().map(|v| v / sum).collect()
            }
        }
    }

    fn covariance_norm(&self) -> f64 {
        match self.weighting {
            SsimWeighting::Uniform => {
                let np = (self.window_size * self.window_size) as f64;
                np / (np - 1.0)
            }
            SsimWeighting::Gaussian { .. } => 1.0,
        }
    }
}

/// Mean structural similarity between two 8-bit frames.
pub fn ssim(
    reference: &Frame,
    candidate: &Frame,
    data_range: f64,
    config: &SsimConfig,
) -> Result<f64> {
    ssim_array(&reference.to_f64(), &candidate.to_f64(), data_range, config)
}

/// Mean of [`ssim_map`].
pub fn ssim_array(
    reference: &Array2<f64>,
    candidate: &Array2<f64>,
    data_range: f64,
    config: &SsimConfig,
) -> Result<f64> {
    let map = ssim_map(reference, candidate, data_range, config)?;
    Ok(map.mean().unwrap_or(0.0))
}

/// Per-window SSIM, one value for every window position that lies fully
/// inside the image. Shape is `(h - n + 1, w - n + 1)`.
///
/// Combines luminance, contrast and structure terms:
/// `((2 mu_x mu_y + C1)(2 s_xy + C2)) / ((mu_x^2 + mu_y^2 + C1)(s_x^2 + s_y^2 + C2))`
/// with `C1 = (K1 L)^2`, `C2 = (K2 L)^2` and `L = data_range`.
pub fn ssim_map(
    reference: &Array2<f64>,
    candidate: &Array2<f64>,
    data_range: f64,
    config: &SsimConfig,
) -> Result<Array2<f64>> {
    let dim = reference.dim();
    ensure_non_empty(dim, "reference image")?;
    ensure_same_dim(dim, candidate.dim())?;
    validate_data_range(data_range)?;
    config.validate(dim)?;

    let taps = config.taps();
    let cov_norm = config.covariance_norm();
    let c1 = (config.k1 * data_range).powi(2);
    let c2 = (config.k2 * data_range).powi(2);

    let xx = reference * reference;
    let yy = candidate * candidate;
    let xy = reference * candidate;

    let ux = filter_valid(reference, &taps);
    let uy = filter_valid(candidate, &taps);
    let uxx = filter_valid(&xx, &taps);
    let uyy = filter_valid(&yy, &taps);
    let uxy = filter_valid(&xy, &taps);

    let mut map = Array2::<f64>::zeros(ux.dim());
    Zip::from(&mut map)
        .and(&ux)
        .and(&uy)
        .and(&uxx)
        .and(&uyy)
        .and(&uxy)
        .for_each(|s, &mx, &my, &mxx, &myy, &mxy| {
            let vx = cov_norm * (mxx - mx * mx);
            let vy = cov_norm * (myy - my * my);
            let vxy = cov_norm * (mxy - mx * my);

            let num = (2.0 * mx * my + c1) * (2.0 * vxy + c2);
            let den = (mx * mx + my * my + c1) * (vx + vy + c2);
            *s = num / den;
        });

    Ok(map)
}

/// Separable weighted window sum, evaluated only where the window fits.
fn filter_valid(data: &Array2<f64>, taps: &[f64]) -> Array2<f64> {
    let (h, w) = data.dim();
    let n = taps.len();
    let (oh, ow) = (h + 1 - n, w + 1 - n);

    let rows = Array2::from_shape_fn((h, ow), |(r, c)| {
        taps.iter().enumerate().map(|(k, &t)| data[[r, c + k]] * t).sum::<f64>()
    });
    Array2::from_shape_fn((oh, ow), |(r, c)| {
        taps.iter().enumerate().map(|(k, &t)| rows[[r + k, c]] * t).sum::<f64>()
    })
}
