use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{DeconvError, Result};

/// Point-spread function: a small, odd-sized, non-negative kernel whose
/// weights sum to 1.0.
///
/// The centre sample `(height / 2, width / 2)` is the alignment origin used
/// when the kernel is embedded for frequency-domain work.
#[derive(Clone, Debug, PartialEq)]
pub struct Psf {
    kernel: Array2<f32>,
}

impl Psf {
    /// Validate and normalize a kernel.
    pub fn new(kernel: Array2<f32>) -> Result<Self> {
        let (h, w) = kernel.dim();
        if h == 0 || w == 0 {
            return Err(DeconvError::invalid("PSF is empty"));
        }
        if h % 2 == 0 || w % 2 == 0 {
            return Err(DeconvError::invalid(format!(
                "PSF dimensions must be odd, got {w}x{h}"
            )));
        }
        if kernel.iter().any(|v| !v.is_finite()) {
            return Err(DeconvError::invalid("PSF contains non-finite weights"));
        }
        if kernel.iter().any(|&v| v < 0.0) {
            return Err(DeconvError::invalid("PSF contains negative weights"));
        }

        let sum: f64 = kernel.iter().map(|&v| v as f64).sum();
        if sum <= 0.0 {
            return Err(DeconvError::invalid("PSF weights sum to zero"));
        }

        let inv = (1.0 / sum) as f32;
        Ok(Self {
            kernel: kernel.mapv(|v| v * inv),
        })
    }

    /// Uniform `size x size` box kernel.
    pub fn uniform(size: usize) -> Result<Self> {
        Self::new(Array2::from_elem((size, size), 1.0))
    }

    /// Separable Gaussian kernel built as the outer product of a normalized
    /// 1-D Gaussian. A non-positive `sigma` is derived from the size as
    /// `0.3 * ((size - 1) / 2 - 1) + 0.8`.
    pub fn gaussian(size: usize, sigma: f32) -> Result<Self> {
        let taps = gaussian_taps(size, sigma);
        let kernel = Array2::from_shape_fn((size, size), |(r, c)| taps[r] * taps[c]);
        Self::new(kernel)
    }

    /// Airy pattern `(2 J1(pi r / R) / (pi r / R))^2` truncated to
    /// `size x size`. `radius` is the first dark ring radius in pixels.
    pub fn airy(size: usize, radius: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(DeconvError::invalid(format!(
                "Airy radius must be positive, got {radius}"
            )));
        }
        let half = (size / 2) as f64;
        let r_param = radius as f64;

        let kernel = Array2::from_shape_fn((size, size), |(row, col)| {
            let y = row as f64 - half;
            let x = col as f64 - half;
            let r = (x * x + y * y).sqrt();
            let val = if r < 1e-12 {
                1.0 // lim (2*J1(x)/x)^2 as x→0 = 1
            } else {
                let arg = std::f64::consts::PI * r / r_param;
                let jinc = 2.0 * bessel_j1(arg) / arg;
                jinc * jinc
            };
            val as f32
        });
        Self::new(kernel)
    }

    pub fn kernel(&self) -> &Array2<f32> {
        &self.kernel
    }

    pub fn height(&self) -> usize {
        self.kernel.nrows()
    }

    pub fn width(&self) -> usize {
        self.kernel.ncols()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.kernel.dim()
    }

    /// Half-size on each axis: `(height / 2, width / 2)`.
    pub fn radius(&self) -> (usize, usize) {
        (self.height() / 2, self.width() / 2)
    }

    /// Kernel flipped on both axes. Convolving with it is the adjoint of
    /// convolving with `self`.
    pub fn mirrored(&self) -> Self {
        let (h, w) = self.dim();
        Self {
            kernel: Array2::from_shape_fn((h, w), |(r, c)| self.kernel[[h - 1 - r, w - 1 - c]]),
        }
    }

    /// Reject a PSF that does not fit inside an image of shape `dim`.
    pub fn ensure_fits(&self, dim: (usize, usize)) -> Result<()> {
        let (ph, pw) = self.dim();
        if ph > dim.0 || pw > dim.1 {
            return Err(DeconvError::invalid(format!(
                "PSF {pw}x{ph} is larger than image {}x{}",
                dim.1, dim.0
            )));
        }
        Ok(())
    }
}

fn gaussian_taps(size: usize, sigma: f32) -> Vec<f32> {
    let sigma = if sigma > 0.0 {
        sigma as f64
    } else {
        0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8
    };
    let center = (size as f64 - 1.0) / 2.0;
    let s2 = 2.0 * sigma * sigma;

    let raw: Vec<f64> = (0..size)
        .map(|i| {
            let x = i as f64 - center;
            (-x * x / s2).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|v| (v / sum) as f32).collect()
}

/// Serializable description of a PSF shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PsfModel {
    Uniform { size: usize },
    Gaussian { size: usize, sigma: f32 },
    Airy { size: usize, radius: f32 },
}

impl PsfModel {
    pub fn build(&self) -> Result<Psf> {
        match *self {
            PsfModel::Uniform { size } => Psf::uniform(size),
            PsfModel::Gaussian { size, sigma } => Psf::gaussian(size, sigma),
            PsfModel::Airy { size, radius } => Psf::airy(size, radius),
        }
    }

    pub fn size(&self) -> usize {
        match *self {
            PsfModel::Uniform { size }
            | PsfModel::Gaussian { size, .. }
            | PsfModel::Airy { size, .. } => size,
        }
    }
}

impl Default for PsfModel {
    fn default() -> Self {
        PsfModel::Gaussian {
            size: crate::consts::DEFAULT_BLUR_SIZE,
            sigma: crate::consts::DEFAULT_BLUR_SIGMA,
        }
    }
}

impl std::fmt::Display for PsfModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uniform { size } => write!(f, "Uniform {size}x{size}"),
            Self::Gaussian { size, sigma } => write!(f, "Gaussian {size}x{size}, sigma {sigma}"),
            Self::Airy { size, radius } => write!(f, "Airy {size}x{size}, radius {radius}"),
        }
    }
}

/// Bessel function of the first kind, order one.
///
/// Rational fit below 8 and the large-argument asymptotic form above it
/// (Abramowitz & Stegun 9.4), good to about 1e-8.
pub(crate) fn bessel_j1(x: f64) -> f64 {
    const NUM: [f64; 6] = [
        72362614232.0,
        -7895059235.0,
        242396853.1,
        -2972611.439,
        15704.48260,
        -30.16036606,
    ];
    const DEN: [f64; 6] = [
        144725228442.0,
        2300535178.0,
        18583304.74,
        99447.43394,
        376.9991397,
        1.0,
    ];
    const P: [f64; 5] = [1.0, 0.183105e-2, -0.3516396496e-4, 0.2457520174e-5, -0.240337019e-6];
    const Q: [f64; 5] = [
        0.04687499995,
        -0.2002690873e-3,
        0.8449199096e-5,
        -0.88228987e-6,
        0.105787412e-6,
    ];

    let ax = x.abs();
    if ax < 8.0 {
        let y = x * x;
        return x * polynomial(y, &NUM) / polynomial(y, &DEN);
    }

    let z = 8.0 / ax;
    let y = z * z;
    let phase = ax - 0.75 * std::f64::consts::PI;
    let magnitude = (std::f64::consts::FRAC_2_PI / ax).sqrt()
        * (phase.cos() * polynomial(y, &P) - z * phase.sin() * polynomial(y, &Q));
    if x < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Horner evaluation, lowest-order coefficient first.
fn polynomial(x: f64, coeffs: &[f64]) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}
