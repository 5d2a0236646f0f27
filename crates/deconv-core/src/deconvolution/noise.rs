use ndarray::Array2;

use crate::consts::{QUANTIZATION_NOISE_VARIANCE, REGULARIZATION_FLOOR};
use crate::filters::convolve::box_filter;

/// Estimate additive noise variance from a degraded image alone.
///
/// Heuristic: the population variance of the residual between `data` and a
/// `kernel_size x kernel_size` box-smoothed copy of itself. This is an
/// approximation, not a statistical estimate of the true noise; on
/// noise-free blurred input it returns the energy of the remaining fine
/// detail.
pub fn estimate_noise_variance(data: &Array2<f32>, kernel_size: usize) -> f64 {
    let smoothed = box_filter(data, kernel_size);
    let residual = Array2::from_shape_fn(data.dim(), |idx| data[idx] as f64 - smoothed[idx] as f64);
    population_variance(residual.iter().copied())
}

/// Population variance of the image intensities: signal plus noise power.
pub fn image_variance(data: &Array2<f32>) -> f64 {
    population_variance(data.iter().map(|&v| v as f64))
}

/// Wiener noise-to-signal term `K = noise / (image - noise)`.
///
/// Noise is raised to the 8-bit rounding level, and the signal part is kept
/// at least as large, so `K` is finite and at least [`REGULARIZATION_FLOOR`]
/// for any input, NaN included.
pub fn regularization_term(noise_variance: f64, image_variance: f64) -> f64 {
    let noise = noise_variance.max(QUANTIZATION_NOISE_VARIANCE);
    let signal = (image_variance - noise).max(QUANTIZATION_NOISE_VARIANCE);
    (noise / signal).max(REGULARIZATION_FLOOR)
}

fn population_variance(values: impl Iterator<Item = f64>) -> f64 {
    let mut n = 0usize;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    for v in values {
        n += 1;
        sum += v;
        sum_sq += v * v;
    }
    if n == 0 {
        return 0.0;
    }
    let mean = sum / n as f64;
    (sum_sq / n as f64 - mean * mean).max(0.0)
}
