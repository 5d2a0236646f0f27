/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Maximum value of an 8-bit sample.
pub const MAX_INTENSITY_U8: f32 = 255.0;

/// Data range of 8-bit imagery, passed explicitly to the quality metrics.
pub const DATA_RANGE_U8: f64 = 255.0;

/// Guard added to the Richardson-Lucy prediction before dividing.
pub const RL_EPSILON: f64 = 1e-12;

/// Variance of 8-bit rounding error in normalized units, `1 / (12 * 255^2)`.
/// No 8-bit image carries less noise than this.
pub const QUANTIZATION_NOISE_VARIANCE: f64 = 1.0 / (12.0 * 255.0 * 255.0);

/// Smallest Wiener noise-to-signal term `K`.
pub const REGULARIZATION_FLOOR: f64 = 1e-6;

/// PSNR reported for pixel-identical images, and the upper clamp otherwise.
pub const PSNR_MAX: f64 = 100.0;

/// Default Richardson-Lucy iteration budget.
pub const DEFAULT_RL_ITERATIONS: usize = 30;

/// Default box size for the Wiener noise estimator.
pub const DEFAULT_WIENER_KERNEL_SIZE: usize = 5;

/// Default SSIM window side (uniform weighting).
pub const DEFAULT_SSIM_WINDOW: usize = 7;

/// Window side for Gaussian-weighted SSIM (Wang et al. 2004).
pub const GAUSSIAN_SSIM_WINDOW: usize = 11;

/// Gaussian sigma for Gaussian-weighted SSIM.
pub const GAUSSIAN_SSIM_SIGMA: f64 = 1.5;

/// SSIM luminance stabilizer coefficient.
pub const SSIM_K1: f64 = 0.01;

/// SSIM contrast/structure stabilizer coefficient.
pub const SSIM_K2: f64 = 0.03;

/// Default synthetic blur: 15x15 Gaussian kernel.
pub const DEFAULT_BLUR_SIZE: usize = 15;

/// Default synthetic blur sigma in pixels.
pub const DEFAULT_BLUR_SIGMA: f32 = 5.0;

/// Default synthetic noise standard deviation, in 8-bit units.
pub const DEFAULT_NOISE_STD_DEV: f32 = 20.0;
