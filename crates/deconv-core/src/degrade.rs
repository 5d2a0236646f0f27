//! Synthetic degradation used to manufacture restoration test inputs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::DEFAULT_NOISE_STD_DEV;
use crate::error::{DeconvError, Result};
use crate::filters::convolve::convolve2d;
use crate::frame::Frame;
use crate::psf::{Psf, PsfModel};

/// Additive Gaussian noise, in 8-bit intensity units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub mean: f32,
    pub std_dev: f32,
    /// Fixed RNG seed for reproducible runs. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: DEFAULT_NOISE_STD_DEV,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegradationConfig {
    pub blur: PsfModel,
    pub noise: NoiseConfig,
}

/// Output of [`degrade`]: the blur kernel plus both degraded variants.
#[derive(Clone, Debug)]
pub struct Degraded {
    pub psf: Psf,
    pub blurred: Frame,
    pub noisy: Frame,
}

/// Blur `frame` with `psf` (reflect-101 borders).
pub fn blur(frame: &Frame, psf: &Psf) -> Frame {
    let blurred = convolve2d(&frame.to_normalized(), psf.kernel());
    Frame::from_normalized(&blurred)
}

/// Add Gaussian noise and clip back to [0, 255].
pub fn add_gaussian_noise(frame: &Frame, config: &NoiseConfig) -> Result<Frame> {
    let normal = Normal::new(config.mean as f64, config.std_dev as f64).map_err(|e| {
        DeconvError::invalid(format!("invalid noise parameters: {e}"))
    })?;
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let data = frame
        .data
        .mapv(|v| (v as f64 + normal.sample(&mut rng)).round().clamp(0.0, 255.0) as u8);
    Ok(Frame::new(data))
}

/// Blur then add noise, keeping the intermediate blurred frame.
pub fn degrade(frame: &Frame, config: &DegradationConfig) -> Result<Degraded> {
    let psf = config.blur.build()?;
    psf.ensure_fits(frame.dim())?;

    debug!(psf = %config.blur, std_dev = config.noise.std_dev, "Degrading frame");
    let blurred = blur(frame, &psf);
    let noisy = add_gaussian_noise(&blurred, &config.noise)?;

    Ok(Degraded {
        psf,
        blurred,
        noisy,
    })
}
