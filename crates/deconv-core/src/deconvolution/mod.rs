pub mod noise;
pub mod richardson_lucy;
pub mod wiener;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::Frame;
use crate::psf::Psf;

pub use noise::{estimate_noise_variance, image_variance, regularization_term};
pub use richardson_lucy::{richardson_lucy_array, richardson_lucy_deconvolve, RichardsonLucyConfig};
pub use wiener::{wiener_deconvolve, wiener_deconvolve_array, Regularizer, WienerConfig};

/// Which restoration algorithm, without its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodKind {
    Wiener,
    RichardsonLucy,
}

impl MethodKind {
    pub const ALL: [MethodKind; 2] = [MethodKind::Wiener, MethodKind::RichardsonLucy];

    /// Short name used in output file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Wiener => "wiener",
            Self::RichardsonLucy => "lucy",
        }
    }
}

impl std::fmt::Display for MethodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wiener => write!(f, "Wiener"),
            Self::RichardsonLucy => write!(f, "Richardson-Lucy"),
        }
    }
}

/// Restoration algorithm plus its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DeconvolutionMethod {
    Wiener(WienerConfig),
    RichardsonLucy(RichardsonLucyConfig),
}

impl DeconvolutionMethod {
    pub fn kind(&self) -> MethodKind {
        match self {
            Self::Wiener(_) => MethodKind::Wiener,
            Self::RichardsonLucy(_) => MethodKind::RichardsonLucy,
        }
    }
}

impl std::fmt::Display for DeconvolutionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wiener(c) => write!(f, "Wiener (kernel {}, {})", c.kernel_size, c.regularizer),
            Self::RichardsonLucy(c) => {
                write!(f, "Richardson-Lucy ({} iterations)", c.iterations)
            }
        }
    }
}

/// Dispatch to the configured deconvolution algorithm.
pub fn deconvolve(frame: &Frame, psf: &Psf, method: &DeconvolutionMethod) -> Result<Frame> {
    match method {
        DeconvolutionMethod::Wiener(config) => wiener_deconvolve(frame, psf, config),
        DeconvolutionMethod::RichardsonLucy(config) => {
            richardson_lucy_deconvolve(frame, psf, config)
        }
    }
}
