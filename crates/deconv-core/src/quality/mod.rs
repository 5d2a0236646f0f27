pub mod psnr;
pub mod ssim;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::frame::Frame;

pub use psnr::{mean_squared_error, psnr, psnr_array};
pub use ssim::{ssim, ssim_array, ssim_map, SsimConfig, SsimWeighting};

/// Both quality metrics for one candidate against its reference.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub psnr: f64,
    pub ssim: f64,
}

/// Score `candidate` against `reference` with PSNR and SSIM.
pub fn score(
    reference: &Frame,
    candidate: &Frame,
    data_range: f64,
    ssim_config: &SsimConfig,
) -> Result<QualityReport> {
    Ok(QualityReport {
        psnr: psnr(reference, candidate, data_range)?,
        ssim: ssim(reference, candidate, data_range, ssim_config)?,
    })
}
