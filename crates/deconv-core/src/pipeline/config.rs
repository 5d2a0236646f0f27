use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::DATA_RANGE_U8;
use crate::deconvolution::{RichardsonLucyConfig, WienerConfig};
use crate::degrade::DegradationConfig;
use crate::error::{DeconvError, Result};
use crate::quality::SsimConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Ground-truth images; each is degraded, restored and scored.
    pub inputs: Vec<PathBuf>,
    /// Root directory for written images, one subdirectory per input.
    pub output_dir: PathBuf,
    pub save_images: bool,
    /// Maximum intensity passed to PSNR and SSIM.
    pub data_range: f64,
    pub degradation: DegradationConfig,
    pub wiener: WienerConfig,
    pub richardson_lucy: RichardsonLucyConfig,
    pub ssim: SsimConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::from("output"),
            save_images: true,
            data_range: DATA_RANGE_U8,
            degradation: DegradationConfig::default(),
            wiener: WienerConfig::default(),
            richardson_lucy: RichardsonLucyConfig::default(),
            ssim: SsimConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Checks that need no image data. Per-image checks (PSF and window
    /// sizes against image dimensions) happen in the core functions.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            return Err(DeconvError::Config("no input images".into()));
        }
        if !self.data_range.is_finite() || self.data_range <= 0.0 {
            return Err(DeconvError::Config(format!(
                "data_range must be positive, got {}",
                self.data_range
            )));
        }
        self.degradation.blur.build()?;
        Ok(())
    }
}
