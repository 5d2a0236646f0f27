use ndarray::Array2;

use crate::consts::PSNR_MAX;
use crate::error::{DeconvError, Result};
use crate::frame::{ensure_non_empty, ensure_same_dim, Frame};

/// Peak signal-to-noise ratio in dB between a reference and a candidate.
///
/// `data_range` is the maximum representable intensity (255 for 8-bit
/// data). Pixel-identical inputs return [`PSNR_MAX`]; other results are
/// clamped to `[0, PSNR_MAX]`.
pub fn psnr(reference: &Frame, candidate: &Frame, data_range: f64) -> Result<f64> {
    psnr_array(&reference.to_f64(), &candidate.to_f64(), data_range)
}

pub fn psnr_array(reference: &Array2<f64>, candidate: &Array2<f64>, data_range: f64) -> Result<f64> {
    validate_data_range(data_range)?;
    let mse = mean_squared_error(reference, candidate)?;
    if mse == 0.0 {
        return Ok(PSNR_MAX);
    }
    let db = 10.0 * (data_range * data_range / mse).log10();
    Ok(db.clamp(0.0, PSNR_MAX))
}

/// Mean of squared per-pixel differences.
pub fn mean_squared_error(reference: &Array2<f64>, candidate: &Array2<f64>) -> Result<f64> {
    ensure_non_empty(reference.dim(), "reference image")?;
    ensure_same_dim(reference.dim(), candidate.dim())?;

    let sum: f64 = reference
        .iter()
        .zip(candidate.iter())
        .map(|(&a, &b)| (a - b) * (a - b))
        .sum();
    Ok(sum / reference.len() as f64)
}

pub(crate) fn validate_data_range(data_range: f64) -> Result<()> {
    if !data_range.is_finite() || data_range <= 0.0 {
        return Err(DeconvError::invalid(format!(
            "data range must be finite and positive, got {data_range}"
        )));
    }
    Ok(())
}
