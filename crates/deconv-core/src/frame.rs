use ndarray::Array2;

use crate::consts::MAX_INTENSITY_U8;
use crate::error::{DeconvError, Result};

/// A single-channel 8-bit image.
///
/// Every processing stage returns a new `Frame`; none mutates its input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<u8>,
}

impl Frame {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    /// A frame with every sample set to `value`.
    pub fn filled(height: usize, width: usize, value: u8) -> Self {
        Self::new(Array2::from_elem((height, width), value))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn dim(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Samples scaled to [0.0, 1.0].
    pub fn to_normalized(&self) -> Array2<f32> {
        self.data.mapv(|v| v as f32 / MAX_INTENSITY_U8)
    }

    /// Samples as f64 in their native [0, 255] range, for scoring.
    pub fn to_f64(&self) -> Array2<f64> {
        self.data.mapv(f64::from)
    }

    /// Clip to [0, 1], rescale to [0, 255] and round to the nearest sample.
    /// NaN maps to 0.
    pub fn from_normalized(data: &Array2<f32>) -> Self {
        Self::new(data.mapv(quantize))
    }
}

fn quantize(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v.clamp(0.0, 1.0) * MAX_INTENSITY_U8).round() as u8
}

/// Reject an empty frame at a public boundary.
pub(crate) fn ensure_non_empty(dim: (usize, usize), what: &str) -> Result<()> {
    if dim.0 == 0 || dim.1 == 0 {
        return Err(DeconvError::invalid(format!(
            "{what} is empty ({}x{})",
            dim.1, dim.0
        )));
    }
    Ok(())
}

/// Reject two arrays whose shapes differ.
pub(crate) fn ensure_same_dim(a: (usize, usize), b: (usize, usize)) -> Result<()> {
    if a != b {
        return Err(DeconvError::invalid(format!(
            "dimension mismatch: {}x{} vs {}x{}",
            a.1, a.0, b.1, b.0
        )));
    }
    Ok(())
}
