use std::path::Path;

use image::{GrayImage, ImageFormat};
use ndarray::Array2;
use tracing::debug;

use crate::error::{DeconvError, Result};
use crate::frame::Frame;

/// Load an image file as 8-bit grayscale. Colour input is converted to
/// luma by the `image` crate.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path)?;
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_vec((h as usize, w as usize), gray.into_raw())
        .map_err(|e| DeconvError::invalid(format!("{}: {e}", path.display())))?;

    debug!(path = %path.display(), width = w, height = h, "Loaded image");
    Ok(Frame::new(data))
}

/// Save a frame as 8-bit grayscale PNG.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    to_gray_image(frame)?.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save a frame, choosing the format from the file extension (PNG when the
/// extension is missing or unknown).
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    match ImageFormat::from_path(path) {
        Ok(format) => to_gray_image(frame)?.save_with_format(path, format)?,
        Err(_) => save_png(frame, path)?,
    }
    debug!(path = %path.display(), "Saved image");
    Ok(())
}

fn to_gray_image(frame: &Frame) -> Result<GrayImage> {
    let (h, w) = frame.dim();
    let pixels: Vec<u8> = frame.data.iter().copied().collect();
    GrayImage::from_raw(w as u32, h as u32, pixels)
        .ok_or_else(|| DeconvError::invalid(format!("cannot encode {w}x{h} frame")))
}
