#![allow(dead_code)]

use ndarray::Array2;

use deconv_core::frame::Frame;

/// Smooth periodic test pattern in [0.2, 0.8] with a period of 8 pixels on
/// both axes, quantized to 8 bits.
pub fn pattern_frame(h: usize, w: usize) -> Frame {
    Frame::from_normalized(&pattern_array(h, w))
}

pub fn pattern_array(h: usize, w: usize) -> Array2<f32> {
    let tau = std::f32::consts::TAU;
    Array2::from_shape_fn((h, w), |(r, c)| {
        0.5 + 0.3 * (tau * c as f32 / 8.0).sin() * (tau * r as f32 / 8.0).cos()
    })
}

/// A dark frame with a bright square in the middle.
pub fn square_frame(size: usize, value: u8) -> Frame {
    let mut data = Array2::<u8>::from_elem((size, size), 20);
    let lo = size / 4;
    let hi = size - size / 4;
    for r in lo..hi {
        for c in lo..hi {
            data[[r, c]] = value;
        }
    }
    Frame::new(data)
}

/// Horizontal 8-bit ramp, `25 + 3 * col`. Left and right edges differ, so
/// the content does not repeat across the frame.
pub fn ramp_frame(h: usize, w: usize) -> Frame {
    Frame::new(Array2::from_shape_fn((h, w), |(_, c)| (25 + 3 * c).min(255) as u8))
}

/// Ramp plus the periodic pattern: fine detail on content that does not
/// wrap around the frame.
pub fn scene_frame(h: usize, w: usize) -> Frame {
    let tau = std::f32::consts::TAU;
    let span = (w.max(2) - 1) as f32;
    Frame::from_normalized(&Array2::from_shape_fn((h, w), |(r, c)| {
        0.2 + 0.4 * c as f32 / span
            + 0.15 * (tau * c as f32 / 8.0).sin() * (tau * r as f32 / 8.0).cos()
    }))
}
