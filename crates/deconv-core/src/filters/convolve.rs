use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::spectral::reflect_index;

/// 2-D convolution with reflect-101 borders. Output has the input's shape.
///
/// The kernel is flipped (true convolution), so an asymmetric kernel shifts
/// content the same way the frequency-domain product does.
pub fn convolve2d(data: &Array2<f32>, kernel: &Array2<f32>) -> Array2<f32> {
    let (h, w) = data.dim();
    let (kh, kw) = kernel.dim();
    let (cy, cx) = ((kh / 2) as isize, (kw / 2) as isize);

    map_pixels(h, w, |row, col| {
        let mut sum = 0.0f64;
        for ((ki, kj), &kv) in kernel.indexed_iter() {
            if kv == 0.0 {
                continue;
            }
            let src_row = reflect_index(row as isize + cy - ki as isize, h);
            let src_col = reflect_index(col as isize + cx - kj as isize, w);
            sum += data[[src_row, src_col]] as f64 * kv as f64;
        }
        sum as f32
    })
}

/// Mean over a `size x size` window, reflect-101 borders.
pub fn box_filter(data: &Array2<f32>, size: usize) -> Array2<f32> {
    let taps = vec![1.0 / size as f32; size];
    let row_pass = convolve_rows(data, &taps);
    convolve_cols(&row_pass, &taps)
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = (kernel.len() / 2) as isize;

    map_pixels(h, w, |row, col| {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src_col = reflect_index(col as isize + ki as isize - radius, w);
            sum += data[[row, src_col]] * kv;
        }
        sum
    })
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = (kernel.len() / 2) as isize;

    map_pixels(h, w, |row, col| {
        let mut sum = 0.0f32;
        for (ki, &kv) in kernel.iter().enumerate() {
            let src_row = reflect_index(row as isize + ki as isize - radius, h);
            sum += data[[src_row, col]] * kv;
        }
        sum
    })
}

/// Evaluate `f(row, col)` over an `h x w` grid, splitting rows across the
/// Rayon pool for large images.
fn map_pixels<F>(h: usize, w: usize, f: F) -> Array2<f32>
where
    F: Fn(usize, usize) -> f32 + Sync,
{
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| (0..w).map(|col| f(row, col)).collect())
            .collect();

        let mut result = Array2::<f32>::zeros((h, w));
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
        result
    } else {
        Array2::from_shape_fn((h, w), |(row, col)| f(row, col))
    }
}
