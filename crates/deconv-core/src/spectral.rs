//! Frequency-domain helpers shared by the deconvolvers.

use std::sync::Arc;

use ndarray::{s, Array2};
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::psf::Psf;

/// Forward and inverse 2-D FFT plans for one grid size.
///
/// Planning once per size lets iterative methods transform the same shape
/// many times without re-planning.
pub struct SpectralPlan {
    height: usize,
    width: usize,
    row_forward: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
}

impl SpectralPlan {
    pub fn new(height: usize, width: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            height,
            width,
            row_forward: planner.plan_fft_forward(width),
            col_forward: planner.plan_fft_forward(height),
            row_inverse: planner.plan_fft_inverse(width),
            col_inverse: planner.plan_fft_inverse(height),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn forward(&self, data: &Array2<f64>) -> Array2<Complex<f64>> {
        debug_assert_eq!(data.dim(), self.dim());
        let mut work = data.mapv(|v| Complex::new(v, 0.0));
        self.transform(&mut work, &self.row_forward, &self.col_forward);
        work
    }

    /// Inverse transform, keeping only the real component. Imaginary residue
    /// left by rounding is discarded.
    pub fn inverse(&self, spectrum: &Array2<Complex<f64>>) -> Array2<f64> {
        debug_assert_eq!(spectrum.dim(), self.dim());
        let mut work = spectrum.clone();
        self.transform(&mut work, &self.row_inverse, &self.col_inverse);
        let scale = 1.0 / (self.height * self.width) as f64;
        work.mapv(|v| v.re * scale)
    }

    fn transform(
        &self,
        work: &mut Array2<Complex<f64>>,
        row_fft: &Arc<dyn Fft<f64>>,
        col_fft: &Arc<dyn Fft<f64>>,
    ) {
        let (h, w) = self.dim();

        // Row-wise FFT
        let mut row_data = vec![Complex::new(0.0, 0.0); w];
        for row in 0..h {
            for col in 0..w {
                row_data[col] = work[[row, col]];
            }
            row_fft.process(&mut row_data);
            for col in 0..w {
                work[[row, col]] = row_data[col];
            }
        }

        // Column-wise FFT
        let mut col_data = vec![Complex::new(0.0, 0.0); h];
        for col in 0..w {
            for row in 0..h {
                col_data[row] = work[[row, col]];
            }
            col_fft.process(&mut col_data);
            for row in 0..h {
                work[[row, col]] = col_data[row];
            }
        }
    }

    /// Circular convolution of `data` with a kernel whose spectrum is `otf`.
    pub fn convolve(&self, data: &Array2<f64>, otf: &Array2<Complex<f64>>) -> Array2<f64> {
        let mut spectrum = self.forward(data);
        spectrum.zip_mut_with(otf, |s, &k| *s *= k);
        self.inverse(&spectrum)
    }
}

/// Zero-pad `kernel` to `dim` with its centre sample moved to index (0, 0)
/// and the remaining taps wrapped around the edges (FFT-ready layout).
pub fn embed_kernel(kernel: &Array2<f32>, dim: (usize, usize)) -> Array2<f64> {
    let (h, w) = dim;
    let (kh, kw) = kernel.dim();
    let (cy, cx) = (kh / 2, kw / 2);
    let mut out = Array2::<f64>::zeros((h, w));

    for ((r, c), &v) in kernel.indexed_iter() {
        let row = (r + h - cy % h) % h;
        let col = (c + w - cx % w) % w;
        out[[row, col]] += v as f64;
    }
    out
}

/// Frequency response (optical transfer function) of `psf` on a `dim` grid.
pub fn psf_transfer(plan: &SpectralPlan, psf: &Psf) -> Array2<Complex<f64>> {
    plan.forward(&embed_kernel(psf.kernel(), plan.dim()))
}

/// Map an out-of-range index back into `0..n` by mirroring about the edge
/// samples without repeating them (`dcb|abcd|cba`).
pub fn reflect_index(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let mut i = i.rem_euclid(period);
    if i >= n as isize {
        i = period - i;
    }
    i as usize
}

/// Extend `data` by `pad = (rows, cols)` on every side using reflect-101
/// borders.
///
/// Circular convolution on the padded grid, cropped back with [`crop`],
/// equals spatial reflect-101 convolution for any kernel whose radius is at
/// most `pad`.
pub fn pad_reflect<T: Copy + Into<f64>>(data: &Array2<T>, pad: (usize, usize)) -> Array2<f64> {
    let (h, w) = data.dim();
    let (py, px) = pad;
    Array2::from_shape_fn((h + 2 * py, w + 2 * px), |(r, c)| {
        let sr = reflect_index(r as isize - py as isize, h);
        let sc = reflect_index(c as isize - px as isize, w);
        data[[sr, sc]].into()
    })
}

/// Undo `pad_reflect`: take the `dim`-sized window starting at `pad`.
pub fn crop(data: &Array2<f64>, pad: (usize, usize), dim: (usize, usize)) -> Array2<f64> {
    let (py, px) = pad;
    data.slice(s![py..py + dim.0, px..px + dim.1]).to_owned()
}

/// One full period of the reflect-101 extension of `data`: shape
/// `(2(h-1), 2(w-1))`, with `data` in the top-left corner.
///
/// Tiled, the result has no seam, so the FFT sees the same image as a
/// spatial filter with reflect-101 borders.
pub fn mirror_extend(data: &Array2<f32>) -> Array2<f64> {
    let (h, w) = data.dim();
    Array2::from_shape_fn((mirror_period(h), mirror_period(w)), |(r, c)| {
        data[[reflect_index(r as isize, h), reflect_index(c as isize, w)]] as f64
    })
}

fn mirror_period(n: usize) -> usize {
    if n > 1 {
        2 * (n - 1)
    } else {
        1
    }
}
