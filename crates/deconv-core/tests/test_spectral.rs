use ndarray::{array, Array2};

use deconv_core::filters::convolve::{box_filter, convolve2d};
use deconv_core::psf::Psf;
use deconv_core::spectral::{
    crop, embed_kernel, mirror_extend, pad_reflect, psf_transfer, reflect_index, SpectralPlan,
};

// ---------------------------------------------------------------------------
// Reflect-101 indexing and padding
// ---------------------------------------------------------------------------

#[test]
fn test_reflect_index_mirrors_without_repeating_edge() {
    // dcb|abcd|cba
    assert_eq!(reflect_index(-1, 4), 1);
    assert_eq!(reflect_index(-2, 4), 2);
    assert_eq!(reflect_index(-3, 4), 3);
    assert_eq!(reflect_index(0, 4), 0);
    assert_eq!(reflect_index(3, 4), 3);
    assert_eq!(reflect_index(4, 4), 2);
    assert_eq!(reflect_index(5, 4), 1);
}

#[test]
fn test_reflect_index_handles_far_and_degenerate_cases() {
    assert_eq!(reflect_index(-7, 1), 0);
    assert_eq!(reflect_index(12, 1), 0);
    // Period of 6 for n = 4.
    assert_eq!(reflect_index(7, 4), 1);
    assert_eq!(reflect_index(-6, 4), 0);
}

#[test]
fn test_pad_then_crop_is_identity() {
    let data = Array2::from_shape_fn((5, 7), |(r, c)| (r * 7 + c) as f32 / 35.0);
    let padded = pad_reflect(&data, (2, 3));
    assert_eq!(padded.dim(), (9, 13));

    let back = crop(&padded, (2, 3), data.dim());
    assert_eq!(back, data.mapv(f64::from));
}

#[test]
fn test_pad_reflect_borders() {
    let data = array![[1.0f32, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let padded = pad_reflect(&data, (1, 1));
    // Top-left corner mirrors (1, 1) of the source.
    assert_eq!(padded[[0, 0]], 5.0);
    assert_eq!(padded[[1, 0]], 2.0);
    assert_eq!(padded[[1, 4]], 2.0);
    assert_eq!(padded[[3, 1]], 1.0);
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

#[test]
fn test_embed_kernel_moves_centre_to_origin() {
    let kernel = array![[0.0f32, 0.0, 0.0], [0.0, 1.0, 2.0], [0.0, 0.0, 0.0]];
    let embedded = embed_kernel(&kernel, (6, 8));
    assert_eq!(embedded[[0, 0]], 1.0);
    assert_eq!(embedded[[0, 1]], 2.0);
    assert_eq!(embedded.sum(), 3.0);
}

#[test]
fn test_forward_then_inverse_recovers_data() {
    let plan = SpectralPlan::new(6, 10);
    let data = Array2::from_shape_fn((6, 10), |(r, c)| ((r * 3 + c * 7) % 11) as f64);
    let back = plan.inverse(&plan.forward(&data));
    for (a, b) in data.iter().zip(back.iter()) {
        assert!((a - b).abs() < 1e-9, "{a} vs {b}");
    }
}

#[test]
fn test_normalized_psf_has_unit_dc_gain() {
    let psf = Psf::gaussian(7, 1.5).unwrap();
    let plan = SpectralPlan::new(20, 24);
    let otf = psf_transfer(&plan, &psf);
    assert!((otf[[0, 0]].re - 1.0).abs() < 1e-6);
    assert!(otf[[0, 0]].im.abs() < 1e-9);
}

#[test]
fn test_spatial_and_spectral_convolution_agree() {
    // Asymmetric kernel on an impulse away from the borders: both paths
    // must shift the impulse the same way.
    let kernel = array![[1.0f32, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
    let mut impulse = Array2::<f32>::zeros((12, 12));
    impulse[[5, 5]] = 1.0;

    let spatial = convolve2d(&impulse, &kernel);
    assert_eq!(spatial[[4, 4]], 1.0);
    assert_eq!(spatial.sum(), 1.0);

    let psf = Psf::new(kernel).unwrap();
    let plan = SpectralPlan::new(12, 12);
    let otf = psf_transfer(&plan, &psf);
    let spectral = plan.convolve(&impulse.mapv(|v| v as f64), &otf);

    for ((idx, &s), &f) in spatial.indexed_iter().zip(spectral.iter()) {
        assert!((s as f64 - f).abs() < 1e-9, "mismatch at {idx:?}: {s} vs {f}");
    }
}

#[test]
fn test_mirror_extend_is_one_reflect_period() {
    let data = Array2::from_shape_fn((4, 5), |(r, c)| (r * 5 + c) as f32);
    let ext = mirror_extend(&data);
    assert_eq!(ext.dim(), (6, 8));
    assert_eq!(crop(&ext, (0, 0), (4, 5)), data.mapv(f64::from));
    // Row 4 mirrors row 2, column 6 mirrors column 2.
    assert_eq!(ext[[4, 0]], data[[2, 0]] as f64);
    assert_eq!(ext[[0, 6]], data[[0, 2]] as f64);
}

#[test]
fn test_mirror_extend_single_pixel() {
    let data = Array2::from_elem((1, 1), 0.5f32);
    assert_eq!(mirror_extend(&data).dim(), (1, 1));
}

#[test]
fn test_mirror_extended_spectrum_matches_spatial_borders() {
    // Content that differs at opposite edges; circular convolution of the
    // mirror extension must equal reflect-101 spatial convolution
    // everywhere, borders included.
    let data = Array2::from_shape_fn((9, 13), |(r, c)| (c as f32 * 0.07) + (r * r) as f32 * 0.01);
    let kernel = array![[0.0f32, 1.0, 0.0], [2.0, 3.0, 0.0], [0.0, 0.0, 1.0]];
    let psf = Psf::new(kernel).unwrap();

    let ext = mirror_extend(&data);
    let plan = SpectralPlan::new(ext.nrows(), ext.ncols());
    let spectral = crop(&plan.convolve(&ext, &psf_transfer(&plan, &psf)), (0, 0), data.dim());
    let spatial = convolve2d(&data, psf.kernel());

    for ((idx, &s), &f) in spatial.indexed_iter().zip(spectral.iter()) {
        assert!((s as f64 - f).abs() < 1e-5, "mismatch at {idx:?}: {s} vs {f}");
    }
}

#[test]
fn test_padded_spectrum_matches_spatial_borders() {
    let data = Array2::from_shape_fn((10, 12), |(r, c)| 25.0 + 3.0 * c as f32 + r as f32);
    let psf = Psf::gaussian(5, 1.0).unwrap();
    let pad = psf.radius();

    let padded = pad_reflect(&data, pad);
    let plan = SpectralPlan::new(padded.nrows(), padded.ncols());
    let spectral = crop(&plan.convolve(&padded, &psf_transfer(&plan, &psf)), pad, data.dim());
    let spatial = convolve2d(&data, psf.kernel());

    for ((idx, &s), &f) in spatial.indexed_iter().zip(spectral.iter()) {
        assert!((s as f64 - f).abs() < 1e-3, "mismatch at {idx:?}: {s} vs {f}");
    }
}

// ---------------------------------------------------------------------------
// Spatial filters
// ---------------------------------------------------------------------------

#[test]
fn test_box_filter_preserves_flat_image() {
    let data = Array2::from_elem((9, 11), 0.4f32);
    let out = box_filter(&data, 5);
    assert!(out.iter().all(|&v| (v - 0.4).abs() < 1e-6));
}

#[test]
fn test_box_filter_averages_neighbourhood() {
    let mut data = Array2::<f32>::zeros((7, 7));
    data[[3, 3]] = 9.0;
    let out = box_filter(&data, 3);
    assert!((out[[3, 3]] - 1.0).abs() < 1e-6);
    assert!((out[[2, 4]] - 1.0).abs() < 1e-6);
    assert!(out[[0, 0]].abs() < 1e-6);
}

#[test]
fn test_convolve2d_keeps_shape() {
    let data = Array2::from_elem((5, 8), 1.0f32);
    let kernel = Array2::from_elem((3, 3), 1.0 / 9.0);
    let out = convolve2d(&data, &kernel);
    assert_eq!(out.dim(), (5, 8));
    assert!(out.iter().all(|&v| (v - 1.0).abs() < 1e-6));
}
