use ndarray::{array, Array2};

use deconv_core::error::DeconvError;
use deconv_core::psf::{Psf, PsfModel};

// ---------------------------------------------------------------------------
// Construction and validation
// ---------------------------------------------------------------------------

#[test]
fn test_new_normalizes_to_unit_sum() {
    let psf = Psf::new(array![[1.0, 2.0, 1.0], [2.0, 4.0, 2.0], [1.0, 2.0, 1.0]]).unwrap();
    let sum: f32 = psf.kernel().iter().sum();
    assert!((sum - 1.0).abs() < 1e-6, "sum = {sum}");
    assert!((psf.kernel()[[1, 1]] - 0.25).abs() < 1e-6);
}

#[test]
fn test_even_dimensions_rejected() {
    let result = Psf::new(Array2::from_elem((4, 3), 1.0));
    assert!(matches!(result, Err(DeconvError::InvalidInput(_))));
    assert!(matches!(Psf::uniform(4), Err(DeconvError::InvalidInput(_))));
}

#[test]
fn test_negative_weights_rejected() {
    let result = Psf::new(array![[0.0, -0.1, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);
    assert!(matches!(result, Err(DeconvError::InvalidInput(_))));
}

#[test]
fn test_zero_kernel_rejected() {
    let result = Psf::new(Array2::zeros((3, 3)));
    assert!(matches!(result, Err(DeconvError::InvalidInput(_))));
}

#[test]
fn test_non_finite_weights_rejected() {
    let result = Psf::new(array![[f32::NAN]]);
    assert!(matches!(result, Err(DeconvError::InvalidInput(_))));
}

#[test]
fn test_empty_kernel_rejected() {
    assert!(matches!(Psf::uniform(0), Err(DeconvError::InvalidInput(_))));
}

#[test]
fn test_uniform_weights_are_equal() {
    let psf = Psf::uniform(5).unwrap();
    assert_eq!(psf.dim(), (5, 5));
    for &v in psf.kernel().iter() {
        assert!((v - 1.0 / 25.0).abs() < 1e-7);
    }
}

// ---------------------------------------------------------------------------
// Gaussian
// ---------------------------------------------------------------------------

#[test]
fn test_gaussian_sums_to_one_with_peak_at_centre() {
    let psf = Psf::gaussian(15, 5.0).unwrap();
    let sum: f32 = psf.kernel().iter().sum();
    assert!((sum - 1.0).abs() < 1e-5, "sum = {sum}");

    let max_val = psf.kernel().iter().cloned().fold(f32::MIN, f32::max);
    assert!((psf.kernel()[[7, 7]] - max_val).abs() < 1e-9);
}

#[test]
fn test_gaussian_is_symmetric() {
    let psf = Psf::gaussian(9, 1.5).unwrap();
    let k = psf.kernel();
    for r in 0..9 {
        for c in 0..9 {
            assert!((k[[r, c]] - k[[8 - r, 8 - c]]).abs() < 1e-7);
            assert!((k[[r, c]] - k[[c, r]]).abs() < 1e-7);
        }
    }
}

#[test]
fn test_gaussian_non_positive_sigma_derived_from_size() {
    // sigma = 0.3 * ((5 - 1) / 2 - 1) + 0.8 = 1.1
    let derived = Psf::gaussian(5, 0.0).unwrap();
    let explicit = Psf::gaussian(5, 1.1).unwrap();
    for (a, b) in derived.kernel().iter().zip(explicit.kernel().iter()) {
        assert!((a - b).abs() < 1e-6);
    }
}

// ---------------------------------------------------------------------------
// Airy
// ---------------------------------------------------------------------------

#[test]
fn test_airy_non_negative_with_peak_at_centre() {
    let psf = Psf::airy(11, 2.5).unwrap();
    assert!(psf.kernel().iter().all(|&v| v >= 0.0));
    let max_val = psf.kernel().iter().cloned().fold(f32::MIN, f32::max);
    assert!((psf.kernel()[[5, 5]] - max_val).abs() < 1e-9);
    let sum: f32 = psf.kernel().iter().sum();
    assert!((sum - 1.0).abs() < 1e-5);
}

#[test]
fn test_airy_rejects_non_positive_radius() {
    assert!(matches!(Psf::airy(5, 0.0), Err(DeconvError::InvalidInput(_))));
    assert!(matches!(Psf::airy(5, -1.0), Err(DeconvError::InvalidInput(_))));
}

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

#[test]
fn test_mirrored_flips_both_axes() {
    let psf = Psf::new(array![[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 3.0]]).unwrap();
    let m = psf.mirrored();
    assert!((m.kernel()[[0, 0]] - 0.75).abs() < 1e-7);
    assert!((m.kernel()[[2, 2]] - 0.25).abs() < 1e-7);
}

#[test]
fn test_radius_is_half_size() {
    let psf = Psf::new(Array2::from_elem((3, 7), 1.0)).unwrap();
    assert_eq!(psf.radius(), (1, 3));
}

#[test]
fn test_ensure_fits_rejects_larger_psf() {
    let psf = Psf::uniform(7).unwrap();
    assert!(psf.ensure_fits((7, 7)).is_ok());
    assert!(matches!(psf.ensure_fits((6, 20)), Err(DeconvError::InvalidInput(_))));
    assert!(matches!(psf.ensure_fits((20, 6)), Err(DeconvError::InvalidInput(_))));
}

// ---------------------------------------------------------------------------
// PsfModel
// ---------------------------------------------------------------------------

#[test]
fn test_model_builds_matching_shapes() {
    let psf = PsfModel::Uniform { size: 3 }.build().unwrap();
    assert_eq!(psf.dim(), (3, 3));
    let psf = PsfModel::Gaussian { size: 7, sigma: 1.0 }.build().unwrap();
    assert_eq!(psf.dim(), (7, 7));
    let psf = PsfModel::Airy { size: 9, radius: 2.0 }.build().unwrap();
    assert_eq!(psf.dim(), (9, 9));
}

#[test]
fn test_model_default_is_reference_blur() {
    assert_eq!(
        PsfModel::default(),
        PsfModel::Gaussian {
            size: 15,
            sigma: 5.0
        }
    );
    assert_eq!(PsfModel::default().size(), 15);
}

#[test]
fn test_model_display() {
    assert_eq!(format!("{}", PsfModel::Uniform { size: 5 }), "Uniform 5x5");
    assert_eq!(
        format!("{}", PsfModel::Gaussian { size: 15, sigma: 5.0 }),
        "Gaussian 15x15, sigma 5"
    );
}
