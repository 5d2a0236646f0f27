mod common;

use deconv_core::degrade::{add_gaussian_noise, blur, degrade, DegradationConfig, NoiseConfig};
use deconv_core::error::DeconvError;
use deconv_core::frame::Frame;
use deconv_core::psf::{Psf, PsfModel};

use common::{pattern_frame, square_frame};

#[test]
fn test_blur_preserves_flat_image() {
    let frame = Frame::filled(20, 20, 140);
    let psf = Psf::gaussian(7, 2.0).unwrap();
    assert_eq!(blur(&frame, &psf), frame);
}

#[test]
fn test_blur_softens_edges() {
    let frame = square_frame(32, 200);
    let psf = Psf::uniform(5).unwrap();
    let blurred = blur(&frame, &psf);
    // Pixel just outside the square picks up some brightness.
    assert!(blurred.data[[7, 16]] > frame.data[[7, 16]]);
    // Centre of the square is untouched.
    assert_eq!(blurred.data[[16, 16]], 200);
}

#[test]
fn test_seeded_noise_is_reproducible() {
    let frame = pattern_frame(24, 24);
    let config = NoiseConfig {
        seed: Some(42),
        ..NoiseConfig::default()
    };
    let a = add_gaussian_noise(&frame, &config).unwrap();
    let b = add_gaussian_noise(&frame, &config).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, frame);
}

#[test]
fn test_different_seeds_differ() {
    let frame = pattern_frame(24, 24);
    let a = add_gaussian_noise(&frame, &NoiseConfig { seed: Some(1), ..NoiseConfig::default() }).unwrap();
    let b = add_gaussian_noise(&frame, &NoiseConfig { seed: Some(2), ..NoiseConfig::default() }).unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_zero_std_dev_is_identity() {
    let frame = pattern_frame(16, 16);
    let config = NoiseConfig {
        std_dev: 0.0,
        seed: Some(7),
        ..NoiseConfig::default()
    };
    assert_eq!(add_gaussian_noise(&frame, &config).unwrap(), frame);
}

#[test]
fn test_noise_mean_shifts_intensities() {
    let frame = Frame::filled(16, 16, 100);
    let config = NoiseConfig {
        mean: 10.0,
        std_dev: 0.0,
        seed: Some(7),
    };
    let out = add_gaussian_noise(&frame, &config).unwrap();
    assert!(out.data.iter().all(|&v| v == 110));
}

#[test]
fn test_noise_saturates_at_bounds() {
    let frame = Frame::filled(8, 8, 250);
    let config = NoiseConfig {
        mean: 50.0,
        std_dev: 0.0,
        seed: Some(7),
    };
    let out = add_gaussian_noise(&frame, &config).unwrap();
    assert!(out.data.iter().all(|&v| v == 255));
}

#[test]
fn test_negative_std_dev_rejected() {
    let frame = Frame::filled(8, 8, 100);
    let config = NoiseConfig {
        std_dev: -1.0,
        ..NoiseConfig::default()
    };
    let result = add_gaussian_noise(&frame, &config);
    assert!(matches!(result, Err(DeconvError::InvalidInput(_))));
}

#[test]
fn test_degrade_keeps_intermediate_blur() {
    let frame = pattern_frame(40, 40);
    let config = DegradationConfig {
        blur: PsfModel::Gaussian { size: 7, sigma: 1.5 },
        noise: NoiseConfig {
            seed: Some(3),
            ..NoiseConfig::default()
        },
    };
    let degraded = degrade(&frame, &config).unwrap();
    assert_eq!(degraded.psf.dim(), (7, 7));
    assert_eq!(degraded.blurred, blur(&frame, &degraded.psf));
    assert_eq!(degraded.noisy.dim(), frame.dim());
    assert_ne!(degraded.noisy, degraded.blurred);
}

#[test]
fn test_degrade_rejects_psf_larger_than_image() {
    let frame = Frame::filled(10, 10, 100);
    let result = degrade(&frame, &DegradationConfig::default());
    assert!(matches!(result, Err(DeconvError::InvalidInput(_))));
}
