use clap::{Args, ValueEnum};
use deconv_core::consts::{DEFAULT_BLUR_SIGMA, DEFAULT_BLUR_SIZE};
use deconv_core::psf::PsfModel;

#[derive(Clone, Copy, ValueEnum)]
pub enum PsfShape {
    Gaussian,
    Uniform,
    Airy,
}

/// PSF selection shared by every command that blurs or restores.
#[derive(Args, Clone)]
pub struct PsfArgs {
    /// PSF shape
    #[arg(long, value_enum, default_value = "gaussian")]
    pub psf: PsfShape,

    /// PSF side length in pixels (odd)
    #[arg(long, default_value_t = DEFAULT_BLUR_SIZE)]
    pub psf_size: usize,

    /// Gaussian PSF sigma in pixels (<= 0 derives it from the size)
    #[arg(long, default_value_t = DEFAULT_BLUR_SIGMA)]
    pub psf_sigma: f32,

    /// Airy first dark ring radius in pixels
    #[arg(long, default_value = "2.5")]
    pub airy_radius: f32,
}

impl PsfArgs {
    pub fn model(&self) -> PsfModel {
        match self.psf {
            PsfShape::Gaussian => PsfModel::Gaussian {
                size: self.psf_size,
                sigma: self.psf_sigma,
            },
            PsfShape::Uniform => PsfModel::Uniform {
                size: self.psf_size,
            },
            PsfShape::Airy => PsfModel::Airy {
                size: self.psf_size,
                radius: self.airy_radius,
            },
        }
    }
}
