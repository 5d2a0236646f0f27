pub mod consts;
pub mod error;
pub mod frame;
pub mod psf;
pub mod spectral;
pub mod filters;
pub mod degrade;
pub mod deconvolution;
pub mod quality;
pub mod io;
pub mod pipeline;
