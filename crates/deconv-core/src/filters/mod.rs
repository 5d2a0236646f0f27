pub mod convolve;
