//! Spectral analysis with FFT

pub mod fft;
pub mod analysis;
pub mod reduce;

pub use fft::SpectralAnalyzer;
pub use analysis::PowerSpectrum;
pub use reduce::{pairwise_max, pairwise_min};
