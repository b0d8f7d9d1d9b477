//! Sensor DSP - Multi-channel FIR Filtering and Spectral Analysis
//!
//! Windowed-sinc FIR design, a streaming multi-channel convolution engine and
//! per-channel FFT magnitude spectra for sensor feeds.

pub mod config;
pub mod error;
pub mod filters;
pub mod signal;
pub mod spectrum;
pub mod stream;

/// One time-sample across `C` channels
pub type Frame<const C: usize> = [f64; C];

/// Channel count of the deployed sensor head
pub const SENSOR_CHANNELS: usize = 3;

pub use config::{ConfigError, ProcessingConfig};
pub use error::DspError;
pub use filters::{BandType, FirCoefficients, StreamingFilter, WindowKind};
pub use spectrum::{PowerSpectrum, SpectralAnalyzer};
pub use stream::SignalChain;
