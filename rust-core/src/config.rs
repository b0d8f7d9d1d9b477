//! Processing configuration
//!
//! A YAML document describing the filter design and the spectral analysis
//! window. Missing top-level keys fall back to the sensor defaults.
//!
//! ```yaml
//! filter:
//!   low_cutoff_hz: 0.001
//!   high_cutoff_hz: 0.0
//!   sample_rate_hz: 200.0
//!   window: blackman-harris
//!   band: low-pass
//!   order: 40
//! fft_size: 1024
//! queue_capacity: 4096
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DspError;
use crate::filters::{BandType, FilterDesign, HighPassForm, WindowKind};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] DspError),
}

/// Filter and spectrum settings for one sensor feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub filter: FilterDesign,

    /// Spectral analysis length N
    pub fft_size: usize,

    /// Frames buffered between acquisition and processing
    pub queue_capacity: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            filter: FilterDesign {
                low_cutoff_hz: 0.001,
                high_cutoff_hz: 0.0,
                sample_rate_hz: 200.0,
                window: WindowKind::BlackmanHarris,
                band: BandType::LowPass,
                order: 40,
                high_pass_form: HighPassForm::AsDocumented,
            },
            fft_size: 1024,
            queue_capacity: 4096,
        }
    }
}

impl ProcessingConfig {
    /// Load and validate a YAML configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("loading processing configuration from {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Check the settings before any buffer is built from them
    pub fn validate(&self) -> Result<(), DspError> {
        let filter = &self.filter;
        let fs = filter.sample_rate_hz;

        if !(fs.is_finite() && fs > 0.0) {
            return Err(invalid("sample_rate_hz", format!("must be positive, got {fs}")));
        }
        if filter.order == 0 {
            return Err(DspError::InvalidLength {
                length: 0,
                reason: "filter order must be at least 1",
            });
        }
        if self.fft_size < 2 {
            return Err(DspError::InvalidLength {
                length: self.fft_size,
                reason: "FFT size must be at least 2",
            });
        }
        if self.queue_capacity == 0 {
            return Err(DspError::InvalidLength {
                length: 0,
                reason: "queue capacity must be at least 1",
            });
        }

        let nyquist = fs / 2.0;
        let low = filter.low_cutoff_hz;
        if !(0.0..=nyquist).contains(&low) {
            return Err(invalid("low_cutoff_hz", format!("{low} outside [0, {nyquist}]")));
        }
        if filter.band == BandType::BandPass {
            let high = filter.high_cutoff_hz;
            if !(high > low && high <= nyquist) {
                return Err(invalid(
                    "high_cutoff_hz",
                    format!("{high} must lie in ({low}, {nyquist}] for band-pass"),
                ));
            }
        }

        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> DspError {
    DspError::InvalidParameter { name, reason }
}
