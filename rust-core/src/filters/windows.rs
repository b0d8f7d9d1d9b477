//! Window functions for FIR filter design
//!
//! Every window is evaluated over `length + 1` points using `i / length` as the
//! normalized phase, so the sequence is symmetric about `length / 2`.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{tap_count, try_filled, DspError};

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowKind {
    /// Hanning window: w[i] = 0.5 - 0.5*cos(2πi/L)
    Hanning,

    /// Hamming window: w[i] = 0.54 - 0.46*cos(2πi/L)
    Hamming,

    /// Blackman window (α = 0.16):
    /// w[i] = (1-α)/2 - 0.5*cos(2πi/L) + α/2*cos(4πi/L)
    Blackman,

    /// 4-term Blackman-Harris window:
    /// w[i] = a0 - a1*cos(2πi/L) + a2*cos(4πi/L) - a3*cos(6πi/L)
    BlackmanHarris,
}

impl WindowKind {
    pub const ALL: [WindowKind; 4] = [
        WindowKind::Hanning,
        WindowKind::Hamming,
        WindowKind::Blackman,
        WindowKind::BlackmanHarris,
    ];

    /// Decode the numeric window code used by the sensor configuration
    /// (0: Hanning, 1: Hamming, 2: Blackman, 3: Blackman-Harris)
    pub fn from_code(code: i32) -> Result<Self, DspError> {
        match code {
            0 => Ok(WindowKind::Hanning),
            1 => Ok(WindowKind::Hamming),
            2 => Ok(WindowKind::Blackman),
            3 => Ok(WindowKind::BlackmanHarris),
            other => Err(DspError::UnsupportedWindowKind(format!("code {other}"))),
        }
    }

    /// Numeric code of this window kind
    pub fn code(&self) -> i32 {
        match self {
            WindowKind::Hanning => 0,
            WindowKind::Hamming => 1,
            WindowKind::Blackman => 2,
            WindowKind::BlackmanHarris => 3,
        }
    }

    /// Evaluate the window at normalized phase `x = i / L`
    #[inline]
    fn value_at(&self, x: f64) -> f64 {
        let c1 = (2.0 * PI * x).cos();
        match self {
            WindowKind::Hanning => 0.5 - 0.5 * c1,
            WindowKind::Hamming => 0.54 - 0.46 * c1,
            WindowKind::Blackman => {
                let alpha = 0.16;
                let a0 = (1.0 - alpha) / 2.0;
                let a1 = 0.5;
                let a2 = alpha / 2.0;
                a0 - a1 * c1 + a2 * (4.0 * PI * x).cos()
            }
            WindowKind::BlackmanHarris => {
                let a0 = 0.35875;
                let a1 = 0.48829;
                let a2 = 0.14128;
                let a3 = 0.01168;
                a0 - a1 * c1 + a2 * (4.0 * PI * x).cos() - a3 * (6.0 * PI * x).cos()
            }
        }
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowKind::Hanning => "hanning",
            WindowKind::Hamming => "hamming",
            WindowKind::Blackman => "blackman",
            WindowKind::BlackmanHarris => "blackman-harris",
        };
        f.write_str(name)
    }
}

impl FromStr for WindowKind {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hanning" | "hann" => Ok(WindowKind::Hanning),
            "hamming" => Ok(WindowKind::Hamming),
            "blackman" => Ok(WindowKind::Blackman),
            "blackman-harris" | "blackmanharris" => Ok(WindowKind::BlackmanHarris),
            _ => Err(DspError::UnsupportedWindowKind(s.to_string())),
        }
    }
}

/// Generate window coefficients
///
/// # Arguments
/// * `kind` - Window family
/// * `length` - Filter order L (must be at least 1)
///
/// # Returns
/// `length + 1` coefficients w[i] for i = 0..=L
pub fn generate_window(kind: WindowKind, length: usize) -> Result<Vec<f64>, DspError> {
    if length == 0 {
        return Err(DspError::InvalidLength {
            length,
            reason: "window order must be at least 1",
        });
    }

    let mut window = try_filled(tap_count(length)?, 0.0)?;
    let l = length as f64;
    for (i, w) in window.iter_mut().enumerate() {
        *w = kind.value_at(i as f64 / l);
    }

    Ok(window)
}
