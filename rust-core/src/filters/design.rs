//! FIR filter design using the windowing method
//!
//! The ideal (sinc-family) impulse response is sampled over L+1 taps centered
//! on M = L/2 and multiplied by a window. The removable singularity at the
//! center tap is handled by the closed-form limit for each band type.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use log::debug;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::windows::{generate_window, WindowKind};
use crate::error::{tap_count, try_filled, DspError};

/// Filter band types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BandType {
    LowPass,
    HighPass,
    BandPass,
}

impl BandType {
    pub const ALL: [BandType; 3] = [BandType::LowPass, BandType::HighPass, BandType::BandPass];

    /// Decode the numeric band code (0: low-pass, 1: high-pass, 2: band-pass)
    pub fn from_code(code: i32) -> Result<Self, DspError> {
        match code {
            0 => Ok(BandType::LowPass),
            1 => Ok(BandType::HighPass),
            2 => Ok(BandType::BandPass),
            other => Err(DspError::UnsupportedBandType(format!("code {other}"))),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            BandType::LowPass => 0,
            BandType::HighPass => 1,
            BandType::BandPass => 2,
        }
    }
}

impl fmt::Display for BandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BandType::LowPass => "low-pass",
            BandType::HighPass => "high-pass",
            BandType::BandPass => "band-pass",
        };
        f.write_str(name)
    }
}

impl FromStr for BandType {
    type Err = DspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low-pass" | "lowpass" => Ok(BandType::LowPass),
            "high-pass" | "highpass" => Ok(BandType::HighPass),
            "band-pass" | "bandpass" => Ok(BandType::BandPass),
            _ => Err(DspError::UnsupportedBandType(s.to_string())),
        }
    }
}

/// Which branch ordering the high-pass ideal response uses
///
/// `AsDocumented` assigns `1 - ω1/π` to every tap except the center and the
/// (limit of the) negated sinc to the center tap. `SpectralInversion` is the
/// textbook `δ[n] - lowpass[n]` form with the two branches swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighPassForm {
    #[default]
    AsDocumented,
    SpectralInversion,
}

/// Filter design parameters in physical units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDesign {
    /// Lower cutoff in Hz (the only cutoff for low-pass and high-pass)
    pub low_cutoff_hz: f64,

    /// Upper cutoff in Hz (band-pass only)
    pub high_cutoff_hz: f64,

    /// Sample rate in Hz
    pub sample_rate_hz: f64,

    pub window: WindowKind,

    pub band: BandType,

    /// Filter order L; the filter has L+1 taps
    pub order: usize,

    #[serde(default)]
    pub high_pass_form: HighPassForm,
}

impl FilterDesign {
    /// Synthesize the coefficients described by these parameters
    pub fn design(&self) -> Result<FirCoefficients, DspError> {
        design_fir_with(
            self.low_cutoff_hz,
            self.high_cutoff_hz,
            self.sample_rate_hz,
            self.window,
            self.band,
            self.order,
            self.high_pass_form,
        )
    }

    /// Normalized angular cutoffs (ω1, ω2) in rad/sample
    pub fn angular_cutoffs(&self) -> (f64, f64) {
        (
            2.0 * PI * self.low_cutoff_hz / self.sample_rate_hz,
            2.0 * PI * self.high_cutoff_hz / self.sample_rate_hz,
        )
    }
}

/// Immutable set of FIR taps h[0..=L]
#[derive(Debug, Clone, PartialEq)]
pub struct FirCoefficients {
    taps: Vec<f64>,
}

impl FirCoefficients {
    /// Wrap externally supplied taps
    pub fn from_taps(taps: Vec<f64>) -> Self {
        Self { taps }
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    /// Number of taps (L+1)
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Filter order L
    pub fn order(&self) -> usize {
        self.taps.len().saturating_sub(1)
    }

    /// Center tap index M = L/2
    pub fn center(&self) -> usize {
        self.order() / 2
    }

    /// Gain at DC (sum of all taps)
    pub fn dc_gain(&self) -> f64 {
        self.taps.iter().sum()
    }

    /// Complex frequency response H(e^jω) at angular frequencies in rad/sample
    pub fn frequency_response(&self, omegas: &[f64]) -> Vec<Complex64> {
        omegas
            .iter()
            .map(|&omega| {
                self.taps
                    .iter()
                    .enumerate()
                    .fold(Complex64::new(0.0, 0.0), |acc, (n, &h)| {
                        acc + h * Complex64::from_polar(1.0, -omega * n as f64)
                    })
            })
            .collect()
    }

    /// Magnitude response in dB at angular frequencies in rad/sample
    pub fn magnitude_response_db(&self, omegas: &[f64]) -> Vec<f64> {
        self.frequency_response(omegas)
            .iter()
            .map(|h| 20.0 * h.norm().max(1e-12).log10())
            .collect()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.taps
    }
}

impl AsRef<[f64]> for FirCoefficients {
    fn as_ref(&self) -> &[f64] {
        &self.taps
    }
}

/// sin(ω·k) / (π·k) for k ≠ 0
#[inline]
fn sinc_term(omega: f64, k: f64) -> f64 {
    (omega * k).sin() / (PI * k)
}

/// Design a windowed-sinc FIR filter
///
/// # Arguments
/// * `low_cutoff_hz` - Cutoff for low/high-pass, lower edge for band-pass
/// * `high_cutoff_hz` - Upper edge for band-pass (ignored otherwise)
/// * `sample_rate_hz` - Sample rate
/// * `window` - Window family
/// * `band` - Band type
/// * `length` - Filter order L
///
/// # Returns
/// L+1 coefficients, or the configuration error that prevented the design
pub fn design_fir(
    low_cutoff_hz: f64,
    high_cutoff_hz: f64,
    sample_rate_hz: f64,
    window: WindowKind,
    band: BandType,
    length: usize,
) -> Result<FirCoefficients, DspError> {
    design_fir_with(
        low_cutoff_hz,
        high_cutoff_hz,
        sample_rate_hz,
        window,
        band,
        length,
        HighPassForm::default(),
    )
}

/// Design from raw window/band codes, as stored by the sensor configuration
pub fn design_fir_from_codes(
    low_cutoff_hz: f64,
    high_cutoff_hz: f64,
    sample_rate_hz: f64,
    window_code: i32,
    band_code: i32,
    length: usize,
) -> Result<FirCoefficients, DspError> {
    let window = WindowKind::from_code(window_code)
        .map_err(|e| DspError::WindowGenerationFailed(Box::new(e)))?;
    let band = BandType::from_code(band_code)?;
    design_fir(low_cutoff_hz, high_cutoff_hz, sample_rate_hz, window, band, length)
}

/// Design a windowed-sinc FIR filter with an explicit high-pass branch ordering
pub fn design_fir_with(
    low_cutoff_hz: f64,
    high_cutoff_hz: f64,
    sample_rate_hz: f64,
    window: WindowKind,
    band: BandType,
    length: usize,
    high_pass_form: HighPassForm,
) -> Result<FirCoefficients, DspError> {
    if !(sample_rate_hz.is_finite() && sample_rate_hz > 0.0) {
        return Err(DspError::InvalidParameter {
            name: "sample_rate_hz",
            reason: format!("must be positive and finite, got {sample_rate_hz}"),
        });
    }
    for (name, value) in [("low_cutoff_hz", low_cutoff_hz), ("high_cutoff_hz", high_cutoff_hz)] {
        if !value.is_finite() {
            return Err(DspError::InvalidParameter {
                name,
                reason: format!("must be finite, got {value}"),
            });
        }
    }

    let w = generate_window(window, length)
        .map_err(|e| DspError::WindowGenerationFailed(Box::new(e)))?;

    let omega1 = 2.0 * PI * low_cutoff_hz / sample_rate_hz;
    let omega2 = 2.0 * PI * high_cutoff_hz / sample_rate_hz;
    let m = length / 2;

    let mut taps = try_filled(tap_count(length)?, 0.0)?;
    for (i, tap) in taps.iter_mut().enumerate() {
        let k = i as f64 - m as f64;
        let at_center = i == m;

        let hd = match band {
            BandType::LowPass => {
                if at_center {
                    omega1 / PI
                } else {
                    sinc_term(omega1, k)
                }
            }
            BandType::HighPass => match (high_pass_form, at_center) {
                // -sin(ω1·k)/(π·k) at k = 0, taken at its limit
                (HighPassForm::AsDocumented, true) => -omega1 / PI,
                (HighPassForm::AsDocumented, false) => 1.0 - omega1 / PI,
                (HighPassForm::SpectralInversion, true) => 1.0 - omega1 / PI,
                (HighPassForm::SpectralInversion, false) => -sinc_term(omega1, k),
            },
            BandType::BandPass => {
                if at_center {
                    (omega2 - omega1) / PI
                } else {
                    sinc_term(omega2, k) - sinc_term(omega1, k)
                }
            }
        };

        *tap = w[i] * hd;
    }

    debug!(
        "designed {band} FIR: {} taps, {window} window, ω1 = {omega1:.6}, ω2 = {omega2:.6}",
        taps.len()
    );

    Ok(FirCoefficients { taps })
}
