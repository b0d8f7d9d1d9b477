//! Per-channel real FFT engine
//!
//! Each channel owns a length-N input buffer, a forward real-to-complex plan
//! and a length-N/2+1 half-spectrum. Plans are created once at construction
//! and the buffers they run against are never reallocated afterwards: callers
//! only ever see fixed-length slices.

use std::sync::Arc;

use log::debug;
use ndarray::Array2;
use num_complex::Complex64;
use realfft::{RealFftPlanner, RealToComplex};

use super::analysis::PowerSpectrum;
use crate::error::{try_filled, DspError};
use crate::filters::shift::{shift_in, ShiftDirection};
use crate::Frame;

/// Buffers and plan bound to one channel
struct ChannelTransform {
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Time-domain samples, oldest first
    input: Vec<f64>,

    /// Copy of `input` handed to the transform, which overwrites its input
    work: Vec<f64>,

    /// Half-spectrum of the last execution
    output: Vec<Complex64>,

    scratch: Vec<Complex64>,
}

impl ChannelTransform {
    fn new(r2c: Arc<dyn RealToComplex<f64>>) -> Result<Self, DspError> {
        let fft_size = r2c.len();
        Ok(Self {
            input: try_filled(fft_size, 0.0)?,
            work: try_filled(fft_size, 0.0)?,
            output: try_filled(fft_size / 2 + 1, Complex64::new(0.0, 0.0))?,
            scratch: try_filled(r2c.get_scratch_len(), Complex64::new(0.0, 0.0))?,
            r2c,
        })
    }

    fn execute(&mut self, channel: usize) -> Result<(), DspError> {
        self.work.copy_from_slice(&self.input);
        self.r2c
            .process_with_scratch(&mut self.work, &mut self.output, &mut self.scratch)
            .map_err(|source| DspError::TransformExecutionFailed { channel, source })
    }
}

/// FFT-based magnitude analyzer for `C` parallel channels
pub struct SpectralAnalyzer<const C: usize> {
    fft_size: usize,
    channels: Vec<ChannelTransform>,
}

impl<const C: usize> SpectralAnalyzer<C> {
    /// Allocate the per-channel buffers and plan one forward transform each
    ///
    /// # Arguments
    /// * `fft_size` - Transform length N (at least 2)
    ///
    /// # Errors
    /// `AllocationFailed` if a buffer cannot be allocated or N is too short
    /// to plan a transform for.
    pub fn new(fft_size: usize) -> Result<Self, DspError> {
        if fft_size < 2 {
            return Err(DspError::AllocationFailed(format!(
                "cannot plan a real FFT of length {fft_size}"
            )));
        }

        let mut planner = RealFftPlanner::<f64>::new();
        let mut channels = Vec::new();
        channels
            .try_reserve_exact(C)
            .map_err(|e| DspError::AllocationFailed(format!("{C} channel transforms: {e}")))?;
        for _ in 0..C {
            channels.push(ChannelTransform::new(planner.plan_fft_forward(fft_size))?);
        }

        debug!("planned {C} forward real FFTs of length {fft_size}");

        Ok(Self { fft_size, channels })
    }

    /// Transform length N
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of bins in the half-spectrum (N/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Current input samples of `channel`
    ///
    /// # Panics
    /// If `channel >= C`.
    pub fn input(&self, channel: usize) -> &[f64] {
        &self.channels[channel].input
    }

    /// Mutable view of the input buffer of `channel` for in-place filling
    ///
    /// # Panics
    /// If `channel >= C`.
    pub fn input_mut(&mut self, channel: usize) -> &mut [f64] {
        &mut self.channels[channel].input
    }

    /// Copy `samples` into the input buffer of `channel`, zero-padding when
    /// shorter than N and truncating when longer
    ///
    /// # Panics
    /// If `channel >= C`.
    pub fn load_channel(&mut self, channel: usize, samples: &[f64]) {
        let input = &mut self.channels[channel].input;
        let copy_len = samples.len().min(input.len());
        input[..copy_len].copy_from_slice(&samples[..copy_len]);
        input[copy_len..].fill(0.0);
    }

    /// Slide one frame into every channel's input: the oldest sample is
    /// dropped and the newest lands at the end of the buffer
    pub fn push_frame(&mut self, frame: Frame<C>) {
        for (transform, &sample) in self.channels.iter_mut().zip(frame.iter()) {
            shift_in(&mut transform.input, ShiftDirection::Forward, sample);
        }
    }

    /// Zero every input buffer
    pub fn clear(&mut self) {
        for transform in &mut self.channels {
            transform.input.fill(0.0);
        }
    }

    /// Half-spectrum produced for `channel` by the last computation
    ///
    /// # Panics
    /// If `channel >= C`.
    pub fn half_spectrum(&self, channel: usize) -> &[Complex64] {
        &self.channels[channel].output
    }

    /// Run every channel's transform and reduce to magnitudes
    ///
    /// # Returns
    /// (N/2+1) × C matrix of |X_c[k]|
    pub fn compute_magnitude_spectrum(&mut self) -> Result<PowerSpectrum, DspError> {
        for (channel, transform) in self.channels.iter_mut().enumerate() {
            transform.execute(channel)?;
        }

        let mut magnitudes = Array2::<f64>::zeros((self.num_bins(), C));
        for (channel, transform) in self.channels.iter().enumerate() {
            for (bin, value) in transform.output.iter().enumerate() {
                magnitudes[[bin, channel]] = (value.re * value.re + value.im * value.im).sqrt();
            }
        }

        Ok(PowerSpectrum::new(magnitudes, self.fft_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_zero_input_zero_spectrum() {
        let mut analyzer = SpectralAnalyzer::<3>::new(1024).unwrap();
        let spectrum = analyzer.compute_magnitude_spectrum().unwrap();

        assert_eq!(spectrum.num_bins(), 513);
        assert_eq!(spectrum.num_channels(), 3);
        assert!(spectrum.magnitudes().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_sine_peak_bin() {
        let fs = 200.0;
        let n = 1024;
        let mut analyzer = SpectralAnalyzer::<3>::new(n).unwrap();

        let freqs = [12.5, 31.0, 77.3];
        for (channel, &f0) in freqs.iter().enumerate() {
            let signal: Vec<f64> = (0..n)
                .map(|i| (2.0 * PI * f0 * i as f64 / fs).sin())
                .collect();
            analyzer.load_channel(channel, &signal);
        }

        let spectrum = analyzer.compute_magnitude_spectrum().unwrap();
        for (channel, &f0) in freqs.iter().enumerate() {
            let expected = (f0 * n as f64 / fs).round() as usize;
            assert_eq!(spectrum.dominant_bin(channel), Some(expected), "channel {channel}");
        }
    }

    #[test]
    fn test_bin_aligned_magnitude() {
        // A bin-centred sine of amplitude A has |X[k]| = A·N/2
        let n = 256;
        let mut analyzer = SpectralAnalyzer::<1>::new(n).unwrap();
        let signal: Vec<f64> = (0..n)
            .map(|i| 2.0 * (2.0 * PI * 16.0 * i as f64 / n as f64).cos())
            .collect();
        analyzer.load_channel(0, &signal);

        let spectrum = analyzer.compute_magnitude_spectrum().unwrap();
        assert!((spectrum.get(16, 0) - 256.0).abs() < 1e-9);
        assert!(spectrum.get(17, 0) < 1e-9);
    }

    #[test]
    fn test_dc_signal() {
        let mut analyzer = SpectralAnalyzer::<2>::new(64).unwrap();
        analyzer.load_channel(1, &[1.0; 10]);

        let spectrum = analyzer.compute_magnitude_spectrum().unwrap();
        assert!((spectrum.get(0, 1) - 10.0).abs() < 1e-12);
        assert!(spectrum.channel(0).iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_input_preserved_across_runs() {
        let mut analyzer = SpectralAnalyzer::<1>::new(32).unwrap();
        let signal: Vec<f64> = (0..32).map(|i| (i as f64 * 0.3).sin()).collect();
        analyzer.load_channel(0, &signal);

        let first = analyzer.compute_magnitude_spectrum().unwrap();
        assert_eq!(analyzer.input(0), &signal[..]);
        let second = analyzer.compute_magnitude_spectrum().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_push_frame_slides_window() {
        let mut analyzer = SpectralAnalyzer::<2>::new(4).unwrap();
        for n in 1..=5 {
            analyzer.push_frame([n as f64, 10.0 * n as f64]);
        }
        assert_eq!(analyzer.input(0), &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(analyzer.input(1), &[20.0, 30.0, 40.0, 50.0]);

        analyzer.clear();
        assert!(analyzer.input(1).iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_input_mut_fills_in_place() {
        let mut analyzer = SpectralAnalyzer::<1>::new(8).unwrap();
        analyzer.input_mut(0).fill(1.0);

        let spectrum = analyzer.compute_magnitude_spectrum().unwrap();
        assert!((spectrum.get(0, 0) - 8.0).abs() < 1e-12);
        assert_eq!(analyzer.half_spectrum(0).len(), 5);
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(matches!(
            SpectralAnalyzer::<3>::new(1),
            Err(DspError::AllocationFailed(_))
        ));
    }
}
