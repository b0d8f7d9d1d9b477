//! Streaming multi-channel FIR filter
//!
//! Direct-form convolution over a delay line of L+1 channel vectors. Every
//! channel is filtered independently with the same taps.

use super::design::FirCoefficients;
use super::shift::{shift_in, ShiftDirection};
use crate::error::{try_filled, DspError};
use crate::Frame;

/// Real-time FIR filter over `C` parallel channels
#[derive(Debug, Clone)]
pub struct StreamingFilter<const C: usize> {
    /// Filter taps h[0..=L]
    coefficients: FirCoefficients,

    /// Delay line, newest frame first: history[i] holds x[n - i]
    history: Vec<Frame<C>>,
}

impl<const C: usize> StreamingFilter<C> {
    /// Create a filter with a zeroed history
    ///
    /// # Errors
    /// `BufferPointerUnresolved` when `coefficients` is empty, as the history
    /// would have no storage to shift through.
    pub fn new(coefficients: FirCoefficients) -> Result<Self, DspError> {
        if coefficients.is_empty() {
            return Err(DspError::BufferPointerUnresolved);
        }
        let history = try_filled(coefficients.len(), [0.0; C])?;

        Ok(Self {
            coefficients,
            history,
        })
    }

    /// Filter one frame
    ///
    /// # Arguments
    /// * `frame` - Newest sample x[n] for every channel
    ///
    /// # Returns
    /// y[n] = Σ h[i]·x[n-i] per channel
    #[inline]
    pub fn process(&mut self, frame: Frame<C>) -> Frame<C> {
        shift_in(&mut self.history, ShiftDirection::Backward, frame);

        let mut output = [0.0; C];
        for (&h, sample) in self.coefficients.taps().iter().zip(&self.history) {
            for (acc, &x) in output.iter_mut().zip(sample) {
                *acc += h * x;
            }
        }
        output
    }

    /// Filter a block of frames
    pub fn process_block(&mut self, frames: &[Frame<C>]) -> Vec<Frame<C>> {
        frames.iter().map(|&frame| self.process(frame)).collect()
    }

    /// Filter a block in place
    pub fn process_block_inplace(&mut self, frames: &mut [Frame<C>]) {
        for frame in frames.iter_mut() {
            *frame = self.process(*frame);
        }
    }

    /// Clear the delay line
    pub fn reset(&mut self) {
        self.history.fill([0.0; C]);
    }

    /// Delay line contents, newest first
    pub fn history(&self) -> &[Frame<C>] {
        &self.history
    }

    pub fn coefficients(&self) -> &FirCoefficients {
        &self.coefficients
    }

    /// Number of taps (L+1)
    pub fn length(&self) -> usize {
        self.history.len()
    }

    /// Group delay of a symmetric (linear phase) filter
    pub fn group_delay_samples(&self) -> f64 {
        (self.length() - 1) as f64 / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::design::{design_fir, BandType};
    use crate::filters::windows::WindowKind;
    use crate::signal::impulse_frames;

    #[test]
    fn test_moving_average() {
        let coeffs = FirCoefficients::from_taps(vec![1.0 / 3.0; 3]);
        let mut filter = StreamingFilter::<2>::new(coeffs).unwrap();

        let out1 = filter.process([3.0, 6.0]);
        let out2 = filter.process([0.0, 0.0]);
        let out3 = filter.process([0.0, 0.0]);
        let out4 = filter.process([0.0, 0.0]);

        for out in [out1, out2, out3] {
            assert!((out[0] - 1.0).abs() < 1e-12);
            assert!((out[1] - 2.0).abs() < 1e-12);
        }
        assert_eq!(out4, [0.0, 0.0]);
    }

    #[test]
    fn test_impulse_response_recovery() {
        // Asymmetric taps so that any reversal would show up
        let taps = vec![0.5, -1.0, 2.0, 0.25, 4.0];
        let mut filter = StreamingFilter::<3>::new(FirCoefficients::from_taps(taps.clone())).unwrap();

        for _ in 0..taps.len() {
            assert_eq!(filter.process([0.0; 3]), [0.0; 3]);
        }

        let mut response = vec![filter.process([1.0, 0.0, 0.0])];
        for _ in 1..taps.len() {
            response.push(filter.process([0.0; 3]));
        }

        for (out, &h) in response.iter().zip(&taps) {
            assert_eq!(out[0], h);
            assert_eq!(out[1], 0.0);
            assert_eq!(out[2], 0.0);
        }
    }

    #[test]
    fn test_designed_impulse_response() {
        let coeffs = design_fir(5.0, 0.0, 200.0, WindowKind::BlackmanHarris, BandType::LowPass, 40)
            .unwrap();
        let mut filter = StreamingFilter::<3>::new(coeffs.clone()).unwrap();

        let output = filter.process_block(&impulse_frames::<3>(0, coeffs.len()));

        for (out, &h) in output.iter().zip(coeffs.taps()) {
            assert!((out[0] - h).abs() < 1e-15);
            assert_eq!(out[1], 0.0);
            assert_eq!(out[2], 0.0);
        }
    }

    #[test]
    fn test_history_bounded_newest_first() {
        let coeffs = FirCoefficients::from_taps(vec![1.0; 4]);
        let mut filter = StreamingFilter::<2>::new(coeffs).unwrap();

        for n in 0..10 {
            let frame = [n as f64, -(n as f64)];
            filter.process(frame);
            assert_eq!(filter.history().len(), 4);
            assert_eq!(filter.history()[0], frame);
        }
        assert_eq!(filter.history()[3], [6.0, -6.0]);
    }

    #[test]
    fn test_channels_independent() {
        let coeffs = FirCoefficients::from_taps(vec![0.5, 0.5]);
        let mut filter = StreamingFilter::<3>::new(coeffs).unwrap();

        let mut frames = vec![[1.0, 10.0, 100.0], [3.0, 30.0, 300.0]];
        filter.process_block_inplace(&mut frames);

        assert_eq!(frames[0], [0.5, 5.0, 50.0]);
        assert_eq!(frames[1], [2.0, 20.0, 200.0]);
    }

    #[test]
    fn test_reset() {
        let coeffs = FirCoefficients::from_taps(vec![1.0, 1.0]);
        let mut filter = StreamingFilter::<1>::new(coeffs).unwrap();

        filter.process([1.0]);
        filter.process([2.0]);
        filter.reset();

        assert_eq!(filter.process([1.0]), [1.0]);
    }

    #[test]
    fn test_empty_coefficients_rejected() {
        let result = StreamingFilter::<3>::new(FirCoefficients::from_taps(Vec::new()));
        assert!(matches!(result, Err(DspError::BufferPointerUnresolved)));
    }

    #[test]
    fn test_group_delay() {
        let coeffs = FirCoefficients::from_taps(vec![0.0; 41]);
        let filter = StreamingFilter::<3>::new(coeffs).unwrap();
        assert_eq!(filter.length(), 41);
        assert_eq!(filter.group_delay_samples(), 20.0);
    }
}
