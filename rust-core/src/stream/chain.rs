//! Filter → spectrum processing chain
//!
//! Owns one designed FIR filter, its streaming engine and a spectral analyzer.
//! Every filtered frame is slid into the analyzer's input window, so a
//! spectrum can be taken at any point over the last N filtered samples.

use log::{info, trace};

use super::buffer::FrameConsumer;
use crate::config::ProcessingConfig;
use crate::error::DspError;
use crate::filters::{FilterDesign, StreamingFilter};
use crate::spectrum::{PowerSpectrum, SpectralAnalyzer};
use crate::Frame;

/// Streaming filter and spectral analyzer over `C` channels
pub struct SignalChain<const C: usize> {
    design: FilterDesign,
    filter: StreamingFilter<C>,
    analyzer: SpectralAnalyzer<C>,
    frames_processed: u64,
}

impl<const C: usize> SignalChain<C> {
    /// Validate the configuration, design the filter and plan the transforms
    pub fn from_config(config: &ProcessingConfig) -> Result<Self, DspError> {
        config.validate()?;
        Self::new(config.filter.clone(), config.fft_size)
    }

    /// Build a chain from an explicit filter design and FFT length
    pub fn new(design: FilterDesign, fft_size: usize) -> Result<Self, DspError> {
        let coefficients = design.design()?;
        let taps = coefficients.len();
        let filter = StreamingFilter::new(coefficients)?;
        let analyzer = SpectralAnalyzer::new(fft_size)?;

        info!(
            "signal chain ready: {C} channels, {} filter at {} Hz ({taps} taps, {} window), {fft_size}-point FFT",
            design.band, design.sample_rate_hz, design.window
        );

        Ok(Self {
            design,
            filter,
            analyzer,
            frames_processed: 0,
        })
    }

    /// Filter one frame and feed the result to the analyzer
    pub fn process(&mut self, frame: Frame<C>) -> Frame<C> {
        let filtered = self.filter.process(frame);
        self.analyzer.push_frame(filtered);
        self.frames_processed += 1;
        filtered
    }

    /// Process a block of frames
    pub fn process_block(&mut self, frames: &[Frame<C>]) -> Vec<Frame<C>> {
        frames.iter().map(|&frame| self.process(frame)).collect()
    }

    /// Process every frame currently queued, returning how many were handled
    pub fn drain(&mut self, consumer: &mut FrameConsumer<C>) -> usize {
        let mut count = 0;
        while let Some(frame) = consumer.pop() {
            self.process(frame);
            count += 1;
        }
        trace!("drained {count} frames ({} total)", self.frames_processed);
        count
    }

    /// Magnitude spectrum of the last N filtered frames
    pub fn spectrum(&mut self) -> Result<PowerSpectrum, DspError> {
        self.analyzer.compute_magnitude_spectrum()
    }

    /// Clear filter history and analyzer input
    pub fn reset(&mut self) {
        self.filter.reset();
        self.analyzer.clear();
        self.frames_processed = 0;
    }

    pub fn design(&self) -> &FilterDesign {
        &self.design
    }

    pub fn filter(&self) -> &StreamingFilter<C> {
        &self.filter
    }

    pub fn analyzer(&self) -> &SpectralAnalyzer<C> {
        &self.analyzer
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.design.sample_rate_hz
    }
}
