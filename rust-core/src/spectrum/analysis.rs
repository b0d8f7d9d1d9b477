//! Multi-channel magnitude spectrum
//!
//! Rows are frequency bins (0..=N/2), columns are channels.

use ndarray::{Array2, ArrayView1, Axis};

use super::reduce::pairwise_max;

/// Magnitude spectrum of `C` channels over the N/2+1 bins of a length-N real FFT
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    magnitudes: Array2<f64>,
    fft_size: usize,
}

impl PowerSpectrum {
    pub(crate) fn new(magnitudes: Array2<f64>, fft_size: usize) -> Self {
        Self {
            magnitudes,
            fft_size,
        }
    }

    /// Number of frequency bins (N/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.magnitudes.nrows()
    }

    pub fn num_channels(&self) -> usize {
        self.magnitudes.ncols()
    }

    /// Transform length N the spectrum was computed from
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Full bins × channels matrix
    pub fn magnitudes(&self) -> &Array2<f64> {
        &self.magnitudes
    }

    /// Magnitude of `channel` at `bin`
    pub fn get(&self, bin: usize, channel: usize) -> f64 {
        self.magnitudes[[bin, channel]]
    }

    /// Per-channel magnitudes of one bin
    pub fn bin(&self, bin: usize) -> ArrayView1<'_, f64> {
        self.magnitudes.index_axis(Axis(0), bin)
    }

    /// Every bin of one channel
    pub fn channel(&self, channel: usize) -> ArrayView1<'_, f64> {
        self.magnitudes.index_axis(Axis(1), channel)
    }

    /// Bin with the largest magnitude in `channel`, ignoring DC
    ///
    /// Returns `None` when the spectrum has no bin besides DC.
    pub fn dominant_bin(&self, channel: usize) -> Option<usize> {
        let column: Vec<f64> = self.channel(channel).iter().skip(1).copied().collect();
        pairwise_max(&column).map(|(index, _)| index + 1)
    }

    /// Center frequency of `bin` in Hz
    pub fn bin_frequency_hz(&self, bin: usize, sample_rate_hz: f64) -> f64 {
        bin as f64 * sample_rate_hz / self.fft_size as f64
    }

    /// Bin center frequencies in Hz
    pub fn frequency_axis_hz(&self, sample_rate_hz: f64) -> Vec<f64> {
        (0..self.num_bins())
            .map(|bin| self.bin_frequency_hz(bin, sample_rate_hz))
            .collect()
    }

    /// Magnitudes in dB relative to `reference`, clamped to avoid log(0)
    pub fn to_db(&self, reference: f64) -> Array2<f64> {
        self.magnitudes
            .mapv(|mag| 20.0 * (mag.max(1e-10) / reference).log10())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sample() -> PowerSpectrum {
        // 5 bins (N = 8), 2 channels
        let magnitudes = array![
            [9.0, 1.0],
            [0.5, 0.0],
            [3.0, 0.2],
            [1.0, 4.0],
            [0.1, 0.0],
        ];
        PowerSpectrum::new(magnitudes, 8)
    }

    #[test]
    fn test_shape_and_views() {
        let spectrum = sample();
        assert_eq!(spectrum.num_bins(), 5);
        assert_eq!(spectrum.num_channels(), 2);
        assert_eq!(spectrum.get(3, 1), 4.0);
        assert_eq!(spectrum.bin(2).to_vec(), vec![3.0, 0.2]);
        assert_eq!(spectrum.channel(1).to_vec(), vec![1.0, 0.0, 0.2, 4.0, 0.0]);
    }

    #[test]
    fn test_dominant_bin_skips_dc() {
        let spectrum = sample();
        assert_eq!(spectrum.dominant_bin(0), Some(2));
        assert_eq!(spectrum.dominant_bin(1), Some(3));
    }

    #[test]
    fn test_frequency_axis() {
        let spectrum = sample();
        let axis = spectrum.frequency_axis_hz(200.0);
        assert_eq!(axis, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_db_conversion() {
        let spectrum = sample();
        let db = spectrum.to_db(1.0);
        assert!((db[[3, 1]] - 20.0 * 4.0_f64.log10()).abs() < 1e-12);
        assert!((db[[1, 1]] + 200.0).abs() < 1e-9);
    }
}
