//! Test signal generation

use std::f64::consts::PI;

use crate::Frame;

/// Multi-channel sine: channel c carries `amplitudes[c]·sin(2π·f·n/fs)`
///
/// # Arguments
/// * `amplitudes` - Per-channel amplitude
/// * `frequency_hz` - Tone frequency
/// * `sample_rate_hz` - Sample rate
/// * `count` - Number of frames
pub fn sine_frames<const C: usize>(
    amplitudes: [f64; C],
    frequency_hz: f64,
    sample_rate_hz: f64,
    count: usize,
) -> Vec<Frame<C>> {
    (0..count)
        .map(|n| {
            let value = (2.0 * PI * frequency_hz * n as f64 / sample_rate_hz).sin();
            amplitudes.map(|a| a * value)
        })
        .collect()
}

/// Unit impulse on `channel` at frame 0 followed by zeros
///
/// # Panics
/// If `channel >= C` and `count > 0`.
pub fn impulse_frames<const C: usize>(channel: usize, count: usize) -> Vec<Frame<C>> {
    let mut frames = vec![[0.0; C]; count];
    if let Some(first) = frames.first_mut() {
        first[channel] = 1.0;
    }
    frames
}
