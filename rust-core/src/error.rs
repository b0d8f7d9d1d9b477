//! Error types shared by the filter and spectrum engines

use thiserror::Error;

/// Errors raised while designing filters or running the DSP engines
#[derive(Error, Debug)]
pub enum DspError {
    #[error("Unsupported window kind: {0}")]
    UnsupportedWindowKind(String),

    #[error("Unsupported band type: {0}")]
    UnsupportedBandType(String),

    #[error("Window generation failed")]
    WindowGenerationFailed(#[source] Box<DspError>),

    #[error("Invalid length {length}: {reason}")]
    InvalidLength { length: usize, reason: &'static str },

    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Shift direction code {0} is neither forward (1) nor backward (-1)")]
    BufferDirectionUnresolved(i32),

    #[error("No backing storage supplied for the shift buffer")]
    BufferPointerUnresolved,

    #[error("Transform failed on channel {channel}")]
    TransformExecutionFailed {
        channel: usize,
        #[source]
        source: realfft::FftError,
    },

    #[error("Allocation failed: {0}")]
    AllocationFailed(String),
}

/// Allocate a buffer of `len` copies of `value`, reporting failure instead of aborting
pub(crate) fn try_filled<T: Clone>(len: usize, value: T) -> Result<Vec<T>, DspError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|e| DspError::AllocationFailed(format!("{len} elements: {e}")))?;
    buffer.resize(len, value);
    Ok(buffer)
}

/// Number of taps (L+1) for filter order `order`
pub(crate) fn tap_count(order: usize) -> Result<usize, DspError> {
    order
        .checked_add(1)
        .ok_or_else(|| DspError::AllocationFailed(format!("order {order} has no L+1 tap count")))
}
