//! Single-slot shift-and-insert over a fixed-size buffer
//!
//! One generic operation serves every delay line in the crate: the filter
//! history (multi-channel frames) and the spectral sliding input (scalars).

use crate::error::DspError;

/// Direction in which existing elements move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    /// Elements move toward higher indices; the new element lands at index 0
    Backward,
    /// Elements move toward index 0; the new element lands at the last index
    Forward,
}

impl TryFrom<i32> for ShiftDirection {
    type Error = DspError;

    /// `1` shifts toward the back, `-1` toward the front
    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ShiftDirection::Backward),
            -1 => Ok(ShiftDirection::Forward),
            other => Err(DspError::BufferDirectionUnresolved(other)),
        }
    }
}

/// Shift `buffer` by one slot in `direction`, discarding the element pushed
/// off the end and inserting `value` into the freed slot.
///
/// # Panics
/// If `buffer` is empty: there is no slot to insert into.
#[inline]
pub fn shift_in<T: Copy>(buffer: &mut [T], direction: ShiftDirection, value: T) {
    let len = buffer.len();
    assert!(len > 0, "shift_in: buffer has no backing storage");

    match direction {
        ShiftDirection::Backward => {
            buffer.copy_within(..len - 1, 1);
            buffer[0] = value;
        }
        ShiftDirection::Forward => {
            buffer.copy_within(1.., 0);
            buffer[len - 1] = value;
        }
    }
}
