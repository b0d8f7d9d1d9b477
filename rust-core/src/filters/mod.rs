//! FIR filter design and real-time filtering

pub mod windows;
pub mod design;
pub mod shift;
pub mod fir;

pub use windows::{WindowKind, generate_window};
pub use design::{
    BandType, FilterDesign, FirCoefficients, HighPassForm, design_fir, design_fir_from_codes,
    design_fir_with,
};
pub use shift::{ShiftDirection, shift_in};
pub use fir::StreamingFilter;
