//! Butterworth filter design and zero-phase filtering

pub mod butterworth;
pub mod windows;
pub mod zero_phase;

pub use butterworth::{
    design_butterworth, sos_frequency_response, sos_magnitude_response, FilterError, FilterKind,
    SosCascade, SosSection,
};
pub use windows::{generate_window, WindowType};
pub use zero_phase::filtfilt;
