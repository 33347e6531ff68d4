//! Spectral analysis with FFT

pub mod analysis;
pub mod fft;
pub mod windowing;

pub use analysis::{clip_spectrum, AnalyzerConfig, ClipSpectrum, SpectrumAnalyzer};
pub use fft::FftEngine;
pub use windowing::apply_window;
