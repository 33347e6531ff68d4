//! Windowing for spectral analysis
//!
//! Applies windows to time-domain signals before the FFT to reduce
//! spectral leakage.

use crate::filters::windows::{generate_window, WindowType};

/// Apply window to signal
///
/// # Arguments
/// * `signal` - Input signal
/// * `window_type` - Type of window to apply
///
/// # Returns
/// Windowed signal
pub fn apply_window(signal: &[f64], window_type: WindowType) -> Vec<f64> {
    let window = generate_window(window_type, signal.len());

    signal
        .iter()
        .zip(window.iter())
        .map(|(&s, &w)| s * w)
        .collect()
}

/// Apply window in-place
pub fn apply_window_inplace(signal: &mut [f64], window_type: WindowType) {
    let window = generate_window(window_type, signal.len());

    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}

/// Calculate window correction factor
///
/// Windowing reduces the signal amplitude; multiplying the FFT magnitude
/// by this factor compensates.
///
/// # Arguments
/// * `window_type` - Type of window
/// * `length` - Window length
pub fn window_correction_factor(window_type: WindowType, length: usize) -> f64 {
    let window = generate_window(window_type, length);
    let sum: f64 = window.iter().sum();
    length as f64 / sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_window() {
        let signal = vec![1.0; 100];
        let windowed = apply_window(&signal, WindowType::Hamming);

        assert_eq!(windowed.len(), 100);

        // Center should be close to 1.0
        assert!((windowed[50] - 1.0).abs() < 0.01);

        // Edges should be reduced (Hamming ~0.08)
        assert!(windowed[0] < 0.1);
        assert!(windowed[99] < 0.1);
    }

    #[test]
    fn test_apply_window_inplace_matches() {
        let signal = vec![0.5; 64];
        let windowed = apply_window(&signal, WindowType::Hann);

        let mut inplace = signal.clone();
        apply_window_inplace(&mut inplace, WindowType::Hann);

        assert_eq!(windowed, inplace);
    }

    #[test]
    fn test_correction_factor() {
        let factor_rect = window_correction_factor(WindowType::Rectangular, 100);
        let factor_hamming = window_correction_factor(WindowType::Hamming, 100);

        // Rectangular window needs no correction
        assert!((factor_rect - 1.0).abs() < 0.01);

        // Hamming window reduces amplitude, so correction > 1
        assert!(factor_hamming > 1.5 && factor_hamming < 2.5);
    }
}
