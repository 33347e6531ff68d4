//! Zero-phase forward-backward filtering
//!
//! Runs a section cascade over the signal twice, once in each direction,
//! cancelling the filter's phase response. Edges are handled with odd
//! extension padding and steady-state section initialization, so short
//! signals and non-zero endpoints do not ring.

use super::butterworth::{SosCascade, SosSection};

/// Apply a filter forward and backward over `signal`
///
/// Output length equals input length. The effective magnitude response is
/// the square of the cascade's.
pub fn filtfilt(sections: &[SosSection], signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() || sections.is_empty() {
        return signal.to_vec();
    }

    let pad = (3 * (2 * sections.len() + 1)).min(signal.len() - 1);
    let n = signal.len();
    let last = signal[n - 1];

    // Odd extension: reflect around the endpoint values
    let mut extended = Vec::with_capacity(n + 2 * pad);
    for i in (1..=pad).rev() {
        extended.push(2.0 * signal[0] - signal[i]);
    }
    extended.extend_from_slice(signal);
    for i in 1..=pad {
        extended.push(2.0 * last - signal[n - 1 - i]);
    }

    // Forward pass
    let mut chain = SosCascade::new(sections.to_vec());
    chain.initialize_steady_state(extended[0]);
    chain.process_block_inplace(&mut extended);

    // Backward pass
    extended.reverse();
    let mut chain = SosCascade::new(sections.to_vec());
    chain.initialize_steady_state(extended[0]);
    chain.process_block_inplace(&mut extended);
    extended.reverse();

    extended[pad..pad + n].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::butterworth::{design_butterworth, FilterKind};
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, sample_rate: f64, len: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_length_preserved() {
        let sos = design_butterworth(5, 2000.0, 48000.0, FilterKind::Lowpass).unwrap();

        for len in [0, 1, 2, 5, 100, 4801] {
            let signal = sine(440.0, 48000.0, len);
            assert_eq!(filtfilt(&sos, &signal).len(), len);
        }
    }

    #[test]
    fn test_passband_signal_unchanged() {
        let fs = 48000.0;
        let sos = design_butterworth(5, 2000.0, fs, FilterKind::Lowpass).unwrap();

        let signal = sine(200.0, fs, 9600);
        let filtered = filtfilt(&sos, &signal);

        // Deep in the passband: no attenuation, no phase shift
        for i in 1000..8600 {
            assert!(
                (filtered[i] - signal[i]).abs() < 0.01,
                "sample {} drifted: {} vs {}",
                i,
                filtered[i],
                signal[i]
            );
        }
    }

    #[test]
    fn test_stopband_tone_removed() {
        let fs = 48000.0;
        let sos = design_butterworth(5, 1000.0, fs, FilterKind::Lowpass).unwrap();

        let low = sine(200.0, fs, 9600);
        let high = sine(6000.0, fs, 9600);
        let mixed: Vec<f64> = low.iter().zip(high.iter()).map(|(a, b)| a + b).collect();

        let filtered = filtfilt(&sos, &mixed);

        // Only the low tone survives
        for i in 1000..8600 {
            assert!(
                (filtered[i] - low[i]).abs() < 0.05,
                "sample {}: {} vs {}",
                i,
                filtered[i],
                low[i]
            );
        }
    }

    #[test]
    fn test_highpass_removes_offset() {
        let fs = 48000.0;
        let sos = design_butterworth(5, 100.0, fs, FilterKind::Highpass).unwrap();

        let signal: Vec<f64> = sine(2000.0, fs, 9600).iter().map(|s| s + 0.5).collect();
        let filtered = filtfilt(&sos, &signal);

        let mean: f64 = filtered[1000..8600].iter().sum::<f64>() / 7600.0;
        assert!(mean.abs() < 0.01, "residual offset {}", mean);
    }

    #[test]
    fn test_impulse_response_symmetric() {
        let fs = 48000.0;
        let sos = design_butterworth(4, 4000.0, fs, FilterKind::Lowpass).unwrap();

        let mut signal = vec![0.0; 2001];
        signal[1000] = 1.0;
        let filtered = filtfilt(&sos, &signal);

        // Zero phase means an even impulse response around the impulse
        for offset in 1..200 {
            assert!(
                (filtered[1000 + offset] - filtered[1000 - offset]).abs() < 1e-9,
                "asymmetry at offset {}",
                offset
            );
        }
    }

    #[test]
    fn test_constant_signal_passes_lowpass() {
        let sos = design_butterworth(5, 2000.0, 48000.0, FilterKind::Lowpass).unwrap();

        let signal = vec![0.7; 500];
        let filtered = filtfilt(&sos, &signal);

        for (i, &y) in filtered.iter().enumerate() {
            assert!((y - 0.7).abs() < 1e-6, "sample {} was {}", i, y);
        }
    }

    #[test]
    fn test_empty_signal() {
        let sos = design_butterworth(5, 2000.0, 48000.0, FilterKind::Lowpass).unwrap();
        assert!(filtfilt(&sos, &[]).is_empty());
    }
}
