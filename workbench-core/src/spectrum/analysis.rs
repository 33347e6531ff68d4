//! High-level spectrum analyzer

use super::fft::FftEngine;
use super::windowing::{apply_window, window_correction_factor};
use crate::clip::AudioClip;
use crate::filters::windows::WindowType;

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// FFT size (number of samples)
    pub fft_size: usize,

    /// Window type for spectral analysis
    pub window_type: WindowType,

    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Apply amplitude correction for windowing
    pub apply_correction: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            window_type: WindowType::Hamming,
            sample_rate: 48000.0,
            apply_correction: true,
        }
    }
}

/// Spectrum analyzer
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: FftEngine,
    correction_factor: f64,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Self {
        let fft_engine = FftEngine::new(config.fft_size);
        let correction_factor = if config.apply_correction {
            window_correction_factor(config.window_type, config.fft_size)
        } else {
            1.0
        };

        Self {
            config,
            fft_engine,
            correction_factor,
        }
    }

    /// Analyze signal and return magnitude spectrum
    ///
    /// # Arguments
    /// * `signal` - Input signal (windowed and zero-padded if needed)
    ///
    /// # Returns
    /// Magnitude spectrum |X[k]| for positive frequencies
    pub fn analyze(&mut self, signal: &[f64]) -> Vec<f64> {
        // Apply window
        let windowed = apply_window(signal, self.config.window_type);

        // Compute FFT magnitude
        let mut spectrum = self.fft_engine.compute_magnitude(&windowed);

        // Apply correction factor
        if self.config.apply_correction {
            for s in spectrum.iter_mut() {
                *s *= self.correction_factor;
            }
        }

        spectrum
    }

    /// Analyze and return magnitude in dB
    ///
    /// # Arguments
    /// * `signal` - Input signal
    /// * `reference` - Reference level for dB (default: 1.0)
    pub fn analyze_db(&mut self, signal: &[f64], reference: f64) -> Vec<f64> {
        let spectrum = self.analyze(signal);
        spectrum
            .iter()
            .map(|&mag| {
                let mag_clamped = mag.max(1e-10);
                20.0 * (mag_clamped / reference).log10()
            })
            .collect()
    }

    /// Get frequency bins in Hz
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        self.fft_engine
            .frequency_axis()
            .iter()
            .map(|&f_norm| FftEngine::normalized_to_hz(f_norm, self.config.sample_rate))
            .collect()
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) {
        let needs_new_fft = config.fft_size != self.config.fft_size;

        if needs_new_fft {
            self.fft_engine = FftEngine::new(config.fft_size);
        }

        self.correction_factor = if config.apply_correction {
            window_correction_factor(config.window_type, config.fft_size)
        } else {
            1.0
        };

        self.config = config;
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Get number of frequency bins
    pub fn num_bins(&self) -> usize {
        self.fft_engine.num_bins()
    }
}

/// Magnitude spectrum of a whole clip
#[derive(Debug, Clone)]
pub struct ClipSpectrum {
    /// Frequency of each bin in Hz
    pub freqs_hz: Vec<f64>,

    /// Linear magnitude per bin
    pub magnitude: Vec<f64>,
}

/// Analyze an entire clip at full resolution
///
/// Raw (rectangular, uncorrected) FFT over the whole sample buffer, the
/// positive-frequency half only. This is what the spectrum plot displays.
pub fn clip_spectrum(clip: &AudioClip) -> ClipSpectrum {
    if clip.is_empty() {
        return ClipSpectrum {
            freqs_hz: Vec::new(),
            magnitude: Vec::new(),
        };
    }

    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
        fft_size: clip.len(),
        window_type: WindowType::Rectangular,
        sample_rate: clip.sample_rate as f64,
        apply_correction: false,
    });

    let magnitude = analyzer.analyze(&clip.samples);
    let freqs_hz = analyzer.frequency_bins_hz();

    ClipSpectrum { freqs_hz, magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_analyzer_basic() {
        let config = AnalyzerConfig {
            fft_size: 1024,
            window_type: WindowType::Hamming,
            sample_rate: 48000.0,
            apply_correction: true,
        };

        let mut analyzer = SpectrumAnalyzer::new(config);

        // Generate 1 kHz sine wave
        let freq_hz = 1000.0;
        let signal: Vec<f64> = (0..1024)
            .map(|n| (2.0 * PI * freq_hz * n as f64 / 48000.0).sin())
            .collect();

        let spectrum = analyzer.analyze(&signal);

        // Should have correct number of bins
        assert_eq!(spectrum.len(), 513);

        // Peak should be near 1 kHz
        let freqs = analyzer.frequency_bins_hz();
        let (peak_idx, _) = spectrum
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        let peak_freq = freqs[peak_idx];
        assert!((peak_freq - freq_hz).abs() < 100.0); // Within 100 Hz
    }

    #[test]
    fn test_analyzer_db() {
        let config = AnalyzerConfig::default();
        let mut analyzer = SpectrumAnalyzer::new(config);

        let signal = vec![1.0; 1024];
        let spectrum_db = analyzer.analyze_db(&signal, 1.0);

        // DC component should be high
        assert!(spectrum_db[0] > 50.0);
    }

    #[test]
    fn test_update_config_resizes() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default());
        assert_eq!(analyzer.num_bins(), 1025);

        analyzer.update_config(AnalyzerConfig {
            fft_size: 512,
            ..AnalyzerConfig::default()
        });
        assert_eq!(analyzer.num_bins(), 257);
        assert_eq!(analyzer.config().fft_size, 512);
    }

    #[test]
    fn test_clip_spectrum_peak_location() {
        let sample_rate = 8000_u32;
        let freq_hz = 440.0;
        let samples: Vec<f64> = (0..8000)
            .map(|n| (2.0 * PI * freq_hz * n as f64 / sample_rate as f64).sin())
            .collect();
        let clip = AudioClip::new(samples, sample_rate).unwrap();

        let spectrum = clip_spectrum(&clip);

        assert_eq!(spectrum.freqs_hz.len(), 4001);
        let (peak_idx, _) = spectrum
            .magnitude
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();

        // 1 Hz bin spacing for a 1 s clip
        assert!((spectrum.freqs_hz[peak_idx] - freq_hz).abs() < 2.0);
    }

    #[test]
    fn test_clip_spectrum_empty() {
        let clip = AudioClip::new(Vec::new(), 48000).unwrap();
        let spectrum = clip_spectrum(&clip);

        assert!(spectrum.freqs_hz.is_empty());
        assert!(spectrum.magnitude.is_empty());
    }
}
