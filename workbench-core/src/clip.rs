//! Mono audio clip model
//!
//! The working unit of the workbench: a mono PCM buffer plus its sample rate.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipError {
    #[error("invalid sample rate: {0} Hz")]
    InvalidRate(u32),

    #[error("resampling failed: {0}")]
    Resample(String),
}

/// Mono audio clip, samples nominally in [-1, 1]
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

impl AudioClip {
    /// Create a clip from raw samples
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self, ClipError> {
        if sample_rate == 0 {
            return Err(ClipError::InvalidRate(sample_rate));
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the clip holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Clip duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Peak absolute amplitude (0.0 for an empty clip)
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, &s| acc.max(s.abs()))
    }

    /// Reverse the clip in place
    pub fn reverse(&mut self) {
        self.samples.reverse();
    }

    /// Return a time-reversed copy
    pub fn reversed(&self) -> Self {
        let mut clip = self.clone();
        clip.reverse();
        clip
    }

    /// Return an amplitude-scaled copy
    pub fn scaled(&self, gain: f64) -> Self {
        Self {
            samples: self.samples.iter().map(|&s| s * gain).collect(),
            sample_rate: self.sample_rate,
        }
    }

    /// Resample to `target_rate` using windowed-sinc interpolation
    ///
    /// Returns a clone when the rates already match.
    pub fn resampled(&self, target_rate: u32) -> Result<Self, ClipError> {
        if target_rate == 0 {
            return Err(ClipError::InvalidRate(target_rate));
        }

        if target_rate == self.sample_rate || self.is_empty() {
            return Ok(Self {
                samples: self.samples.clone(),
                sample_rate: target_rate,
            });
        }

        let ratio = target_rate as f64 / self.sample_rate as f64;

        let params = SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        };

        let chunk_size = 1024;
        let mut resampler = SincFixedIn::<f64>::new(ratio, 2.0, params, chunk_size, 1)
            .map_err(|e| ClipError::Resample(e.to_string()))?;

        let expected = (self.samples.len() as f64 * ratio).ceil() as usize;
        let mut output = Vec::with_capacity(expected);
        let mut pos = 0;

        // Full chunks through the fixed-input resampler
        while pos + resampler.input_frames_next() <= self.samples.len() {
            let n = resampler.input_frames_next();
            let chunk = vec![self.samples[pos..pos + n].to_vec()];
            let frames = resampler
                .process(&chunk, None)
                .map_err(|e| ClipError::Resample(e.to_string()))?;
            output.extend_from_slice(&frames[0]);
            pos += n;
        }

        // Tail shorter than a chunk
        if pos < self.samples.len() {
            let chunk = vec![self.samples[pos..].to_vec()];
            let frames = resampler
                .process_partial(Some(&chunk), None)
                .map_err(|e| ClipError::Resample(e.to_string()))?;
            output.extend_from_slice(&frames[0]);
        }

        // Drain the sinc delay line
        let frames = resampler
            .process_partial::<Vec<f64>>(None, None)
            .map_err(|e| ClipError::Resample(e.to_string()))?;
        output.extend_from_slice(&frames[0]);

        Ok(Self {
            samples: output,
            sample_rate: target_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine_clip(freq_hz: f64, sample_rate: u32, secs: f64) -> AudioClip {
        let n = (secs * sample_rate as f64) as usize;
        let samples: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate as f64).sin())
            .collect();
        AudioClip::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_zero_rate_rejected() {
        assert!(AudioClip::new(vec![0.0; 10], 0).is_err());
    }

    #[test]
    fn test_duration_and_peak() {
        let clip = AudioClip::new(vec![0.1, -0.5, 0.3], 48000).unwrap();
        assert!((clip.duration_secs() - 3.0 / 48000.0).abs() < 1e-12);
        assert!((clip.peak() - 0.5).abs() < 1e-12);

        let empty = AudioClip::new(Vec::new(), 48000).unwrap();
        assert_eq!(empty.peak(), 0.0);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_reverse_round_trip() {
        let clip = AudioClip::new(vec![1.0, 2.0, 3.0, 4.0], 48000).unwrap();
        let reversed = clip.reversed();

        assert_eq!(reversed.samples, vec![4.0, 3.0, 2.0, 1.0]);
        assert_eq!(reversed.reversed(), clip);
    }

    #[test]
    fn test_scaled() {
        let clip = AudioClip::new(vec![0.5, -0.25], 48000).unwrap();
        let scaled = clip.scaled(2.0);

        assert_eq!(scaled.samples, vec![1.0, -0.5]);
        assert_eq!(scaled.sample_rate, 48000);
    }

    #[test]
    fn test_resample_identity() {
        let clip = sine_clip(440.0, 48000, 0.1);
        let same = clip.resampled(48000).unwrap();

        assert_eq!(same.samples, clip.samples);
    }

    #[test]
    fn test_resample_preserves_duration() {
        let clip = sine_clip(440.0, 44100, 0.5);
        let resampled = clip.resampled(48000).unwrap();

        assert_eq!(resampled.sample_rate, 48000);
        // Within a few milliseconds of the original duration
        assert!((resampled.duration_secs() - clip.duration_secs()).abs() < 0.01);
    }

    #[test]
    fn test_resample_preserves_amplitude() {
        let clip = sine_clip(440.0, 44100, 0.5);
        let resampled = clip.resampled(48000).unwrap();

        let peak = resampled.peak();
        assert!(peak > 0.9 && peak < 1.1, "peak was {}", peak);
    }

    #[test]
    fn test_resample_empty_clip() {
        let clip = AudioClip::new(Vec::new(), 44100).unwrap();
        let resampled = clip.resampled(48000).unwrap();

        assert!(resampled.is_empty());
        assert_eq!(resampled.sample_rate, 48000);
    }
}
