//! Clip playback with live volume, seeking, and speed change
//!
//! The player owns one lazily-created output stream and swaps the material
//! behind it. Speed change is a resample of the played material: a clip at
//! rate R played at speed s is treated as a clip at rate R*s and converted
//! to the device rate.

use super::input::AudioError;
use super::output::{AudioOutput, PlaybackSource};
use crate::clip::{AudioClip, ClipError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error(transparent)]
    Audio(#[from] AudioError),

    #[error(transparent)]
    Clip(#[from] ClipError),

    #[error("nothing to play: clip is empty")]
    EmptyClip,

    #[error("playback speed must be positive (got {0})")]
    InvalidSpeed(f64),
}

/// Clip player bound to the default output device
pub struct Player {
    source: Arc<PlaybackSource>,
    output: Option<AudioOutput>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            source: Arc::new(PlaybackSource::new()),
            output: None,
        }
    }

    /// Play a clip from `start` (fraction of the clip in [0, 1]) at `speed`
    ///
    /// Restarts playback if something is already playing. The clip itself
    /// is never modified.
    pub fn play(&mut self, clip: &AudioClip, start: f64, speed: f64) -> Result<(), PlayerError> {
        if clip.is_empty() {
            return Err(PlayerError::EmptyClip);
        }
        if !speed.is_finite() || speed <= 0.0 {
            return Err(PlayerError::InvalidSpeed(speed));
        }

        self.source.stop();
        self.ensure_output()?;

        let device_rate = match &self.output {
            Some(output) => output.device_info().sample_rate,
            None => clip.sample_rate,
        };

        // Reinterpret the clip at R*s, then convert to the device rate
        let source_rate = (clip.sample_rate as f64 * speed).round().max(1.0) as u32;
        let material = AudioClip {
            samples: clip.samples.clone(),
            sample_rate: source_rate,
        }
        .resampled(device_rate)?;

        let samples: Arc<Vec<f32>> =
            Arc::new(material.samples.iter().map(|&s| s as f32).collect());

        let start_sample = (start.clamp(0.0, 1.0) * samples.len() as f64) as usize;

        log::info!(
            "playing {} samples at {} Hz (speed {:.2}, start {:.1}%)",
            samples.len(),
            device_rate,
            speed,
            start.clamp(0.0, 1.0) * 100.0
        );

        self.source.set_material(samples, start_sample);
        Ok(())
    }

    /// Stop playback
    pub fn stop(&self) {
        self.source.stop();
    }

    /// Set live playback volume (1.0 = unity, clamped to [0, 2])
    pub fn set_volume(&self, volume: f32) {
        self.source.set_volume(volume);
    }

    /// Current playback volume
    pub fn volume(&self) -> f32 {
        self.source.volume()
    }

    /// Whether a clip is currently playing
    pub fn is_playing(&self) -> bool {
        self.source.is_playing()
    }

    /// Playback position as a fraction in [0, 1]
    pub fn progress(&self) -> f64 {
        self.source.progress()
    }

    fn ensure_output(&mut self) -> Result<(), PlayerError> {
        if self.output.is_none() {
            let output = AudioOutput::from_default_device(Arc::clone(&self.source))?;
            output.start()?;
            self.output = Some(output);
        }
        Ok(())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_clip_rejected() {
        let mut player = Player::new();
        let clip = AudioClip::new(Vec::new(), 48000).unwrap();

        assert!(matches!(
            player.play(&clip, 0.0, 1.0),
            Err(PlayerError::EmptyClip)
        ));
    }

    #[test]
    fn test_invalid_speed_rejected() {
        let mut player = Player::new();
        let clip = AudioClip::new(vec![0.0; 100], 48000).unwrap();

        assert!(matches!(
            player.play(&clip, 0.0, 0.0),
            Err(PlayerError::InvalidSpeed(_))
        ));
        assert!(matches!(
            player.play(&clip, 0.0, -2.0),
            Err(PlayerError::InvalidSpeed(_))
        ));
    }

    #[test]
    fn test_idle_player_state() {
        let player = Player::new();

        assert!(!player.is_playing());
        assert_eq!(player.progress(), 0.0);
        assert_eq!(player.volume(), 1.0);
    }
}
