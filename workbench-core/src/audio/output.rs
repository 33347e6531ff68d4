//! Audio output playback using cpal
//!
//! An output stream fed from a shared playback cursor over a finite clip.
//! Mono source samples are duplicated across the device's output channels;
//! when the material runs out, the stream outputs silence and flags itself
//! as stopped.

use super::input::{AudioDeviceInfo, AudioError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared state between the UI thread and the output callback
pub struct PlaybackSource {
    /// Material currently being played, at the device sample rate
    material: Mutex<Arc<Vec<f32>>>,

    /// Playback cursor in samples
    position: AtomicUsize,

    /// Whether the callback should consume material
    playing: AtomicBool,

    /// Volume as f32 bits (atomics have no native f32)
    volume_bits: AtomicU32,
}

impl PlaybackSource {
    pub fn new() -> Self {
        Self {
            material: Mutex::new(Arc::new(Vec::new())),
            position: AtomicUsize::new(0),
            playing: AtomicBool::new(false),
            volume_bits: AtomicU32::new(1.0_f32.to_bits()),
        }
    }

    /// Install new material and start playing from `start_sample`
    pub fn set_material(&self, material: Arc<Vec<f32>>, start_sample: usize) {
        let len = material.len();
        if let Ok(mut guard) = self.material.lock() {
            *guard = material;
        }
        self.position.store(start_sample.min(len), Ordering::SeqCst);
        self.playing.store(len > 0, Ordering::SeqCst);
    }

    /// Stop consuming material
    pub fn stop(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }

    /// Set live playback volume (clamped to [0, 2])
    pub fn set_volume(&self, volume: f32) {
        self.volume_bits
            .store(volume.clamp(0.0, 2.0).to_bits(), Ordering::SeqCst);
    }

    /// Current playback volume
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume_bits.load(Ordering::SeqCst))
    }

    /// Whether material is currently being consumed
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Playback position as a fraction of the material in [0, 1]
    pub fn progress(&self) -> f64 {
        let len = self.material.lock().map(|m| m.len()).unwrap_or(0);
        if len == 0 {
            return 0.0;
        }
        self.position.load(Ordering::SeqCst) as f64 / len as f64
    }

    /// Fill an interleaved output buffer (runs on the audio thread)
    fn fill(&self, data: &mut [f32], channels: usize) {
        if !self.is_playing() {
            data.fill(0.0);
            return;
        }

        let Ok(material) = self.material.lock() else {
            data.fill(0.0);
            return;
        };

        let volume = self.volume();
        let mut pos = self.position.load(Ordering::SeqCst);

        for frame in data.chunks_mut(channels) {
            let sample = if pos < material.len() {
                material[pos] * volume
            } else {
                0.0
            };
            for out in frame.iter_mut() {
                *out = sample;
            }
            pos += 1;
        }

        let exhausted = pos >= material.len();
        self.position.store(pos.min(material.len()), Ordering::SeqCst);
        if exhausted {
            self.playing.store(false, Ordering::SeqCst);
        }
    }
}

impl Default for PlaybackSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Audio output stream
pub struct AudioOutput {
    stream: Stream,
    device_info: AudioDeviceInfo,
}

impl AudioOutput {
    /// Create audio output from default device
    ///
    /// # Arguments
    /// * `source` - Shared playback state driving the callback
    pub fn from_default_device(source: Arc<PlaybackSource>) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        Self::from_device(device, source)
    }

    /// Create audio output from specific device
    pub fn from_device(device: Device, source: Arc<PlaybackSource>) -> Result<Self, AudioError> {
        let name = device
            .name()
            .map_err(|e| AudioError::DeviceName(e.to_string()))?;

        let config = device
            .default_output_config()
            .map_err(|e| AudioError::DefaultConfig(e.to_string()))?;

        let sample_rate = config.sample_rate().0;
        let channels = config.channels();

        let device_info = AudioDeviceInfo {
            name: name.clone(),
            sample_rate,
            channels,
        };

        let stream_config: StreamConfig = config.into();
        let frame_channels = channels.max(1) as usize;

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    source.fill(data, frame_channels);
                },
                move |err| {
                    log::error!("audio output error: {}", err);
                },
                None,
            )
            .map_err(|e| AudioError::BuildStream(e.to_string()))?;

        log::info!(
            "opened output device \"{}\" at {} Hz, {} channel(s)",
            device_info.name,
            device_info.sample_rate,
            device_info.channels
        );

        Ok(Self {
            stream,
            device_info,
        })
    }

    /// Start playing audio
    pub fn start(&self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|e| AudioError::PlayStream(e.to_string()))
    }

    /// Pause audio playback
    pub fn pause(&self) -> Result<(), AudioError> {
        self.stream
            .pause()
            .map_err(|e| AudioError::PlayStream(e.to_string()))
    }

    /// Get device information
    pub fn device_info(&self) -> &AudioDeviceInfo {
        &self.device_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_applies_volume_and_advances() {
        let source = PlaybackSource::new();
        source.set_material(Arc::new(vec![1.0, -1.0, 0.5, 0.25]), 0);
        source.set_volume(0.5);

        let mut data = vec![0.0_f32; 4]; // two stereo frames
        source.fill(&mut data, 2);

        assert_eq!(data, vec![0.5, 0.5, -0.5, -0.5]);
        assert!(source.is_playing());
        assert!((source.progress() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_fill_stops_at_end() {
        let source = PlaybackSource::new();
        source.set_material(Arc::new(vec![1.0, 1.0]), 0);

        let mut data = vec![0.0_f32; 6];
        source.fill(&mut data, 1);

        // Remaining frames padded with silence, playback flagged done
        assert_eq!(data, vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(!source.is_playing());
        assert!((source.progress() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_when_stopped_outputs_silence() {
        let source = PlaybackSource::new();
        source.set_material(Arc::new(vec![1.0; 8]), 0);
        source.stop();

        let mut data = vec![0.7_f32; 4];
        source.fill(&mut data, 2);

        assert_eq!(data, vec![0.0; 4]);
    }

    #[test]
    fn test_start_sample_clamped() {
        let source = PlaybackSource::new();
        source.set_material(Arc::new(vec![1.0; 4]), 100);

        assert!((source.progress() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_material_does_not_play() {
        let source = PlaybackSource::new();
        source.set_material(Arc::new(Vec::new()), 0);

        assert!(!source.is_playing());
        assert_eq!(source.progress(), 0.0);
    }

    #[test]
    fn test_volume_clamped() {
        let source = PlaybackSource::new();
        source.set_volume(5.0);
        assert_eq!(source.volume(), 2.0);
        source.set_volume(-1.0);
        assert_eq!(source.volume(), 0.0);
    }
}
