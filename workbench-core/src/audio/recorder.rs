//! Fixed-duration microphone recorder
//!
//! Captures a set number of seconds from the default input device without
//! blocking the caller. A collector thread drains the capture ring buffer
//! into a sample vector; the UI polls progress and collects the finished
//! clip.

use super::buffer::AudioRingBuffer;
use super::input::{AudioError, AudioInput};
use crate::clip::AudioClip;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Default recording length, matching the "record 5 s" control
pub const DEFAULT_RECORD_SECS: f64 = 5.0;

/// Ring buffer capacity in samples (2 s at 48 kHz)
const CAPTURE_BUFFER_CAPACITY: usize = 96000;

struct RecorderShared {
    running: AtomicBool,
    collected: AtomicUsize,
}

/// In-progress recording
pub struct Recorder {
    input: AudioInput,
    shared: Arc<RecorderShared>,
    collector: Option<JoinHandle<Vec<f64>>>,
    sample_rate: u32,
    target_samples: usize,
}

impl Recorder {
    /// Start recording `duration_secs` from the default input device
    pub fn start(duration_secs: f64) -> Result<Self, AudioError> {
        let rb = AudioRingBuffer::new(CAPTURE_BUFFER_CAPACITY);
        let (producer, consumer) = rb.split();

        let input = AudioInput::from_default_device(producer)?;
        let sample_rate = input.device_info().sample_rate;
        let target_samples = (duration_secs * sample_rate as f64).round() as usize;

        let shared = Arc::new(RecorderShared {
            running: AtomicBool::new(true),
            collected: AtomicUsize::new(0),
        });

        input.start()?;
        log::info!(
            "recording {:.1} s ({} samples at {} Hz)",
            duration_secs,
            target_samples,
            sample_rate
        );

        let shared_clone = Arc::clone(&shared);
        let collector = std::thread::spawn(move || {
            let mut consumer = consumer;
            let mut samples = Vec::with_capacity(target_samples);
            let mut chunk = vec![0.0; 4096];

            while shared_clone.running.load(Ordering::SeqCst) && samples.len() < target_samples {
                let n = consumer.read(&mut chunk);
                if n > 0 {
                    let take = n.min(target_samples - samples.len());
                    samples.extend_from_slice(&chunk[..take]);
                    shared_clone.collected.store(samples.len(), Ordering::SeqCst);
                } else {
                    // Nothing buffered yet, yield to the audio thread
                    std::thread::sleep(Duration::from_millis(1));
                }
            }

            samples
        });

        Ok(Self {
            input,
            shared,
            collector: Some(collector),
            sample_rate,
            target_samples,
        })
    }

    /// Seconds captured so far
    pub fn seconds_captured(&self) -> f64 {
        self.shared.collected.load(Ordering::SeqCst) as f64 / self.sample_rate as f64
    }

    /// Total requested duration in seconds
    pub fn duration_secs(&self) -> f64 {
        self.target_samples as f64 / self.sample_rate as f64
    }

    /// Whether the requested duration has been captured
    pub fn is_done(&self) -> bool {
        self.shared.collected.load(Ordering::SeqCst) >= self.target_samples
    }

    /// Stop capturing and return what was recorded
    pub fn finish(mut self) -> AudioClip {
        self.shared.running.store(false, Ordering::SeqCst);
        let _ = self.input.pause();

        let samples = match self.collector.take() {
            Some(handle) => handle.join().unwrap_or_default(),
            None => Vec::new(),
        };

        log::info!(
            "recording finished with {} samples at {} Hz",
            samples.len(),
            self.sample_rate
        );

        // sample_rate came from the device config, always nonzero
        AudioClip {
            samples,
            sample_rate: self.sample_rate.max(1),
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
        let _ = self.input.pause();
        if let Some(handle) = self.collector.take() {
            let _ = handle.join();
        }
    }
}
