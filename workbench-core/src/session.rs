//! Workbench session state
//!
//! Owns the document of the application: the pristine signal as imported
//! or recorded, and the working copy that processing operations mutate.

use crate::clip::AudioClip;
use crate::filters::{design_butterworth, filtfilt, FilterError, FilterKind};
use crate::io::{read_wav, write_wav, WavError};
use std::path::Path;
use thiserror::Error;

/// Butterworth order used by the filter operations
pub const FILTER_ORDER: usize = 5;

#[derive(Error, Debug)]
pub enum WorkbenchError {
    #[error(transparent)]
    Wav(#[from] WavError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("no signal loaded")]
    NoSignal,
}

/// Summary shown in the info line
#[derive(Debug, Clone, PartialEq)]
pub struct ClipInfo {
    pub duration_secs: f64,
    pub sample_rate: u32,
    pub peak: f64,
}

/// Workbench document state
#[derive(Default)]
pub struct Workbench {
    /// Pristine backup of the last import or recording
    raw: Option<AudioClip>,

    /// Working signal that operations mutate
    current: Option<AudioClip>,
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Import a WAV file; it becomes both the backup and the working signal
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), WorkbenchError> {
        let clip = read_wav(&path)?;
        log::info!(
            "imported {:?}: {:.2} s at {} Hz",
            path.as_ref(),
            clip.duration_secs(),
            clip.sample_rate
        );

        self.raw = Some(clip.clone());
        self.current = Some(clip);
        Ok(())
    }

    /// Install a finished recording the same way as an import
    pub fn adopt_recording(&mut self, clip: AudioClip) {
        self.raw = Some(clip.clone());
        self.current = Some(clip);
    }

    /// Export the working signal
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), WorkbenchError> {
        let clip = self.current.as_ref().ok_or(WorkbenchError::NoSignal)?;
        write_wav(&path, clip)?;
        log::info!("exported {:.2} s to {:?}", clip.duration_secs(), path.as_ref());
        Ok(())
    }

    /// Restore the working signal from the pristine backup
    pub fn reset(&mut self) -> Result<(), WorkbenchError> {
        let raw = self.raw.as_ref().ok_or(WorkbenchError::NoSignal)?;
        self.current = Some(raw.clone());
        Ok(())
    }

    /// Time-reverse the working signal
    pub fn reverse(&mut self) -> Result<(), WorkbenchError> {
        let clip = self.current.as_mut().ok_or(WorkbenchError::NoSignal)?;
        clip.reverse();
        Ok(())
    }

    /// Zero-phase Butterworth low-pass of the working signal
    pub fn lowpass(&mut self, cutoff_hz: f64) -> Result<(), WorkbenchError> {
        self.apply_filter(cutoff_hz, FilterKind::Lowpass)
    }

    /// Zero-phase Butterworth high-pass of the working signal
    pub fn highpass(&mut self, cutoff_hz: f64) -> Result<(), WorkbenchError> {
        self.apply_filter(cutoff_hz, FilterKind::Highpass)
    }

    fn apply_filter(&mut self, cutoff_hz: f64, kind: FilterKind) -> Result<(), WorkbenchError> {
        let clip = self.current.as_mut().ok_or(WorkbenchError::NoSignal)?;

        let sections =
            design_butterworth(FILTER_ORDER, cutoff_hz, clip.sample_rate as f64, kind)?;
        clip.samples = filtfilt(&sections, &clip.samples);

        log::info!("applied {:?} filter at {} Hz", kind, cutoff_hz);
        Ok(())
    }

    /// The working signal, if any
    pub fn current(&self) -> Option<&AudioClip> {
        self.current.as_ref()
    }

    /// Whether a signal is loaded
    pub fn has_signal(&self) -> bool {
        self.current.is_some()
    }

    /// Info-line summary of the working signal
    pub fn info(&self) -> Option<ClipInfo> {
        self.current.as_ref().map(|clip| ClipInfo {
            duration_secs: clip.duration_secs(),
            sample_rate: clip.sample_rate,
            peak: clip.peak(),
        })
    }
}
