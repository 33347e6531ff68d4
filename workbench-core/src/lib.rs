//! Signal Workbench - audio workbench core
//!
//! Loading, recording, playback, light processing (gain, reversal, speed
//! change, Butterworth filtering), and spectral analysis of mono audio
//! clips. The GUI front-end lives in the `signal-workbench-gui` crate.

pub mod audio;
pub mod clip;
pub mod filters;
pub mod io;
pub mod session;
pub mod spectrum;

pub use audio::{Player, PlayerError, Recorder, DEFAULT_RECORD_SECS};
pub use clip::{AudioClip, ClipError};
pub use filters::{FilterKind, SosSection};
pub use session::{ClipInfo, Workbench, WorkbenchError, FILTER_ORDER};
pub use spectrum::{clip_spectrum, ClipSpectrum, SpectrumAnalyzer};
