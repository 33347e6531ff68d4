//! Audio input/output management with cpal

pub mod buffer;
pub mod input;
pub mod output;
pub mod player;
pub mod recorder;

pub use buffer::AudioRingBuffer;
pub use input::{list_input_devices, AudioDeviceInfo, AudioError, AudioInput};
pub use output::{AudioOutput, PlaybackSource};
pub use player::{Player, PlayerError};
pub use recorder::{Recorder, DEFAULT_RECORD_SECS};
