//! WAV file import and export

pub mod wav;

pub use wav::{read_wav, write_wav, WavError};
