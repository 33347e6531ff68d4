//! WAV decode/encode with hound
//!
//! Import accepts 16/24/32-bit integer and 32-bit float WAV; multi-channel
//! files are reduced to channel 0. Export writes 16-bit PCM mono.

use crate::clip::AudioClip;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::io::{Read, Seek, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WavError {
    #[error("WAV I/O failed: {0}")]
    Hound(#[from] hound::Error),

    #[error("unsupported WAV format: {bits}-bit {format:?}")]
    UnsupportedFormat { bits: u16, format: SampleFormat },

    #[error("WAV file has no channels")]
    NoChannels,

    #[error("refusing to export an empty clip")]
    EmptyClip,
}

/// Read a WAV file into a mono clip
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioClip, WavError> {
    let reader = WavReader::open(path)?;
    decode(reader)
}

/// Write a clip as 16-bit PCM mono WAV
pub fn write_wav<P: AsRef<Path>>(path: P, clip: &AudioClip) -> Result<(), WavError> {
    if clip.is_empty() {
        return Err(WavError::EmptyClip);
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: clip.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let writer = WavWriter::create(path, spec)?;
    encode(writer, clip)
}

fn decode<R: Read>(mut reader: WavReader<R>) -> Result<AudioClip, WavError> {
    let spec = reader.spec();
    let channels = spec.channels as usize;

    if channels == 0 {
        return Err(WavError::NoChannels);
    }

    let samples: Vec<f64> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => collect_channel_0(
            reader.samples::<f32>().map(|s| s.map(|v| v as f64)),
            channels,
        )?,
        (SampleFormat::Int, 16) | (SampleFormat::Int, 24) | (SampleFormat::Int, 32) => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            collect_channel_0(
                reader.samples::<i32>().map(|s| s.map(|v| v as f64 / scale)),
                channels,
            )?
        }
        (format, bits) => return Err(WavError::UnsupportedFormat { bits, format }),
    };

    // spec.sample_rate is nonzero for any file hound accepts
    AudioClip::new(samples, spec.sample_rate)
        .map_err(|_| WavError::UnsupportedFormat {
            bits: spec.bits_per_sample,
            format: spec.sample_format,
        })
}

fn encode<W: Write + Seek>(mut writer: WavWriter<W>, clip: &AudioClip) -> Result<(), WavError> {
    for &sample in &clip.samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f64).round() as i16)?;
    }

    writer.finalize()?;
    Ok(())
}

fn collect_channel_0<I>(samples: I, channels: usize) -> Result<Vec<f64>, WavError>
where
    I: Iterator<Item = Result<f64, hound::Error>>,
{
    let mut mono = Vec::new();
    for (i, sample) in samples.enumerate() {
        let sample = sample?;
        if i % channels == 0 {
            mono.push(sample);
        }
    }
    Ok(mono)
}
