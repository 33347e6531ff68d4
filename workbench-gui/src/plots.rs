//! Plot point preparation
//!
//! Long clips are decimated before plotting: the waveform keeps a min/max
//! envelope per bucket so transients stay visible, the spectrum keeps the
//! loudest bin per bucket so peaks survive.

use signal_workbench::{clip_spectrum, AudioClip};

/// Cap on waveform envelope buckets (two points each)
pub const MAX_WAVEFORM_BUCKETS: usize = 2048;

/// Cap on spectrum trace points
pub const MAX_SPECTRUM_POINTS: usize = 4096;

/// Spectrum view range in Hz
pub const SPECTRUM_VIEW_HZ: f64 = 8000.0;

/// Prepared plot points for the current signal
pub struct PlotData {
    pub waveform: Vec<[f64; 2]>,
    pub spectrum: Vec<[f64; 2]>,
}

/// Build both plots for a clip
pub fn build_plot_data(clip: &AudioClip) -> PlotData {
    PlotData {
        waveform: waveform_points(clip, MAX_WAVEFORM_BUCKETS),
        spectrum: spectrum_points(clip, SPECTRUM_VIEW_HZ, MAX_SPECTRUM_POINTS),
    }
}

/// Time-domain points: raw samples for short clips, a min/max envelope
/// per bucket for long ones
pub fn waveform_points(clip: &AudioClip, max_buckets: usize) -> Vec<[f64; 2]> {
    if clip.is_empty() || max_buckets == 0 {
        return Vec::new();
    }

    let rate = clip.sample_rate as f64;

    if clip.len() <= max_buckets {
        return clip
            .samples
            .iter()
            .enumerate()
            .map(|(i, &s)| [i as f64 / rate, s])
            .collect();
    }

    let bucket = clip.len().div_ceil(max_buckets);
    let mut points = Vec::with_capacity(2 * max_buckets);

    for (i, chunk) in clip.samples.chunks(bucket).enumerate() {
        let t = (i * bucket) as f64 / rate;
        let mut min = chunk[0];
        let mut max = chunk[0];
        for &s in chunk {
            min = min.min(s);
            max = max.max(s);
        }
        points.push([t, min]);
        points.push([t, max]);
    }

    points
}

/// Frequency-domain points up to `max_hz`, decimated by loudest-bin bucketing
pub fn spectrum_points(clip: &AudioClip, max_hz: f64, max_points: usize) -> Vec<[f64; 2]> {
    if clip.is_empty() || max_points == 0 {
        return Vec::new();
    }

    let spectrum = clip_spectrum(clip);
    let visible: Vec<[f64; 2]> = spectrum
        .freqs_hz
        .iter()
        .zip(spectrum.magnitude.iter())
        .take_while(|(&f, _)| f <= max_hz)
        .map(|(&f, &m)| [f, m])
        .collect();

    if visible.len() <= max_points {
        return visible;
    }

    let bucket = visible.len().div_ceil(max_points);
    visible
        .chunks(bucket)
        .map(|chunk| {
            chunk
                .iter()
                .copied()
                .max_by(|a, b| a[1].total_cmp(&b[1]))
                .unwrap_or(chunk[0])
        })
        .collect()
}
