//! Butterworth IIR filter design
//!
//! Designs digital low/high-pass Butterworth filters from the analog
//! prototype: unit-circle prototype poles, frequency transform with a
//! prewarped cutoff, bilinear transform, then cascaded second-order
//! sections with real coefficients.

use num_complex::Complex64;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("filter order must be at least 1 (got {0})")]
    InvalidOrder(usize),

    #[error("cutoff frequency {cutoff_hz} Hz must lie strictly between 0 and {nyquist} Hz")]
    CutoffOutOfRange { cutoff_hz: f64, nyquist: f64 },
}

/// Filter response type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Lowpass,
    Highpass,
}

/// One second-order section, a0 normalized to 1
///
/// H(z) = (b0 + b1 z^-1 + b2 z^-2) / (1 + a1 z^-1 + a2 z^-2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SosSection {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl SosSection {
    /// Section gain for a constant (DC) input
    fn dc_gain(&self) -> f64 {
        let den = 1.0 + self.a1 + self.a2;
        if den.abs() < 1e-12 {
            0.0
        } else {
            (self.b0 + self.b1 + self.b2) / den
        }
    }
}

/// Design a digital Butterworth filter as cascaded second-order sections
///
/// # Arguments
/// * `order` - Filter order (≥ 1); odd orders yield one first-order section
/// * `cutoff_hz` - -3 dB cutoff frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `kind` - Lowpass or highpass
///
/// # Returns
/// Sections ordered low-Q first, each normalized to unity passband gain
/// (DC for lowpass, Nyquist for highpass).
pub fn design_butterworth(
    order: usize,
    cutoff_hz: f64,
    sample_rate: f64,
    kind: FilterKind,
) -> Result<Vec<SosSection>, FilterError> {
    if order == 0 {
        return Err(FilterError::InvalidOrder(order));
    }

    let nyquist = sample_rate / 2.0;
    if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
        return Err(FilterError::CutoffOutOfRange { cutoff_hz, nyquist });
    }

    // Prewarp the cutoff so the bilinear transform lands it exactly
    let fs2 = 2.0 * sample_rate;
    let warped = fs2 * (PI * cutoff_hz / sample_rate).tan();

    let n = order;

    // Analog prototype poles on the unit circle, left half-plane:
    // p_k = exp(jπ(2k + n + 1) / 2n), k = 0..n-1
    // Conjugate partners sit at k and n-1-k; odd n puts a real pole at k = n/2.
    let analog_poles: Vec<Complex64> = (0..n)
        .map(|k| {
            let theta = PI * (2 * k + n + 1) as f64 / (2 * n) as f64;
            let p = Complex64::from_polar(1.0, theta);
            match kind {
                FilterKind::Lowpass => warped * p,
                FilterKind::Highpass => Complex64::new(warped, 0.0) / p,
            }
        })
        .collect();

    // Bilinear transform: z = (2fs + p) / (2fs - p)
    let zpoles: Vec<Complex64> = analog_poles
        .iter()
        .map(|p| (Complex64::new(fs2, 0.0) + p) / (Complex64::new(fs2, 0.0) - p))
        .collect();

    // Digital zeros land at z = -1 (lowpass) or z = +1 (highpass), so the
    // numerators are fixed and only the poles vary per section.
    let mut sections = Vec::with_capacity(n / 2 + n % 2);

    for k in 0..n / 2 {
        let zp = zpoles[k];
        sections.push(pair_section(zp, kind));
    }

    if n % 2 == 1 {
        let zr = zpoles[n / 2].re;
        sections.push(real_pole_section(zr, kind));
    }

    Ok(sections)
}

/// Biquad from a complex-conjugate pole pair
fn pair_section(zp: Complex64, kind: FilterKind) -> SosSection {
    let a1 = -2.0 * zp.re;
    let a2 = zp.norm_sqr();

    // Unnormalized numerator is (1 ± z^-1)^2; scale for unity passband gain
    let scale = match kind {
        FilterKind::Lowpass => (1.0 + a1 + a2) / 4.0,
        FilterKind::Highpass => (1.0 - a1 + a2) / 4.0,
    };

    let sign = match kind {
        FilterKind::Lowpass => 1.0,
        FilterKind::Highpass => -1.0,
    };

    SosSection {
        b0: scale,
        b1: sign * 2.0 * scale,
        b2: scale,
        a1,
        a2,
    }
}

/// First-order section from the real pole of an odd-order design
fn real_pole_section(zr: f64, kind: FilterKind) -> SosSection {
    let a1 = -zr;

    let scale = match kind {
        FilterKind::Lowpass => (1.0 + a1) / 2.0,
        FilterKind::Highpass => (1.0 - a1) / 2.0,
    };

    let sign = match kind {
        FilterKind::Lowpass => 1.0,
        FilterKind::Highpass => -1.0,
    };

    SosSection {
        b0: scale,
        b1: sign * scale,
        b2: 0.0,
        a1,
        a2: 0.0,
    }
}

/// Complex frequency response of a section cascade
///
/// # Arguments
/// * `sections` - Second-order sections
/// * `freqs_hz` - Frequencies to evaluate, in Hz
/// * `sample_rate` - Sample rate in Hz
pub fn sos_frequency_response(
    sections: &[SosSection],
    freqs_hz: &[f64],
    sample_rate: f64,
) -> Vec<Complex64> {
    freqs_hz
        .iter()
        .map(|&f| {
            let omega = 2.0 * PI * f / sample_rate;
            let zinv = Complex64::from_polar(1.0, -omega);
            let zinv2 = zinv * zinv;

            sections.iter().fold(Complex64::new(1.0, 0.0), |acc, s| {
                let num = Complex64::new(s.b0, 0.0) + s.b1 * zinv + s.b2 * zinv2;
                let den = Complex64::new(1.0, 0.0) + s.a1 * zinv + s.a2 * zinv2;
                acc * num / den
            })
        })
        .collect()
}

/// Magnitude response of a section cascade
pub fn sos_magnitude_response(
    sections: &[SosSection],
    freqs_hz: &[f64],
    sample_rate: f64,
) -> Vec<f64> {
    sos_frequency_response(sections, freqs_hz, sample_rate)
        .iter()
        .map(|c| c.norm())
        .collect()
}

/// Stateful cascade executor (direct form II transposed per section)
pub struct SosCascade {
    sections: Vec<SosSection>,
    state: Vec<[f64; 2]>,
}

impl SosCascade {
    /// Create a cascade with zeroed state
    pub fn new(sections: Vec<SosSection>) -> Self {
        let state = vec![[0.0; 2]; sections.len()];
        Self { sections, state }
    }

    /// Clear all section state
    pub fn reset(&mut self) {
        for st in self.state.iter_mut() {
            *st = [0.0; 2];
        }
    }

    /// Set section state to the steady state for a constant input `x0`
    ///
    /// Removes the startup transient when the signal begins away from zero.
    pub fn initialize_steady_state(&mut self, x0: f64) {
        let mut x = x0;
        for (section, st) in self.sections.iter().zip(self.state.iter_mut()) {
            let y = section.dc_gain() * x;
            st[0] = y - section.b0 * x;
            st[1] = section.b2 * x - section.a2 * y;
            x = y;
        }
    }

    /// Process a single sample through all sections
    #[inline]
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let mut x = input;
        for (section, st) in self.sections.iter().zip(self.state.iter_mut()) {
            let y = section.b0 * x + st[0];
            st[0] = section.b1 * x - section.a1 * y + st[1];
            st[1] = section.b2 * x - section.a2 * y;
            x = y;
        }
        x
    }

    /// Process a block in-place
    pub fn process_block_inplace(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    /// Get the cascade's sections
    pub fn sections(&self) -> &[SosSection] {
        &self.sections
    }
}
