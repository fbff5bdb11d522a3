//! Biquad filter design and processing
//!
//! Second-order IIR sections used by both the resonator and the equalizer.
//! Coefficient design is a pure numeric transform: nothing here validates
//! frequencies or Q, so degenerate input yields NaN/Inf coefficients that
//! simply propagate through the filter.

use std::f64::consts::{PI, SQRT_2};

/// Filter recipes known to the designer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    /// Band-pass resonator around `cutoff` Hz with quality factor `q`
    Resonator { cutoff: f64, q: f64 },
    /// One equalizer band at `center` Hz with `gain_db` of boost or cut
    EqualizerBand { center: f64, gain_db: f64 },
}

/// Biquad filter coefficients
///
/// Transfer function: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (a0 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BiquadCoefficients {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a0: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoefficients {
    /// Create coefficients from raw values
    pub fn new(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        Self { b0, b1, b2, a0, a1, a2 }
    }

    /// Pass-through section (y = x)
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Design coefficients for `kind` at the given sample rate
    pub fn design(kind: FilterKind, sample_rate: u32) -> Self {
        match kind {
            FilterKind::Resonator { cutoff, q } => Self::resonator(cutoff, q, sample_rate),
            FilterKind::EqualizerBand { center, gain_db } => {
                Self::equalizer_band(center, gain_db, sample_rate)
            }
        }
    }

    /// Resonator (band-pass) coefficients.
    ///
    /// The b terms are divided by `1 + alpha`; the a terms are left as
    /// `(1 + alpha, -2cos(w0), 1 - alpha)` and are NOT normalized by a0.
    /// `BiquadFilter` ignores a0, so the recurrence runs with the raw a1/a2
    /// and is unstable for many musical settings (pinned in the tests of
    /// `synth::resonator`).
    pub fn resonator(cutoff: f64, q: f64, sample_rate: u32) -> Self {
        let f = cutoff / (sample_rate as f64 / 2.0);
        let w0 = 2.0 * PI * f;
        let alpha = w0.sin() / (2.0 * q);
        let cos_w0 = w0.cos();

        Self {
            b0: 1.0 / (1.0 + alpha),
            b1: -2.0 * cos_w0,
            b2: 1.0 / (1.0 + alpha),
            a0: 1.0 + alpha,
            a1: -2.0 * cos_w0,
            a2: 1.0 - alpha,
        }
    }

    /// Equalizer band coefficients.
    ///
    /// Low-order approximation: a second-order low-pass whose numerator is
    /// scaled by `A = 10^(gain_db / 40)`. Its DC gain is exactly `A`.
    pub fn equalizer_band(center: f64, gain_db: f64, sample_rate: u32) -> Self {
        let f = center / (sample_rate as f64 / 2.0);
        let a = 10.0_f64.powf(gain_db / 40.0);
        let w = 2.0 * PI * f;
        let w2 = w * w;

        let denom = 4.0 + 2.0 * SQRT_2 * w + w2;
        Self {
            b0: a * (w2 / denom),
            b1: a * (2.0 * w2 / denom),
            b2: a * (w2 / denom),
            a0: 1.0,
            a1: 2.0 * (w2 - 4.0) / denom,
            a2: (4.0 - 2.0 * SQRT_2 * w + w2) / denom,
        }
    }

    /// True if every coefficient is finite
    pub fn is_finite(&self) -> bool {
        [self.b0, self.b1, self.b2, self.a0, self.a1, self.a2]
            .iter()
            .all(|c| c.is_finite())
    }
}

/// Stateful biquad section (Direct Form I)
///
/// Holds the previous two inputs and outputs. State starts at zero and
/// belongs to this filter alone.
#[derive(Debug, Clone)]
pub struct BiquadFilter {
    coeffs: BiquadCoefficients,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl BiquadFilter {
    /// Create a filter with cleared history
    pub fn new(coeffs: BiquadCoefficients) -> Self {
        Self {
            coeffs,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Run one fresh filter over `input` and return the filtered buffer.
    pub fn apply(coeffs: BiquadCoefficients, mut input: Vec<f64>) -> Vec<f64> {
        let mut filter = Self::new(coeffs);
        filter.process_buffer(&mut input);
        input
    }

    /// Coefficients in use
    pub fn coefficients(&self) -> &BiquadCoefficients {
        &self.coeffs
    }

    /// Reset filter state (clear history)
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    /// Process a single sample.
    ///
    /// `y = b0*x + b1*x1 + b2*x2 - a1*y1 - a2*y2`; a0 is not applied.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let c = &self.coeffs;
        let output = c.b0 * input + c.b1 * self.x1 + c.b2 * self.x2
            - c.a1 * self.y1
            - c.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Process a buffer of samples in place
    pub fn process_buffer(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }
}
