//! Ten-band equalizer built from cascaded biquads
//!
//! Each band runs a fresh filter over the output of the previous band, in
//! the fixed order of [`BAND_FREQUENCIES`]. After every band the samples are
//! narrowed to single precision, so rounding accumulates across the ten
//! passes exactly as a float32 working buffer would.

use tracing::debug;

use super::filter::{BiquadCoefficients, BiquadFilter, FilterKind};
use crate::error::{Result, SynthError};

/// Number of equalizer bands
pub const BAND_COUNT: usize = 10;

/// Band center frequencies in Hz, in processing order
pub const BAND_FREQUENCIES: [f64; BAND_COUNT] = [
    60.0, 170.0, 310.0, 600.0, 1000.0, 3000.0, 6000.0, 12000.0, 14000.0, 16000.0,
];

/// One equalizer band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqualizerBand {
    pub center: f64,
    pub gain_db: f64,
}

impl EqualizerBand {
    /// Filter recipe for this band
    pub fn kind(&self) -> FilterKind {
        FilterKind::EqualizerBand {
            center: self.center,
            gain_db: self.gain_db,
        }
    }
}

/// Cascaded ten-band equalizer
pub struct Equalizer;

impl Equalizer {
    /// Pair each gain with its band frequency.
    ///
    /// `gains[k]` belongs to `BAND_FREQUENCIES[k]`; anything other than
    /// exactly ten gains is rejected.
    pub fn bands(gains: &[f64]) -> Result<[EqualizerBand; BAND_COUNT]> {
        if gains.len() != BAND_COUNT {
            return Err(SynthError::EqualizerGains {
                expected: BAND_COUNT,
                got: gains.len(),
            });
        }

        Ok(std::array::from_fn(|k| EqualizerBand {
            center: BAND_FREQUENCIES[k],
            gain_db: gains[k],
        }))
    }

    /// Run `wave` through all ten bands in order
    pub fn apply(wave: Vec<f64>, sample_rate: u32, gains: &[f64]) -> Result<Vec<f64>> {
        let bands = Self::bands(gains)?;

        let mut wave = wave;
        for band in &bands {
            let coeffs = BiquadCoefficients::design(band.kind(), sample_rate);
            debug!(
                center = band.center,
                gain_db = band.gain_db,
                samples = wave.len(),
                "applying equalizer band"
            );
            wave = BiquadFilter::apply(coeffs, wave);
            narrow_to_f32(&mut wave);
        }

        Ok(wave)
    }
}

/// Round every sample to the nearest `f32`
fn narrow_to_f32(buffer: &mut [f64]) {
    for sample in buffer.iter_mut() {
        *sample = *sample as f32 as f64;
    }
}
