//! Resonant band-pass stage

use tracing::debug;

use super::filter::{BiquadCoefficients, BiquadFilter, FilterKind};

/// Resonator settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResonatorParams {
    /// Center of the resonance in Hz
    pub cutoff: f64,
    /// Quality factor; higher is narrower
    pub resonance: f64,
}

impl ResonatorParams {
    pub fn new(cutoff: f64, resonance: f64) -> Self {
        Self { cutoff, resonance }
    }

    /// Filter recipe for these settings
    pub fn kind(&self) -> FilterKind {
        FilterKind::Resonator {
            cutoff: self.cutoff,
            q: self.resonance,
        }
    }
}

impl Default for ResonatorParams {
    fn default() -> Self {
        Self::new(1000.0, 0.707)
    }
}

/// Single biquad band-pass pass over a whole buffer
pub struct Resonator;

impl Resonator {
    /// Filter `wave` through one freshly designed resonator section
    pub fn apply(wave: Vec<f64>, sample_rate: u32, params: ResonatorParams) -> Vec<f64> {
        let coeffs = BiquadCoefficients::design(params.kind(), sample_rate);
        debug!(
            cutoff = params.cutoff,
            resonance = params.resonance,
            samples = wave.len(),
            ?coeffs,
            "applying resonator"
        );
        BiquadFilter::apply(coeffs, wave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn impulse(len: usize) -> Vec<f64> {
        let mut buffer = vec![0.0; len];
        buffer[0] = 1.0;
        buffer
    }

    #[test]
    fn test_output_length_matches_input() {
        let wave = vec![0.1; 1000];
        let out = Resonator::apply(wave, 44100, ResonatorParams::new(500.0, 2.0));
        assert_eq!(out.len(), 1000);
    }

    #[test]
    fn test_pinned_impulse_response_eighth_rate() {
        // w0 = pi/2: b0 = b2 = 2/3, a1 ~ 0, a2 = 0.5, a0 (1.5) unused
        let out = Resonator::apply(impulse(8), 44100, ResonatorParams::new(5512.5, 1.0));

        let expected = [
            2.0 / 3.0,
            0.0,
            1.0 / 3.0,
            0.0,
            -1.0 / 6.0,
            0.0,
            1.0 / 12.0,
            0.0,
        ];
        for (got, want) in out.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pinned_unnormalized_recurrence_diverges() {
        // With a0 applied this section would be stable; the raw a1/a2 put a
        // pole near 1.41 and the impulse response grows without bound.
        let out = Resonator::apply(impulse(200), 44100, ResonatorParams::new(1000.0, 0.5));

        let last = out[199].abs();
        assert!(last > 1e6, "expected divergence, got {}", last);
    }

    #[test]
    fn test_decays_near_eighth_rate() {
        // a1 ~ 0, a2 = 0.95: poles inside the unit circle
        let out = Resonator::apply(impulse(2000), 44100, ResonatorParams::new(5512.5, 10.0));
        assert!(out.iter().all(|s| s.is_finite()));
        assert!(out[1999].abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_q_propagates_nan() {
        let wave = vec![0.5; 16];
        let out = Resonator::apply(wave, 44100, ResonatorParams::new(1000.0, 0.0));
        assert!(out.iter().any(|s| s.is_nan()));
    }
}
