//! Periodic waveform generation
//!
//! Waves are evaluated directly on the time base `t = i / sample_rate`
//! rather than with a running phase accumulator, so sample `i` of a buffer
//! does not depend on rounding in the samples before it.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SynthError};

/// Waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaveType {
    #[default]
    Sine,
    /// Sign of a sine; exact zero crossings produce 0
    Square,
    #[serde(alias = "saw")]
    Sawtooth,
}

impl WaveType {
    /// All supported wave types
    pub const ALL: [WaveType; 3] = [WaveType::Sine, WaveType::Square, WaveType::Sawtooth];

    /// Lowercase name as used in presets and on the command line
    pub fn name(self) -> &'static str {
        match self {
            WaveType::Sine => "sine",
            WaveType::Square => "square",
            WaveType::Sawtooth => "sawtooth",
        }
    }

    /// Unit-amplitude value of this wave at time `t` seconds
    pub fn value_at(self, frequency: f64, t: f64) -> f64 {
        match self {
            WaveType::Sine => (2.0 * PI * frequency * t).sin(),
            WaveType::Square => sign((2.0 * PI * frequency * t).sin()),
            WaveType::Sawtooth => 2.0 * (t * frequency - (t * frequency + 0.5).floor()),
        }
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WaveType {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(WaveType::Sine),
            "square" => Ok(WaveType::Square),
            "sawtooth" | "saw" => Ok(WaveType::Sawtooth),
            _ => Err(SynthError::UnknownWaveType { name: s.to_string() }),
        }
    }
}

/// Sign function with `sign(0) == 0` (unlike `f64::signum`)
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Parameters for one generated wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSpec {
    pub wave_type: WaveType,
    pub frequency: f64,
    /// Peak amplitude, nominally 0.0-1.0 but not enforced
    pub amplitude: f64,
    pub duration_secs: f64,
    pub sample_rate: u32,
}

impl WaveSpec {
    /// Create a new wave description
    pub fn new(
        wave_type: WaveType,
        frequency: f64,
        amplitude: f64,
        duration_secs: f64,
        sample_rate: u32,
    ) -> Self {
        Self {
            wave_type,
            frequency,
            amplitude,
            duration_secs,
            sample_rate,
        }
    }

    /// Number of samples, `floor(sample_rate * duration)`
    pub fn sample_count(&self) -> usize {
        (self.sample_rate as f64 * self.duration_secs).floor() as usize
    }

    fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidSampleRate {
                sample_rate: self.sample_rate,
            });
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(SynthError::InvalidDuration {
                duration_secs: self.duration_secs,
            });
        }
        Ok(())
    }
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self::new(WaveType::Sine, 440.0, 0.5, 1.0, 44100)
    }
}

/// Generate the samples described by `spec`.
///
/// A zero duration is legal and yields an empty buffer.
pub fn generate(spec: WaveSpec) -> Result<Vec<f64>> {
    spec.validate()?;

    let sample_rate = spec.sample_rate as f64;
    let samples = (0..spec.sample_count())
        .map(|i| {
            let t = i as f64 / sample_rate;
            spec.amplitude * spec.wave_type.value_at(spec.frequency, t)
        })
        .collect();

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_zero_duration_is_empty() {
        for wave_type in WaveType::ALL {
            let spec = WaveSpec::new(wave_type, 440.0, 1.0, 0.0, 44100);
            assert!(generate(spec).unwrap().is_empty(), "{} not empty", wave_type);
        }
    }

    #[test]
    fn test_sample_count_truncates() {
        let spec = WaveSpec::new(WaveType::Sine, 440.0, 1.0, 0.5, 44101);
        assert_eq!(spec.sample_count(), 22050);
        assert_eq!(generate(spec).unwrap().len(), 22050);

        let spec = WaveSpec::new(WaveType::Sine, 440.0, 1.0, 1.0, 44100);
        assert_eq!(generate(spec).unwrap().len(), 44100);
    }

    #[test]
    fn test_sine_quarter_steps() {
        let spec = WaveSpec::new(WaveType::Sine, 1.0, 1.0, 1.0, 4);
        let wave = generate(spec).unwrap();

        assert_eq!(wave.len(), 4);
        assert_abs_diff_eq!(wave[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wave[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wave[2], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(wave[3], -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_sine_amplitude_scales() {
        let spec = WaveSpec::new(WaveType::Sine, 1.0, 0.25, 1.0, 4);
        let wave = generate(spec).unwrap();
        assert_abs_diff_eq!(wave[1], 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(wave[3], -0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_square_quarter_steps() {
        let spec = WaveSpec::new(WaveType::Square, 1.0, 1.0, 1.0, 4);
        let wave = generate(spec).unwrap();

        // sin(0) is exactly zero; sin(pi) rounds to a tiny positive value
        assert_eq!(wave, vec![0.0, 1.0, 1.0, -1.0]);
    }

    #[test]
    fn test_sign_of_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(1e-300), 1.0);
        assert_eq!(sign(-1e-300), -1.0);
    }

    #[test]
    fn test_sawtooth_ramp() {
        let spec = WaveSpec::new(WaveType::Sawtooth, 1.0, 1.0, 1.0, 4);
        let wave = generate(spec).unwrap();

        // f*t - floor(f*t + 0.5): 0, 0.25, -0.5, -0.25
        assert_eq!(wave, vec![0.0, 0.5, -1.0, -0.5]);
    }

    #[test]
    fn test_invalid_sample_rate() {
        let spec = WaveSpec::new(WaveType::Sine, 440.0, 1.0, 1.0, 0);
        assert_eq!(
            generate(spec),
            Err(SynthError::InvalidSampleRate { sample_rate: 0 })
        );
    }

    #[test]
    fn test_negative_duration() {
        let spec = WaveSpec::new(WaveType::Sine, 440.0, 1.0, -0.1, 44100);
        assert!(matches!(
            generate(spec),
            Err(SynthError::InvalidDuration { .. })
        ));

        let spec = WaveSpec::new(WaveType::Sine, 440.0, 1.0, f64::NAN, 44100);
        assert!(generate(spec).is_err());
    }

    #[test]
    fn test_infinite_duration() {
        let spec = WaveSpec::new(WaveType::Sine, 440.0, 1.0, f64::INFINITY, 44100);
        assert!(matches!(
            generate(spec),
            Err(SynthError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn test_parse_wave_type() {
        assert_eq!("sine".parse::<WaveType>().unwrap(), WaveType::Sine);
        assert_eq!("Square".parse::<WaveType>().unwrap(), WaveType::Square);
        assert_eq!(" saw ".parse::<WaveType>().unwrap(), WaveType::Sawtooth);
        assert_eq!("sawtooth".parse::<WaveType>().unwrap(), WaveType::Sawtooth);

        let err = "triangle".parse::<WaveType>().unwrap_err();
        assert_eq!(
            err,
            SynthError::UnknownWaveType {
                name: "triangle".to_string()
            }
        );
    }

    #[test]
    fn test_wave_type_display_round_trips() {
        for wave_type in WaveType::ALL {
            assert_eq!(wave_type.to_string().parse::<WaveType>().unwrap(), wave_type);
        }
    }
}
