//! Configuration schema definitions

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::engine::{EqualizerSettings, ResonatorSettings, SynthesisRequest};
use crate::synth::{ResonatorParams, WaveSpec, WaveType, BAND_COUNT};

/// Longest duration a preset may ask for, in seconds
pub const MAX_DURATION_SECS: f64 = 600.0;

/// Main configuration: one synthesis preset
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Waveform to generate
    #[serde(default)]
    pub wave: WaveConfig,

    /// Ten-band equalizer
    #[serde(default)]
    pub equalizer: EqualizerConfig,

    /// Resonant band-pass filter
    #[serde(default)]
    pub resonator: ResonatorConfig,
}

impl SynthConfig {
    /// Validate the configuration
    ///
    /// Checks the ranges the synthesis core expects its caller to enforce.
    /// Filter parameters are only checked for being numbers; a Q of zero or
    /// a cutoff past Nyquist is allowed through (see [`Self::warnings`]).
    pub fn validate(&self) -> Result<()> {
        // Validate audio settings
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("Sample rate must be between 8000 and 192000");
        }

        // Validate wave settings
        let duration = self.wave.duration;
        if !duration.is_finite() || !(0.0..=MAX_DURATION_SECS).contains(&duration) {
            bail!("Duration must be between 0 and {} seconds", MAX_DURATION_SECS);
        }
        if !self.wave.frequency.is_finite() {
            bail!("Frequency must be a finite number");
        }
        if !self.wave.amplitude.is_finite() {
            bail!("Amplitude must be a finite number");
        }

        // Validate equalizer settings
        if self.equalizer.gains.len() != BAND_COUNT {
            bail!(
                "Equalizer needs exactly {} gains, got {}",
                BAND_COUNT,
                self.equalizer.gains.len()
            );
        }
        if let Some(bad) = self.equalizer.gains.iter().find(|g| !g.is_finite()) {
            bail!("Equalizer gain {} is not a finite number", bad);
        }

        // Validate resonator settings
        if !self.resonator.cutoff.is_finite() || !self.resonator.resonance.is_finite() {
            bail!("Resonator cutoff and resonance must be finite numbers");
        }

        Ok(())
    }

    /// Settings that are accepted but will produce an unstable or NaN signal
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.resonator.enabled {
            return warnings;
        }

        let nyquist = self.audio.sample_rate as f64 / 2.0;
        if self.resonator.resonance <= 0.0 {
            warnings.push(format!(
                "resonance {} is not positive; output will be NaN",
                self.resonator.resonance
            ));
        }
        if self.resonator.cutoff <= 0.0 || self.resonator.cutoff >= nyquist {
            warnings.push(format!(
                "cutoff {} Hz is outside (0, {}) Hz",
                self.resonator.cutoff, nyquist
            ));
        }
        warnings
    }

    /// Build the synthesis request described by this preset
    pub fn to_request(&self) -> SynthesisRequest {
        SynthesisRequest {
            wave: WaveSpec::new(
                self.wave.kind,
                self.wave.frequency,
                self.wave.amplitude,
                self.wave.duration,
                self.audio.sample_rate,
            ),
            equalizer: EqualizerSettings {
                enabled: self.equalizer.enabled,
                gains: self.equalizer.gains.clone(),
            },
            resonator: ResonatorSettings {
                enabled: self.resonator.enabled,
                params: ResonatorParams::new(self.resonator.cutoff, self.resonator.resonance),
            },
        }
    }
}

/// Audio output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Output device name (None = default device)
    #[serde(default)]
    pub device: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            device: None,
        }
    }
}

fn default_sample_rate() -> u32 { 44100 }

/// Waveform settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveConfig {
    /// Wave shape (default: sine)
    #[serde(rename = "type", default)]
    pub kind: WaveType,

    /// Frequency in Hz (default: 440)
    #[serde(default = "default_frequency")]
    pub frequency: f64,

    /// Peak amplitude 0.0-1.0 (default: 0.5)
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,

    /// Duration in seconds (default: 1.0)
    #[serde(default = "default_duration")]
    pub duration: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            kind: WaveType::default(),
            frequency: default_frequency(),
            amplitude: default_amplitude(),
            duration: default_duration(),
        }
    }
}

fn default_frequency() -> f64 { 440.0 }
fn default_amplitude() -> f64 { 0.5 }
fn default_duration() -> f64 { 1.0 }

/// Equalizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EqualizerConfig {
    /// Whether the equalizer runs (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Gain in dB for 60, 170, 310, 600, 1k, 3k, 6k, 12k, 14k and 16k Hz
    #[serde(default = "default_gains")]
    pub gains: Vec<f64>,
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            gains: default_gains(),
        }
    }
}

fn default_gains() -> Vec<f64> { vec![0.0; BAND_COUNT] }

/// Resonator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonatorConfig {
    /// Whether the resonator runs (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// Cutoff frequency in Hz (default: 1000)
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,

    /// Resonance Q (default: 0.707)
    #[serde(default = "default_resonance")]
    pub resonance: f64,
}

impl Default for ResonatorConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            cutoff: default_cutoff(),
            resonance: default_resonance(),
        }
    }
}

fn default_cutoff() -> f64 { 1000.0 }
fn default_resonance() -> f64 { 0.707 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_audio_config() {
        let yaml = "device: Speakers";
        let config: AudioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sample_rate, 44100); // default
        assert_eq!(config.device.as_deref(), Some("Speakers"));
    }

    #[test]
    fn test_wave_config() {
        let yaml = r#"
type: saw
frequency: 220
amplitude: 0.8
duration: 2.5
"#;
        let config: WaveConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.kind, WaveType::Sawtooth);
        assert_eq!(config.frequency, 220.0);
        assert_eq!(config.amplitude, 0.8);
        assert_eq!(config.duration, 2.5);
    }

    #[test]
    fn test_unknown_wave_type_rejected() {
        let yaml = "type: triangle";
        assert!(serde_yaml::from_str::<WaveConfig>(yaml).is_err());
    }

    #[test]
    fn test_equalizer_config() {
        let yaml = r#"
enabled: true
gains: [3, 2, 1, 0, 0, 0, -1, -2, -3, -4]
"#;
        let config: EqualizerConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.enabled);
        assert_eq!(config.gains.len(), 10);
        assert_eq!(config.gains[9], -4.0);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: SynthConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SynthConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.to_request(), SynthesisRequest::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SynthConfig::default();
        config.audio.sample_rate = 4000;
        assert!(config.validate().is_err());

        let mut config = SynthConfig::default();
        config.wave.duration = -1.0;
        assert!(config.validate().is_err());

        let mut config = SynthConfig::default();
        config.wave.duration = MAX_DURATION_SECS + 1.0;
        assert!(config.validate().is_err());

        let mut config = SynthConfig::default();
        config.equalizer.gains.pop();
        assert!(config.validate().is_err());

        let mut config = SynthConfig::default();
        config.equalizer.gains[3] = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_resonator_is_valid_with_warnings() {
        let mut config = SynthConfig::default();
        config.resonator.enabled = true;
        config.resonator.resonance = 0.0;
        config.resonator.cutoff = 30000.0;

        assert!(config.validate().is_ok());
        assert_eq!(config.warnings().len(), 2);

        config.resonator.enabled = false;
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_to_request() {
        let mut config = SynthConfig::default();
        config.audio.sample_rate = 48000;
        config.wave.kind = WaveType::Square;
        config.resonator.enabled = true;
        config.resonator.cutoff = 2000.0;

        let request = config.to_request();
        assert_eq!(request.wave.sample_rate, 48000);
        assert_eq!(request.wave.wave_type, WaveType::Square);
        assert!(request.resonator.enabled);
        assert_eq!(request.resonator.params.cutoff, 2000.0);
        assert!(!request.equalizer.enabled);
    }
}
