//! CLI interface for Resonate

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use resonate::config::SynthConfig;
use resonate::synth::WaveType;

/// Waveform synthesizer with a resonator and a ten-band equalizer
#[derive(Parser)]
#[command(name = "resonate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Synthesize and play through the output device
    Play {
        #[command(flatten)]
        synth: SynthArgs,
    },

    /// Synthesize to a WAV file
    Render {
        #[command(flatten)]
        synth: SynthArgs,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List available audio devices
    Devices,

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "resonate.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}

/// Preset file plus per-run overrides
#[derive(Args)]
pub struct SynthArgs {
    /// Configuration file path (built-in defaults if omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Wave type: sine, square or sawtooth
    #[arg(short, long)]
    pub wave: Option<WaveType>,

    /// Frequency in Hz
    #[arg(short, long)]
    pub frequency: Option<f64>,

    /// Amplitude (0.0 to 1.0)
    #[arg(short, long)]
    pub amplitude: Option<f64>,

    /// Duration in seconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Enable the equalizer
    #[arg(long)]
    pub eq: bool,

    /// Ten comma-separated equalizer gains in dB
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub gains: Option<Vec<f64>>,

    /// Enable the resonator
    #[arg(long)]
    pub resonator: bool,

    /// Resonator cutoff frequency in Hz
    #[arg(long)]
    pub cutoff: Option<f64>,

    /// Resonator Q
    #[arg(long)]
    pub resonance: Option<f64>,
}

impl SynthArgs {
    /// Apply command-line overrides on top of a loaded preset
    pub fn apply(&self, config: &mut SynthConfig) {
        if let Some(wave) = self.wave {
            config.wave.kind = wave;
        }
        if let Some(frequency) = self.frequency {
            config.wave.frequency = frequency;
        }
        if let Some(amplitude) = self.amplitude {
            config.wave.amplitude = amplitude;
        }
        if let Some(duration) = self.duration {
            config.wave.duration = duration;
        }
        if let Some(sample_rate) = self.sample_rate {
            config.audio.sample_rate = sample_rate;
        }
        if self.eq {
            config.equalizer.enabled = true;
        }
        if let Some(gains) = &self.gains {
            config.equalizer.gains = gains.clone();
        }
        if self.resonator {
            config.resonator.enabled = true;
        }
        if let Some(cutoff) = self.cutoff {
            config.resonator.cutoff = cutoff;
        }
        if let Some(resonance) = self.resonance {
            config.resonator.resonance = resonance;
        }
    }
}
