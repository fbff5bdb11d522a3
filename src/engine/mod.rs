//! Synthesis pipeline and output collaborators
//!
//! Generates the requested wave, runs it through the enabled stages
//! (equalizer first, then resonator) and hands the finished
//! single-precision buffer to a sink.

mod buffer;
mod player;
mod recorder;

pub use buffer::SampleBuffer;
pub use player::{default_device_name, list_output_devices, Player};
pub use recorder::Recorder;

use tracing::{debug, warn};

use crate::error::Result;
use crate::synth::{self, Equalizer, Resonator, ResonatorParams, WaveSpec, BAND_COUNT};

/// Something that consumes a finished buffer (speakers, a WAV file)
pub trait Sink {
    /// Take the buffer; blocks until the sink is done with it
    fn deliver(self, buffer: &SampleBuffer) -> anyhow::Result<()>;
}

/// Equalizer stage settings
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizerSettings {
    pub enabled: bool,
    /// Gain in dB per band, paired positionally with `BAND_FREQUENCIES`
    pub gains: Vec<f64>,
}

impl Default for EqualizerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            gains: vec![0.0; BAND_COUNT],
        }
    }
}

/// Resonator stage settings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResonatorSettings {
    pub enabled: bool,
    pub params: ResonatorParams,
}

/// Everything needed for one synthesis run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SynthesisRequest {
    pub wave: WaveSpec,
    pub equalizer: EqualizerSettings,
    pub resonator: ResonatorSettings,
}

/// Generator followed by the optional equalizer and resonator stages
pub struct Pipeline;

impl Pipeline {
    /// Run the stages and return the double-precision signal.
    ///
    /// The stage order is fixed: equalizer, then resonator. No validation
    /// happens here beyond what each stage performs itself.
    pub fn run(request: &SynthesisRequest) -> Result<Vec<f64>> {
        let spec = request.wave;
        let mut wave = synth::generate(spec)?;
        debug!(
            wave_type = %spec.wave_type,
            frequency = spec.frequency,
            samples = wave.len(),
            "generated wave"
        );

        if request.equalizer.enabled {
            wave = Equalizer::apply(wave, spec.sample_rate, &request.equalizer.gains)?;
        }

        if request.resonator.enabled {
            wave = Resonator::apply(wave, spec.sample_rate, request.resonator.params);
        }

        Ok(wave)
    }
}

/// Run the pipeline and convert the result for playback
pub fn synthesize(request: &SynthesisRequest) -> Result<SampleBuffer> {
    let wave = Pipeline::run(request)?;
    let buffer = SampleBuffer::from_f64(&wave, request.wave.sample_rate);

    if !buffer.is_finite() {
        warn!("synthesized buffer contains NaN or infinite samples");
    }

    Ok(buffer)
}
