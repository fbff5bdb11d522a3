//! Signal generation and filtering
//!
//! Contains the waveform generator, the biquad designer and filter, and the
//! resonator and equalizer stages built on top of them.

mod oscillator;
mod filter;
mod resonator;
mod equalizer;

pub use oscillator::{generate, WaveSpec, WaveType};
pub use filter::{BiquadCoefficients, BiquadFilter, FilterKind};
pub use resonator::{Resonator, ResonatorParams};
pub use equalizer::{Equalizer, EqualizerBand, BAND_COUNT, BAND_FREQUENCIES};
