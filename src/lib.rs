//! Resonate - waveform synthesis with a resonator and a ten-band equalizer
//!
//! Generates a sine, square or sawtooth wave, optionally shapes it with a
//! cascaded biquad equalizer and a resonant band-pass filter, and hands the
//! single-precision result to a playback or WAV sink.

pub mod config;
pub mod engine;
pub mod error;
pub mod synth;

pub use config::SynthConfig;
pub use engine::{synthesize, Pipeline, SampleBuffer, SynthesisRequest};
pub use error::{Result, SynthError};
