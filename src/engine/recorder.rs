//! WAV file rendering
//!
//! Finished buffers go to disk as mono 32-bit float WAV, the same width the
//! pipeline hands to playback, so a render is bit-identical to what plays.

use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use super::{SampleBuffer, Sink};

/// Mono float WAV writer bound to one sample rate
pub struct Recorder {
    writer: WavWriter<BufWriter<File>>,
    sample_rate: u32,
    samples_written: u64,
}

impl Recorder {
    /// Open `path` for a mono float WAV at `sample_rate`, truncating any
    /// existing file
    pub fn new(path: &Path, sample_rate: u32) -> Result<Self> {
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let writer = WavWriter::create(path, spec)
            .with_context(|| format!("failed to create WAV file: {:?}", path))?;

        Ok(Self {
            writer,
            sample_rate,
            samples_written: 0,
        })
    }

    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples_written as f64 / self.sample_rate as f64
    }

    /// Append a buffer; its rate must match the file header
    pub fn append(&mut self, buffer: &SampleBuffer) -> Result<()> {
        if buffer.sample_rate() != self.sample_rate {
            bail!(
                "buffer is at {} Hz but the WAV file was opened at {} Hz",
                buffer.sample_rate(),
                self.sample_rate
            );
        }

        for &sample in buffer.samples() {
            self.writer
                .write_sample(sample)
                .context("failed to write sample")?;
        }
        self.samples_written += buffer.len() as u64;
        Ok(())
    }

    /// Patch the header lengths and flush; without this the file is truncated
    pub fn finalize(self) -> Result<()> {
        self.writer.finalize().context("failed to finalize WAV file")
    }
}

impl Sink for Recorder {
    fn deliver(mut self, buffer: &SampleBuffer) -> Result<()> {
        self.append(buffer)?;
        info!(
            samples = self.samples_written,
            seconds = self.duration_secs(),
            "rendered WAV"
        );
        self.finalize()
    }
}
