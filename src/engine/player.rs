//! Blocking audio playback using cpal

use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, SampleFormat, SampleRate, Stream, StreamConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, SyncSender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use super::{SampleBuffer, Sink};

/// Extra wait beyond the buffer length before giving up on the device
const PLAYBACK_GRACE: Duration = Duration::from_secs(2);

/// Time left for the device to play out its last period
const DRAIN_TIME: Duration = Duration::from_millis(150);

/// Plays one finished buffer on an output device
pub struct Player {
    device_name: Option<String>,
    stop: Arc<AtomicBool>,
}

impl Player {
    /// Create a player for the default output device
    pub fn new() -> Self {
        Self {
            device_name: None,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Use the output device with this name instead of the default
    pub fn with_device(mut self, name: Option<String>) -> Self {
        self.device_name = name;
        self
    }

    /// Flag that aborts playback when set (e.g. from a Ctrl-C handler)
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    fn open_device(&self) -> Result<Device> {
        let host = cpal::default_host();
        match &self.device_name {
            None => host
                .default_output_device()
                .ok_or_else(|| anyhow!("No output device available")),
            Some(wanted) => host
                .output_devices()?
                .find(|d| d.name().map(|n| &n == wanted).unwrap_or(false))
                .ok_or_else(|| anyhow!("Output device '{}' not found", wanted)),
        }
    }

    /// Play `buffer` and block until it has finished or the stop flag is set
    pub fn play(&self, buffer: &SampleBuffer) -> Result<()> {
        if buffer.is_empty() {
            info!("nothing to play");
            return Ok(());
        }

        let device = self.open_device()?;
        let default_config = device.default_output_config()?;
        let sample_format = default_config.sample_format();
        let stream_config = StreamConfig {
            channels: default_config.channels(),
            sample_rate: SampleRate(buffer.sample_rate()),
            buffer_size: BufferSize::Default,
        };

        info!(
            device = %device.name().unwrap_or_default(),
            sample_rate = buffer.sample_rate(),
            channels = stream_config.channels,
            samples = buffer.len(),
            "starting playback"
        );

        let (done_tx, done_rx) = mpsc::sync_channel(1);
        let samples = buffer.samples().to_vec();

        let stream = match sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(&device, &stream_config, samples, done_tx)?,
            SampleFormat::I16 => self.build_stream::<i16>(&device, &stream_config, samples, done_tx)?,
            SampleFormat::U16 => self.build_stream::<u16>(&device, &stream_config, samples, done_tx)?,
            other => return Err(anyhow!("Unsupported sample format: {:?}", other)),
        };
        stream.play()?;

        let deadline = Instant::now()
            + Duration::from_secs_f64(buffer.duration_secs())
            + PLAYBACK_GRACE;
        loop {
            match done_rx.recv_timeout(Duration::from_millis(50)) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) if Instant::now() > deadline => {
                    warn!("device did not finish playback in time");
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        std::thread::sleep(DRAIN_TIME);
        drop(stream);

        if self.stop.load(Ordering::SeqCst) {
            info!("playback stopped");
        } else {
            info!("playback finished");
        }
        Ok(())
    }

    fn build_stream<T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>>(
        &self,
        device: &Device,
        config: &StreamConfig,
        samples: Vec<f32>,
        done: SyncSender<()>,
    ) -> Result<Stream> {
        let channels = config.channels as usize;
        let stop = self.stop.clone();
        let mut position = 0usize;
        let mut signalled = false;

        let stream = device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        let next = if stop.load(Ordering::SeqCst) {
                            None
                        } else {
                            samples.get(position).copied()
                        };

                        let value = match next {
                            Some(sample) => {
                                position += 1;
                                sample
                            }
                            None => {
                                if !signalled {
                                    let _ = done.try_send(());
                                    signalled = true;
                                }
                                0.0
                            }
                        };

                        // Mono signal duplicated to every channel
                        for channel_sample in frame.iter_mut() {
                            *channel_sample = T::from_sample(value);
                        }
                    }
                },
                |err| {
                    error!("Audio stream error: {}", err);
                },
                None,
            )
            .with_context(|| format!("failed to open output stream at {} Hz", config.sample_rate.0))?;

        Ok(stream)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for Player {
    fn deliver(self, buffer: &SampleBuffer) -> Result<()> {
        self.play(buffer)
    }
}

/// Get the default output device name
pub fn default_device_name() -> Option<String> {
    let host = cpal::default_host();
    host.default_output_device()
        .and_then(|d| d.name().ok())
}

/// List all available output devices
pub fn list_output_devices() -> Vec<(String, StreamConfig)> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(output_devices) = host.output_devices() {
        for device in output_devices {
            if let (Ok(name), Ok(config)) = (device.name(), device.default_output_config()) {
                devices.push((name, config.into()));
            }
        }
    }

    devices
}
