//! Resonate - waveform synthesis with a resonator and a ten-band equalizer

use anyhow::Result;
use clap::Parser;
use cpal::traits::{DeviceTrait, HostTrait};
use resonate::config::{self, SynthConfig, EXAMPLE_CONFIG};
use resonate::engine::{self, Player, Recorder, SampleBuffer, Sink};
use resonate::synth::BAND_FREQUENCIES;
use std::sync::atomic::Ordering;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Cli, Commands, SynthArgs};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "resonate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play { synth } => {
            let cfg = load_with_overrides(&synth)?;
            let buffer = synthesize(&cfg)?;

            let player = Player::new().with_device(cfg.audio.device.clone());
            let stop = player.stop_flag();
            ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))?;

            println!("Playing... (Ctrl-C to stop)");
            player.deliver(&buffer)?;
        }

        Commands::Render { synth, output } => {
            let cfg = load_with_overrides(&synth)?;
            let buffer = synthesize(&cfg)?;

            println!("Rendering to {:?}...", output);
            Recorder::new(&output, buffer.sample_rate())?.deliver(&buffer)?;
            println!("Rendered {:.2}s to {:?}", buffer.duration_secs(), output);
        }

        Commands::Devices => {
            println!("Available audio devices:\n");

            match engine::default_device_name() {
                Some(name) => println!("Default output: {}\n", name),
                None => println!("No default output device\n"),
            }

            println!("Output devices:");
            let devices = engine::list_output_devices();
            if devices.is_empty() {
                println!("  (none)");
            }
            for (name, config) in devices {
                println!(
                    "  - {} ({} Hz, {} ch)",
                    name, config.sample_rate.0, config.channels
                );
            }

            // Supported rate ranges for the default device
            let host = cpal::default_host();
            if let Some(device) = host.default_output_device() {
                if let Ok(configs) = device.supported_output_configs() {
                    println!("\nDefault device sample rates:");
                    for range in configs {
                        println!(
                            "  {:?}: {}-{} Hz, {} ch",
                            range.sample_format(),
                            range.min_sample_rate().0,
                            range.max_sample_rate().0,
                            range.channels()
                        );
                    }
                }
            }
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    print_summary(&cfg);
                    for warning in cfg.warnings() {
                        println!("  Warning: {}", warning);
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let path = "resonate.yaml";
            if std::path::Path::new(path).exists() {
                println!("resonate.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, EXAMPLE_CONFIG)?;
                println!("Created resonate.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

/// Load the preset (or defaults), apply overrides and validate
fn load_with_overrides(args: &SynthArgs) -> Result<SynthConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            println!("Loading configuration from {:?}...", path);
            config::load_config(path)?
        }
        None => SynthConfig::default(),
    };

    args.apply(&mut cfg);
    cfg.validate()?;
    for warning in cfg.warnings() {
        tracing::warn!("{}", warning);
    }

    Ok(cfg)
}

fn synthesize(cfg: &SynthConfig) -> Result<SampleBuffer> {
    print_summary(cfg);

    let buffer = engine::synthesize(&cfg.to_request())?;
    println!(
        "  Output: {} samples, peak {:.3}, RMS {:.3}",
        buffer.len(),
        buffer.peak(),
        buffer.rms()
    );
    Ok(buffer)
}

fn print_summary(cfg: &SynthConfig) {
    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
    println!(
        "  Wave: {} {} Hz, amplitude {}, {}s",
        cfg.wave.kind, cfg.wave.frequency, cfg.wave.amplitude, cfg.wave.duration
    );

    if cfg.equalizer.enabled {
        let bands: Vec<String> = BAND_FREQUENCIES
            .iter()
            .zip(&cfg.equalizer.gains)
            .map(|(freq, gain)| format!("{}:{:+}", freq, gain))
            .collect();
        println!("  Equalizer: {}", bands.join(" "));
    } else {
        println!("  Equalizer: off");
    }

    if cfg.resonator.enabled {
        println!(
            "  Resonator: {} Hz, Q {}",
            cfg.resonator.cutoff, cfg.resonator.resonance
        );
    } else {
        println!("  Resonator: off");
    }
}
