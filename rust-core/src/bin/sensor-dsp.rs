//! Sensor DSP command line tool
//!
//! 1. `design`: print the FIR taps for the configured (or overridden) filter
//! 2. `spectrum`: run a synthetic tone through the filter chain and report
//!    the dominant bin of every channel
//! 3. `config`: print the effective configuration as YAML

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use sensor_dsp::filters::{BandType, WindowKind};
use sensor_dsp::signal::sine_frames;
use sensor_dsp::stream::FrameQueue;
use sensor_dsp::{ProcessingConfig, SignalChain, SENSOR_CHANNELS};

#[derive(Parser, Debug)]
#[command(name = "sensor-dsp")]
#[command(version)]
#[command(about = "Design FIR filters and inspect sensor spectra", long_about = None)]
struct Args {
    /// YAML configuration file (defaults are used when omitted)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the filter coefficients
    Design {
        /// Window: hanning, hamming, blackman, blackman-harris
        #[arg(short = 'w', long, value_parser = parse_window)]
        window: Option<WindowKind>,

        /// Band: low-pass, high-pass, band-pass
        #[arg(short = 'b', long, value_parser = parse_band)]
        band: Option<BandType>,

        /// Filter order L (L+1 taps)
        #[arg(short = 'n', long)]
        order: Option<usize>,

        /// Lower cutoff in Hz
        #[arg(long)]
        low: Option<f64>,

        /// Upper cutoff in Hz (band-pass)
        #[arg(long)]
        high: Option<f64>,
    },

    /// Filter a synthetic tone and report each channel's spectral peak
    Spectrum {
        /// Tone frequency in Hz
        #[arg(short = 'f', long, default_value_t = 12.5)]
        frequency: f64,

        /// Number of frames to generate
        #[arg(short = 'n', long, default_value_t = 4096)]
        frames: usize,
    },

    /// Print the effective configuration
    Config,
}

fn parse_window(s: &str) -> Result<WindowKind, String> {
    s.parse().map_err(|e: sensor_dsp::DspError| e.to_string())
}

fn parse_band(s: &str) -> Result<BandType, String> {
    s.parse().map_err(|e: sensor_dsp::DspError| e.to_string())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ProcessingConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ProcessingConfig::default(),
    };

    match args.command {
        Command::Design {
            window,
            band,
            order,
            low,
            high,
        } => {
            let filter = &mut config.filter;
            if let Some(window) = window {
                filter.window = window;
            }
            if let Some(band) = band {
                filter.band = band;
            }
            if let Some(order) = order {
                filter.order = order;
            }
            if let Some(low) = low {
                filter.low_cutoff_hz = low;
            }
            if let Some(high) = high {
                filter.high_cutoff_hz = high;
            }
            config.validate().context("invalid filter settings")?;

            let coefficients = config.filter.design().context("filter design failed")?;
            info!(
                "{} taps, DC gain {:.6}",
                coefficients.len(),
                coefficients.dc_gain()
            );
            for (i, tap) in coefficients.taps().iter().enumerate() {
                println!("{i:4} {tap:+.12e}");
            }
        }

        Command::Spectrum { frequency, frames } => {
            let mut chain = SignalChain::<SENSOR_CHANNELS>::from_config(&config)
                .context("building signal chain")?;
            let fs = chain.sample_rate_hz();

            let (mut producer, mut consumer) =
                FrameQueue::<SENSOR_CHANNELS>::new(config.queue_capacity).split();
            let tone = sine_frames([1.0, 0.5, 0.25], frequency, fs, frames);
            for block in tone.chunks(config.queue_capacity) {
                producer.push_slice(block);
                chain.drain(&mut consumer);
            }

            let spectrum = chain.spectrum().context("computing spectrum")?;
            for channel in 0..SENSOR_CHANNELS {
                match spectrum.dominant_bin(channel) {
                    Some(bin) => println!(
                        "channel {channel}: peak bin {bin} ({:.3} Hz), magnitude {:.6}",
                        spectrum.bin_frequency_hz(bin, fs),
                        spectrum.get(bin, channel)
                    ),
                    None => println!("channel {channel}: no non-DC bins"),
                }
            }
        }

        Command::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}
