//! deckio - video I/O card control from the command line
//!
//! Lists the mode/format registry, reports devices and runs capture or
//! playback sessions described by a JSON config file. Streams run against
//! the simulated engine.

mod stream;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use deckio_core::{pack_tag, unpack_tag, DeckioConfig, DisplayMode, PixelFormat, SessionConfig};
use deckio_device::{DeckLink, SimulatedDriver};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "deckio")]
#[command(about = "Video I/O card control", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// List display modes
    Modes,
    /// List pixel formats
    Formats,
    /// Details of one display mode by registry name
    Mode { name: String },
    /// Driver API version
    Version,
    /// Attached devices as JSON
    Devices,
    /// Four-character tag of a numeric code (decimal or 0x hex)
    Tag {
        #[arg(value_parser = parse_code)]
        code: u32,
    },
    /// Numeric code of a four-character tag
    Code { tag: String },
    /// Write a sample config file
    Config { path: PathBuf },
    /// Capture the configured number of frames
    Capture { config: PathBuf },
    /// Play out the configured number of frames
    Playback { config: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Modes => list_modes(),
        Command::Formats => list_formats(),
        Command::Mode { name } => describe_mode(DisplayMode::parse_name(&name)?),
        Command::Version => {
            let deck = load()?;
            println!("{}", deck.version()?);
        }
        Command::Devices => {
            let deck = load()?;
            println!("{}", serde_json::to_string_pretty(&deck.devices()?)?);
        }
        Command::Tag { code } => println!("{}", unpack_tag(code)),
        Command::Code { tag } => {
            let code = pack_tag(&tag)?;
            println!("{code} (0x{code:08x})");
        }
        Command::Config { path } => write_sample_config(&path)?,
        Command::Capture { config } => stream::capture(&load()?, &read_config(&config)?)?,
        Command::Playback { config } => stream::playback(&load()?, &read_config(&config)?)?,
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<DeckioConfig> {
    DeckioConfig::load_from_file(path).with_context(|| format!("loading {}", path.display()))
}

fn load() -> Result<DeckLink<SimulatedDriver>> {
    let deck = DeckLink::load(SimulatedDriver::realtime())?;
    if let Some(model) = deck.first_device() {
        info!(model = %model, "Using device 0");
    }
    Ok(deck)
}

/// Decimal or `0x`-prefixed hexadecimal.
fn parse_code(text: &str) -> std::result::Result<u32, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|err| format!("invalid code {text:?}: {err}"))
}

fn list_modes() {
    println!(
        "{:<28} {:<6} {:>11} {:>13} {:>10} {:<10}",
        "name", "tag", "size", "duration", "rate", "scan"
    );
    for mode in DisplayMode::ALL {
        let scan = if mode.is_interlaced() {
            "interlaced"
        } else {
            "progressive"
        };
        println!(
            "{:<28} {:<6} {:>11} {:>13} {:>10} {:<10}",
            mode.name(),
            mode.code().tag(),
            format!("{}x{}", mode.width(), mode.height()),
            mode.grain_duration().to_string(),
            mode.frame_rate().to_string(),
            scan
        );
    }
}

fn describe_mode(mode: DisplayMode) {
    println!("{} ({})", mode.name(), mode.code().tag());
    println!("  size      {}x{}", mode.width(), mode.height());
    println!("  duration  {}", mode.grain_duration());
    println!("  rate      {}", mode.frame_rate());
    println!("  dominance {}", mode.field_dominance().name());
}

fn list_formats() {
    println!(
        "{:<28} {:<6} {:>5} {:<6} {:<12} {:<12}",
        "name", "code", "bits", "fourcc", "sampling", "colorimetry"
    );
    for format in PixelFormat::ALL {
        println!(
            "{:<28} {:<6} {:>5} {:<6} {:<12} {:<12}",
            format.name(),
            format.tag().unwrap_or_else(|| format.code().0.to_string()),
            format.bit_depth(),
            format.fourcc(),
            format.sampling(),
            format.colorimetry()
        );
    }
}

fn write_sample_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let session = SessionConfig::new(0, DisplayMode::Hd1080i50, PixelFormat::Yuv10);
    let config = DeckioConfig {
        capture: Some(session),
        playback: Some(session),
        ..DeckioConfig::default()
    };
    config.save_to_file(path)?;
    info!(path = %path.display(), "Sample config written");
    Ok(())
}
