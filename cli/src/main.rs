use clap::{Parser, Subcommand};
use hound::{SampleFormat, WavSpec};
use log::{info, warn};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wavemodem_core::{CommConfig, Framer, ModeConfig, ModemRegistry};

#[derive(Parser)]
#[command(name = "wavemodem")]
#[command(about = "Acoustic modem: modulate bytes to audio and demodulate audio back to bytes")]
struct Cli {
    /// Path to the shared communication config (JSON)
    #[arg(long, global = true, default_value = "configs/communication_config.json")]
    comm_config: PathBuf,

    /// Path to the per-mode config; defaults to configs/<mode>_<direction>.json
    #[arg(long, global = true)]
    mode_config: Option<PathBuf>,

    /// Print detailed processing information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Modulate a byte buffer into a sound wave
    Modulate {
        /// Modulation mode
        #[arg(short, long, default_value = "ask")]
        mode: String,

        /// Input file, or the literal payload when no such file exists
        #[arg(short, long)]
        input: String,

        /// Output WAV path (16-bit mono PCM)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Demodulate a recorded sound wave back into a byte buffer
    Demodulate {
        /// Demodulation mode
        #[arg(short, long, default_value = "ask")]
        mode: String,

        /// Input WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the recovered bytes
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config file '{0}' not found")]
    ConfigNotFound(PathBuf),

    #[error("unsupported WAV layout: expected 16-bit integer samples")]
    UnsupportedWav,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let comm: CommConfig = load_json(&cli.comm_config)?;

    match cli.command {
        Commands::Modulate { mode, input, output } => {
            let mode_cfg = load_mode_config(&cli.mode_config, &mode, "modulator")?;
            modulate_command(&mode, comm, mode_cfg, &input, output.as_deref())
        }
        Commands::Demodulate { mode, input, output } => {
            let mode_cfg = load_mode_config(&cli.mode_config, &mode, "demodulator")?;
            demodulate_command(&mode, comm, mode_cfg, &input, output.as_deref())
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    if !path.is_file() {
        return Err(CliError::ConfigNotFound(path.to_path_buf()).into());
    }
    let file = File::open(path)?;
    Ok(serde_json::from_reader(file)?)
}

fn load_mode_config(
    explicit: &Option<PathBuf>,
    mode: &str,
    direction: &str,
) -> Result<ModeConfig, Box<dyn std::error::Error>> {
    let path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("configs/{mode}_{direction}.json")));
    load_json(&path)
}

/// Read the payload: a path to an existing file wins, anything else is
/// taken as a literal UTF-8 payload.
fn read_payload(input: &str) -> std::io::Result<Vec<u8>> {
    let path = Path::new(input);
    if path.is_file() {
        return std::fs::read(path);
    }
    if input.contains('/') && input.contains('.') {
        warn!("input looks like a path but no such file exists; treating it as literal data");
    }
    Ok(input.as_bytes().to_vec())
}

fn modulate_command(
    mode: &str,
    comm: CommConfig,
    mode_cfg: ModeConfig,
    input: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ModemRegistry::builtin();
    let modulator = registry.modulator(mode, comm.clone(), mode_cfg)?;

    let payload = read_payload(input)?;
    info!("modulating {} payload bytes with '{}'", payload.len(), mode);

    let bits = Framer::encode(&payload, &comm);
    let signal = modulator.modulate(&bits)?;
    info!(
        "generated {} samples at {} Hz ({:.2}s)",
        signal.samples.len(),
        signal.sample_rate,
        signal.samples.len() as f64 / f64::from(signal.sample_rate)
    );

    if let Some(path) = output {
        write_wav(path, &signal.samples, signal.sample_rate)?;
        info!("wrote waveform to '{}'", path.display());
    }
    Ok(())
}

fn demodulate_command(
    mode: &str,
    comm: CommConfig,
    mode_cfg: ModeConfig,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = ModemRegistry::builtin();
    let demodulator = registry.demodulator(mode, comm, mode_cfg)?;

    let (samples, sample_rate) = read_wav(input)?;
    info!(
        "demodulating {} samples at {} Hz from '{}'",
        samples.len(),
        sample_rate,
        input.display()
    );

    let result = demodulator.demodulate(&samples, sample_rate);
    if !result.crc_ok {
        warn!("integrity check failed; payload may be corrupted");
    }
    info!("recovered {} payload bytes", result.payload.len());
    println!("{}", String::from_utf8_lossy(&result.payload));

    if let Some(path) = output {
        std::fs::write(path, &result.payload)?;
        info!("wrote payload to '{}'", path.display());
    }
    Ok(())
}

fn write_wav(path: &Path, samples: &[f64], sample_rate: u32) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        let clamped = sample.clamp(-1.0, 1.0);
        writer.write_sample((clamped * 32767.0) as i16)?;
    }
    writer.finalize()
}

fn read_wav(path: &Path) -> Result<(Vec<f64>, u32), Box<dyn std::error::Error>> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(CliError::UnsupportedWav.into());
    }

    // mix interleaved channels down to mono, normalise to [-1, 1)
    let channels = spec.channels as usize;
    let raw: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;
    let samples: Vec<f64> = raw
        .chunks(channels)
        .map(|frame| {
            frame.iter().map(|&s| f64::from(s)).sum::<f64>() / frame.len() as f64 / 32768.0
        })
        .collect();

    Ok((samples, spec.sample_rate))
}
