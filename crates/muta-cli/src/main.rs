//! Muta CLI - apply one audio augmentation to one WAV file.

mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use muta_config::Settings;
use muta_io::Encoding;
use tracing_subscriber::EnvFilter;

use commands::common::Context;

#[derive(Parser)]
#[command(name = "muta")]
#[command(author, version, about = "Audio augmentation for training corpora", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Settings file (defaults to the user config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write outputs here instead of next to the input
    #[arg(long, global = true, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Seed for noise and cropping
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output encoding, overriding the settings file
    #[arg(long, global = true)]
    encoding: Option<Encoding>,

    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a gain in dB, clip, and renormalize
    Gain(commands::amplitude::GainArgs),

    /// Mix in Gaussian noise at a signal-to-noise ratio
    Noise(commands::amplitude::NoiseArgs),

    /// Fade in and out with a Hamming window
    Fade(commands::amplitude::FadeArgs),

    /// Peak or RMS normalization
    Normalize(commands::amplitude::NormalizeArgs),

    /// Circularly shift in time
    Shift(commands::time::ShiftArgs),

    /// Reverse the recording
    Reverse(commands::time::ReverseArgs),

    /// Crop a random excerpt
    Crop(commands::time::CropArgs),

    /// Convolve with an impulse response
    Convolve(commands::spectral::ConvolveArgs),

    /// Butterworth low/high/band-pass filter
    Filter(commands::spectral::FilterArgs),

    /// Slow down or speed up (external transcoder)
    Tempo(commands::external::TempoArgs),

    /// Shift pitch (external transcoder)
    Tone(commands::external::ToneArgs),

    /// Resample (external transcoder)
    Resample(commands::external::ResampleArgs),

    /// Remove silence (external transcoder)
    Trim(commands::external::TrimArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        command => {
            let settings = Settings::load_or_default(cli.global.config.as_deref())?;
            let ctx = Context::new(
                settings,
                cli.global.out_dir,
                cli.global.seed,
                cli.global.encoding,
            );
            dispatch(&ctx, command)
        }
    }
}

fn dispatch(ctx: &Context, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Gain(args) => commands::amplitude::gain(ctx, args),
        Commands::Noise(args) => commands::amplitude::noise(ctx, args),
        Commands::Fade(args) => commands::amplitude::fade(ctx, args),
        Commands::Normalize(args) => commands::amplitude::normalize(ctx, args),
        Commands::Shift(args) => commands::time::shift(ctx, args),
        Commands::Reverse(args) => commands::time::reverse(ctx, args),
        Commands::Crop(args) => commands::time::crop(ctx, args),
        Commands::Convolve(args) => commands::spectral::convolve(ctx, args),
        Commands::Filter(args) => commands::spectral::filter(ctx, args),
        Commands::Tempo(args) => commands::external::tempo(ctx, args),
        Commands::Tone(args) => commands::external::tone(ctx, args),
        Commands::Resample(args) => commands::external::resample(ctx, args),
        Commands::Trim(args) => commands::external::trim(ctx, args),
        Commands::Info(args) => commands::info::run(args),
    }
}
