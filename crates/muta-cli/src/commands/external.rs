//! Commands that run through the external transcoder.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use muta_core::{Augmentation, Tempo};

use super::common::{Context, run_augmentation};

/// Tempo direction on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum TempoMode {
    /// Ratio in [0.5, 1)
    Slow,
    /// Ratio in (1, 100]
    Speed,
}

/// Change tempo without changing pitch.
#[derive(Args)]
pub struct TempoArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Slow down or speed up
    #[arg(long, value_enum, default_value_t = TempoMode::Slow)]
    pub mode: TempoMode,

    /// Tempo ratio (defaults to 0.8 for slow, 1.25 for speed)
    #[arg(long)]
    pub ratio: Option<f64>,
}

/// Shift pitch.
#[derive(Args)]
pub struct ToneArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Pitch factor (above 1 raises the pitch)
    #[arg(long, default_value = "1.1")]
    pub tone: f64,
}

/// Resample to a new rate.
#[derive(Args)]
pub struct ResampleArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Target sample rate in Hz
    #[arg(long, default_value = "16000")]
    pub rate: u32,
}

/// Remove silent stretches.
#[derive(Args)]
pub struct TrimArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Silence threshold in dB (overrides the settings file)
    #[arg(long, allow_negative_numbers = true)]
    pub threshold_db: Option<f64>,

    /// Minimum silence duration in seconds (overrides the settings file)
    #[arg(long)]
    pub min_duration: Option<f64>,
}

/// Run the tempo command.
pub fn tempo(ctx: &Context, args: TempoArgs) -> anyhow::Result<()> {
    let tempo = match args.mode {
        TempoMode::Slow => Tempo::slow_down(args.ratio.unwrap_or(Tempo::DEFAULT_SLOW_DOWN))?,
        TempoMode::Speed => Tempo::speed_up(args.ratio.unwrap_or(Tempo::DEFAULT_SPEED_UP))?,
    };
    run_augmentation(ctx, &args.input, &Augmentation::Tempo(tempo), None)
}

/// Run the tone command.
pub fn tone(ctx: &Context, args: ToneArgs) -> anyhow::Result<()> {
    let augmentation = Augmentation::Tone { tone: args.tone };
    run_augmentation(ctx, &args.input, &augmentation, None)
}

/// Run the resample command.
pub fn resample(ctx: &Context, args: ResampleArgs) -> anyhow::Result<()> {
    let augmentation = Augmentation::Resample {
        sample_rate: args.rate,
    };
    run_augmentation(ctx, &args.input, &augmentation, None)
}

/// Run the trim command.
pub fn trim(ctx: &Context, args: TrimArgs) -> anyhow::Result<()> {
    let ctx = ctx.with_silence(args.threshold_db, args.min_duration);
    run_augmentation(&ctx, &args.input, &Augmentation::TrimSilence, None)
}
