//! Amplitude commands: gain, noise, fade, normalize.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use muta_core::{Augmentation, Normalization};

use super::common::{Context, run_augmentation};

/// Apply a gain, clip to [-1, 1], and renormalize.
#[derive(Args)]
pub struct GainArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Gain in dB
    #[arg(long = "db", allow_negative_numbers = true, default_value = "-6")]
    pub gain_db: f64,
}

/// Mix in Gaussian noise.
#[derive(Args)]
pub struct NoiseArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Signal-to-noise ratio in dB
    #[arg(long = "snr", allow_negative_numbers = true, default_value = "10")]
    pub snr_db: f64,
}

/// Hamming fade in and out.
#[derive(Args)]
pub struct FadeArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Trim silence first (needs the external transcoder)
    #[arg(long)]
    pub trim: bool,
}

/// Normalization technique on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub enum Technique {
    /// Divide by the peak amplitude
    Peak,
    /// Scale to `--level-db` RMS
    Rms,
}

/// Peak or RMS normalization.
#[derive(Args)]
pub struct NormalizeArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Normalization technique
    #[arg(long, value_enum, default_value_t = Technique::Peak)]
    pub technique: Technique,

    /// Target RMS level in dB (rms only)
    #[arg(long, allow_negative_numbers = true, default_value = "0")]
    pub level_db: f64,
}

/// Run the gain command.
pub fn gain(ctx: &Context, args: GainArgs) -> anyhow::Result<()> {
    let augmentation = Augmentation::Gain {
        gain_db: args.gain_db,
    };
    run_augmentation(ctx, &args.input, &augmentation, None)
}

/// Run the noise command.
pub fn noise(ctx: &Context, args: NoiseArgs) -> anyhow::Result<()> {
    let augmentation = Augmentation::Noise {
        snr_db: args.snr_db,
    };
    run_augmentation(ctx, &args.input, &augmentation, None)
}

/// Run the fade command.
pub fn fade(ctx: &Context, args: FadeArgs) -> anyhow::Result<()> {
    let augmentation = Augmentation::Fade {
        trim_silence: args.trim,
    };
    run_augmentation(ctx, &args.input, &augmentation, None)
}

/// Run the normalize command.
pub fn normalize(ctx: &Context, args: NormalizeArgs) -> anyhow::Result<()> {
    let technique = match args.technique {
        Technique::Peak => Normalization::Peak,
        Technique::Rms => Normalization::Rms {
            level_db: args.level_db,
        },
    };
    run_augmentation(ctx, &args.input, &Augmentation::Normalize(technique), None)
}
