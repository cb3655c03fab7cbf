//! Time-domain commands: shift, reverse, crop.

use std::path::PathBuf;

use clap::Args;
use muta_core::{Augmentation, Direction};

use super::common::{Context, run_augmentation};

/// Circular time shift.
#[derive(Args)]
pub struct ShiftArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Shift amount in seconds
    #[arg(long, default_value = "0.5")]
    pub seconds: f64,

    /// Shift direction (left or right)
    #[arg(long, default_value = "right")]
    pub direction: Direction,
}

/// Reverse the samples.
#[derive(Args)]
pub struct ReverseArgs {
    /// Input WAV file
    pub input: PathBuf,
}

/// Crop a random excerpt of at least `--min-len` seconds.
#[derive(Args)]
pub struct CropArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Minimum excerpt length in seconds
    #[arg(long = "min-len", default_value = "1")]
    pub min_len_secs: f64,
}

/// Run the shift command.
pub fn shift(ctx: &Context, args: ShiftArgs) -> anyhow::Result<()> {
    let augmentation = Augmentation::Shift {
        seconds: args.seconds,
        direction: args.direction,
    };
    run_augmentation(ctx, &args.input, &augmentation, None)
}

/// Run the reverse command.
pub fn reverse(ctx: &Context, args: ReverseArgs) -> anyhow::Result<()> {
    run_augmentation(ctx, &args.input, &Augmentation::Reverse, None)
}

/// Run the crop command.
pub fn crop(ctx: &Context, args: CropArgs) -> anyhow::Result<()> {
    let augmentation = Augmentation::Crop {
        min_len_secs: args.min_len_secs,
    };
    run_augmentation(ctx, &args.input, &augmentation, None)
}
