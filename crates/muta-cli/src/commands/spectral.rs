//! Spectral commands: convolution and Butterworth filtering.

use std::path::{Path, PathBuf};

use clap::Args;
use muta_core::{Augmentation, DEFAULT_ORDER, FilterBand, FilterKind};
use muta_io::{base_name, decode};

use super::common::{Context, run_augmentation};

/// Convolve with an impulse response.
#[derive(Args)]
pub struct ConvolveArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Impulse response WAV file
    #[arg(long)]
    pub ir: PathBuf,

    /// Wet level in [0, 1]
    #[arg(long, default_value = "0.5")]
    pub level: f64,

    /// Name used in the output file (defaults to the IR file name up to its first dot)
    #[arg(long)]
    pub name: Option<String>,
}

/// Butterworth filter.
#[derive(Args)]
pub struct FilterArgs {
    /// Input WAV file
    pub input: PathBuf,

    /// Band type: low, high or band
    #[arg(long, default_value = "low")]
    pub kind: FilterKind,

    /// Low cutoff in Hz (lowpass cutoff, bandpass lower edge)
    #[arg(long, default_value = "500")]
    pub low: f64,

    /// High cutoff in Hz (highpass cutoff, bandpass upper edge)
    #[arg(long)]
    pub high: Option<f64>,

    /// Filter order
    #[arg(long, default_value_t = DEFAULT_ORDER)]
    pub order: usize,
}

/// Run the convolve command.
pub fn convolve(ctx: &Context, args: ConvolveArgs) -> anyhow::Result<()> {
    let impulse_response = decode(&args.ir)?;
    let ir_name = args.name.unwrap_or_else(|| impulse_response_name(&args.ir));
    let augmentation = Augmentation::Convolve {
        ir_name,
        level: args.level,
    };
    run_augmentation(ctx, &args.input, &augmentation, Some(&impulse_response))
}

/// File name of `ir` up to its first dot, so `hall.v2.wav` names `hall`.
///
/// Dot files fall back to [`base_name`].
fn impulse_response_name(ir: &Path) -> String {
    let name = ir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split('.').next() {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => base_name(ir),
    }
}

/// Run the filter command.
pub fn filter(ctx: &Context, args: FilterArgs) -> anyhow::Result<()> {
    let band = FilterBand::from_cutoffs(args.kind, args.low, args.high)?;
    let augmentation = Augmentation::Filter {
        band,
        order: args.order,
    };
    run_augmentation(ctx, &args.input, &augmentation, None)
}
