//! Inspect a WAV file before augmenting it.

use std::path::PathBuf;

use clap::Args;
use muta_io::{WavFormat, WavInfo, read_wav_info};

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: PathBuf,

    /// Print the metadata as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let size = std::fs::metadata(&args.file)?.len();
    for (label, value) in report(&args.file, &info, size) {
        println!("{label:<13}{value}");
    }
    Ok(())
}

/// Label/value rows of the text report.
fn report(file: &std::path::Path, info: &WavInfo, size: u64) -> Vec<(&'static str, String)> {
    let encoding = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    let mut rows = vec![
        ("File:", file.display().to_string()),
        ("Format:", format!("{encoding} {}-bit", info.bits_per_sample)),
        ("Channels:", info.channels.to_string()),
        ("Sample Rate:", format!("{} Hz", info.sample_rate)),
        (
            "Duration:",
            format!("{:.3}s ({} frames)", info.duration_secs, info.num_frames),
        ),
        ("Size:", human_size(size)),
    ];
    if info.channels > 1 {
        rows.push(("Note:", "augmentations read channel 0 only".to_string()));
    }
    rows
}

/// Size in the largest binary unit that keeps the value at or above 1.
fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_size_units() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.0 KiB");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MiB");
        assert_eq!(human_size(5 * 1024 * 1024 * 1024), "5.0 GiB");
    }

    #[test]
    fn stereo_report_notes_first_channel() {
        let info = WavInfo {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            num_frames: 44100,
            duration_secs: 1.0,
            format: WavFormat::Pcm,
        };
        let rows = report(std::path::Path::new("a.wav"), &info, 10);
        assert!(rows.iter().any(|(label, _)| *label == "Note:"));
        assert!(rows.contains(&("Format:", "PCM 16-bit".to_string())));
    }
}
