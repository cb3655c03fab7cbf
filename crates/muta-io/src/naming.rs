//! Output file naming for augmented recordings.

use std::path::{Path, PathBuf};

use muta_core::{Augmentation, Waveform};

use crate::{Encoding, Result, encode};

const WAV_EXTENSION: &str = ".wav";

/// Input file name up to its `.wav` extension (matched case-insensitively).
///
/// Names without that extension are returned whole.
pub fn base_name(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let split = name.len().saturating_sub(WAV_EXTENSION.len());
    match name.get(split..) {
        Some(ext) if split > 0 && ext.eq_ignore_ascii_case(WAV_EXTENSION) => name[..split].to_string(),
        _ => name,
    }
}

/// Path of the augmented file next to `input`: `dir(input) / (base + suffix)`.
///
/// ```rust
/// use std::path::Path;
/// use muta_core::Augmentation;
/// use muta_io::output_path;
///
/// let out = output_path(Path::new("data/dog.wav"), &Augmentation::Reverse);
/// assert_eq!(out, Path::new("data/dog_augmented_reversed.wav"));
/// ```
pub fn output_path(input: &Path, augmentation: &Augmentation) -> PathBuf {
    let dir = input.parent().unwrap_or_else(|| Path::new(""));
    output_path_in(dir, input, augmentation)
}

/// Like [`output_path`] but placed in `dir` instead of the input's directory.
pub fn output_path_in(dir: &Path, input: &Path, augmentation: &Augmentation) -> PathBuf {
    dir.join(format!("{}{}", base_name(input), augmentation.suffix()))
}

/// Encode `wave` at [`output_path`] and return the path written.
pub fn write_augmented(
    input: impl AsRef<Path>,
    augmentation: &Augmentation,
    wave: &Waveform,
    encoding: Encoding,
) -> Result<PathBuf> {
    let path = output_path(input.as_ref(), augmentation);
    encode(wave, &path, encoding)?;
    tracing::info!(path = %path.display(), augmentation = augmentation.name(), "wrote augmented file");
    Ok(path)
}
