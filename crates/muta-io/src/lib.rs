//! WAV I/O for muta.
//!
//! This crate provides:
//!
//! - **Decoding**: [`decode`] loads channel 0 of a WAV file as a [`Waveform`](muta_core::Waveform)
//! - **Encoding**: [`encode`] writes a waveform as 32-bit float or 16-bit PCM
//! - **Metadata**: [`read_wav_info`] reads the header without loading samples
//! - **Naming**: [`output_path`] and [`write_augmented`] place augmented
//!   files next to their source
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use muta_core::Augmentation;
//! use muta_io::{Encoding, decode, write_augmented};
//!
//! let wave = decode("speech.wav")?;
//! let reversed = muta_core::reverse(&wave);
//! // writes speech_augmented_reversed.wav
//! write_augmented("speech.wav", &Augmentation::Reverse, &reversed, Encoding::Float32)?;
//! ```

mod naming;
mod wav;

use std::path::PathBuf;

pub use naming::{base_name, output_path, output_path_in, write_augmented};
pub use wav::{Encoding, WavFormat, WavInfo, decode, encode, read_wav_info};

/// Error types for WAV I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV container read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// The destination directory does not exist.
    #[error("Output directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// The file's sample format cannot be decoded.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// Decoded header values do not form a valid waveform.
    #[error(transparent)]
    Core(#[from] muta_core::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for WAV I/O.
pub type Result<T> = std::result::Result<T, Error>;
