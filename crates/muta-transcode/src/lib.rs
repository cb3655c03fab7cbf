//! External-tool augmentations for muta.
//!
//! Tempo, pitch, resampling and silence trimming are delegated to an
//! external transcoder behind the [`Transcoder`] trait. [`Ffmpeg`] is the
//! production implementation; tests substitute their own.
//!
//! - [`Transcoder`] - one method per external capability
//! - [`Ffmpeg`] - process runner with argument vectors and a timeout
//! - [`trim_silence_wave`] / [`fade_in_and_out_trimmed`] - in-memory
//!   compositions through a temporary directory
//! - [`apply_external`] - dispatch an external [`Augmentation`](muta_core::Augmentation)
//!
//! ```rust,no_run
//! use std::path::Path;
//! use muta_transcode::{Ffmpeg, Transcoder};
//!
//! let ffmpeg = Ffmpeg::locate(std::time::Duration::from_secs(300)).unwrap();
//! ffmpeg
//!     .change_tempo(Path::new("in.wav"), Path::new("in_augmented_slowed.wav"), 0.8)
//!     .unwrap();
//! ```

mod compose;
mod ffmpeg;
mod transcoder;

use std::path::PathBuf;
use std::time::Duration;

pub use compose::{ExternalOptions, apply_external, fade_in_and_out_trimmed, trim_silence_wave};
pub use ffmpeg::{DEFAULT_PROGRAM, Ffmpeg};
pub use muta_core::Tempo;
pub use transcoder::{SilenceParams, Transcoder, validate_rate, validate_tempo_ratio, validate_tone};

/// Errors from running the external transcoder.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transcoder executable could not be located.
    #[error("transcoder '{program}' not found on PATH")]
    ToolNotFound {
        /// Program name that was searched for.
        program: String,
    },

    /// The process could not be started.
    #[error("failed to start '{}': {source}", .program.display())]
    Spawn {
        /// Program that failed to start.
        program: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The process exited unsuccessfully.
    #[error("transcoder exited with {}: {stderr}", .code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    ToolFailed {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The process exited successfully but left no output file.
    #[error("transcoder produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    /// The process ran past its timeout and was killed.
    #[error("transcoder timed out after {timeout:?}")]
    Timeout {
        /// The timeout that expired.
        timeout: Duration,
    },

    /// Reading or writing audio around the transcoder failed.
    #[error(transparent)]
    Io(#[from] muta_io::Error),

    /// Invalid parameters or a failing in-process stage.
    #[error(transparent)]
    Core(#[from] muta_core::Error),
}

/// Convenience result type for transcoder operations.
pub type Result<T> = std::result::Result<T, Error>;
