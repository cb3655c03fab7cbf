//! Compositions of external and in-process stages.

use std::path::Path;

use muta_core::{Augmentation, Waveform, fade_in_and_out};
use muta_io::{Encoding, decode, encode, read_wav_info};

use crate::transcoder::{SilenceParams, Transcoder};
use crate::Result;

/// Settings an external augmentation may need besides its own parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExternalOptions {
    /// Thresholds for silence trimming.
    pub silence: SilenceParams,
    /// Encoding for outputs written by muta rather than the transcoder.
    pub encoding: Encoding,
}

/// Trim silence from an in-memory waveform.
///
/// The waveform is written to a private temporary directory, trimmed there
/// by the transcoder and decoded back. The directory is removed on return.
pub fn trim_silence_wave<T: Transcoder + ?Sized>(
    transcoder: &T,
    wave: &Waveform,
    params: SilenceParams,
) -> Result<Waveform> {
    let workspace = tempfile::tempdir().map_err(muta_io::Error::from)?;
    let input = workspace.path().join("untrimmed.wav");
    let output = workspace.path().join("trimmed.wav");

    encode(wave, &input, Encoding::Float32)?;
    transcoder.trim_silence(&input, &output, params)?;
    let trimmed = decode(&output)?;

    tracing::debug!(before = wave.len(), after = trimmed.len(), "trimmed silence");
    Ok(trimmed)
}

/// Trim silence, then apply the Hamming fade.
pub fn fade_in_and_out_trimmed<T: Transcoder + ?Sized>(
    transcoder: &T,
    wave: &Waveform,
    params: SilenceParams,
) -> Result<Waveform> {
    let trimmed = trim_silence_wave(transcoder, wave, params)?;
    Ok(fade_in_and_out(&trimmed)?)
}

/// Run an external augmentation from `input` to `output`.
///
/// In-process variants are rejected with a parameter error.
pub fn apply_external<T: Transcoder + ?Sized>(
    transcoder: &T,
    augmentation: &Augmentation,
    input: &Path,
    output: &Path,
    options: &ExternalOptions,
) -> Result<()> {
    match augmentation {
        Augmentation::Tempo(tempo) => transcoder.change_tempo(input, output, tempo.ratio()),
        Augmentation::Resample { sample_rate } => transcoder.resample(input, output, *sample_rate),
        Augmentation::Tone { tone } => {
            let source_rate = read_wav_info(input)?.sample_rate;
            transcoder.change_tone(input, output, source_rate, *tone)
        }
        Augmentation::TrimSilence => transcoder.trim_silence(input, output, options.silence),
        Augmentation::Fade { trim_silence: true } => {
            let wave = decode(input)?;
            let faded = fade_in_and_out_trimmed(transcoder, &wave, options.silence)?;
            encode(&faded, output, options.encoding)?;
            Ok(())
        }
        other => Err(muta_core::Error::parameter(format!(
            "'{}' runs in process, not through the transcoder",
            other.name()
        ))
        .into()),
    }
}
