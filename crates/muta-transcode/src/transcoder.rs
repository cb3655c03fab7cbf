//! The transcoder interface and its parameter checks.

use std::path::Path;

use muta_config::TranscoderSettings;
use muta_core::Tempo;

use crate::Result;

/// Silence trimming thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceParams {
    /// Level below which audio counts as silence, in dB.
    pub threshold_db: f64,
    /// Shortest stretch of silence that gets removed, in seconds.
    pub min_duration_secs: f64,
}

impl Default for SilenceParams {
    fn default() -> Self {
        Self {
            threshold_db: muta_config::DEFAULT_SILENCE_THRESHOLD_DB,
            min_duration_secs: muta_config::DEFAULT_SILENCE_MIN_DURATION_SECS,
        }
    }
}

impl SilenceParams {
    /// Thresholds from the `[transcoder]` settings table.
    pub fn from_settings(settings: &TranscoderSettings) -> Self {
        Self {
            threshold_db: settings.silence_threshold_db,
            min_duration_secs: settings.silence_min_duration_secs,
        }
    }

    /// Reject non-finite values and a non-positive duration.
    pub fn validate(&self) -> Result<()> {
        if !self.threshold_db.is_finite() {
            return Err(muta_core::Error::parameter(format!(
                "silence threshold must be finite, got {}",
                self.threshold_db
            ))
            .into());
        }
        if !(self.min_duration_secs.is_finite() && self.min_duration_secs > 0.0) {
            return Err(muta_core::Error::parameter(format!(
                "minimum silence duration must be positive, got {}",
                self.min_duration_secs
            ))
            .into());
        }
        Ok(())
    }
}

/// External audio transcoder, one method per capability.
///
/// Each call reads `input` and writes only `output`. Implementations must
/// not retry; a failure is returned to the caller as is.
pub trait Transcoder {
    /// Change tempo without changing pitch. `ratio` lies in `[0.5, 100]`.
    fn change_tempo(&self, input: &Path, output: &Path, ratio: f64) -> Result<()>;

    /// Resample to `sample_rate` Hz.
    fn resample(&self, input: &Path, output: &Path, sample_rate: u32) -> Result<()>;

    /// Shift pitch by `tone` (a frequency ratio), keeping the input's
    /// `source_rate` in the output.
    fn change_tone(&self, input: &Path, output: &Path, source_rate: u32, tone: f64)
    -> Result<()>;

    /// Remove stretches of silence.
    fn trim_silence(&self, input: &Path, output: &Path, params: SilenceParams) -> Result<()>;
}

/// Check a tempo ratio against the range the transcoder accepts.
pub fn validate_tempo_ratio(ratio: f64) -> Result<()> {
    if (Tempo::MIN_RATIO..=Tempo::MAX_RATIO).contains(&ratio) {
        Ok(())
    } else {
        Err(muta_core::Error::parameter(format!(
            "tempo ratio must be within [{}, {}], got {ratio}",
            Tempo::MIN_RATIO,
            Tempo::MAX_RATIO
        ))
        .into())
    }
}

/// Check a target sample rate.
pub fn validate_rate(sample_rate: u32) -> Result<()> {
    if sample_rate == 0 {
        return Err(muta_core::Error::parameter("target sample rate must be positive").into());
    }
    Ok(())
}

/// Check a tone ratio.
pub fn validate_tone(tone: f64) -> Result<()> {
    if tone.is_finite() && tone > 0.0 {
        Ok(())
    } else {
        Err(muta_core::Error::parameter(format!("tone must be positive, got {tone}")).into())
    }
}
