//! Augmentation descriptors: one enum variant per operation, with the
//! parameters that identify it and the file-name suffix it produces.

use rand::Rng;

use crate::amplitude::{self, Normalization};
use crate::butterworth::FilterBand;
use crate::filter::apply_filter;
use crate::time::{self, Direction};
use crate::{Error, Result, Waveform, convolution};

/// Tempo change applied by the external transcoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tempo {
    /// Ratio in `[0.5, 1)`.
    SlowDown(f64),
    /// Ratio in `(1, 100]`.
    SpeedUp(f64),
}

impl Tempo {
    /// Smallest ratio the transcoder's tempo filter accepts.
    pub const MIN_RATIO: f64 = 0.5;
    /// Largest ratio the transcoder's tempo filter accepts.
    pub const MAX_RATIO: f64 = 100.0;
    /// Slow-down ratio used when none is given.
    pub const DEFAULT_SLOW_DOWN: f64 = 0.8;
    /// Speed-up ratio used when none is given.
    pub const DEFAULT_SPEED_UP: f64 = 1.25;

    /// Slow down by `ratio`, which must lie in `[0.5, 1)`.
    pub fn slow_down(ratio: f64) -> Result<Self> {
        if (Self::MIN_RATIO..1.0).contains(&ratio) {
            Ok(Tempo::SlowDown(ratio))
        } else {
            Err(Error::parameter(format!(
                "slow-down ratio must be within [{}, 1), got {ratio}",
                Self::MIN_RATIO
            )))
        }
    }

    /// Speed up by `ratio`, which must lie in `(1, 100]`.
    pub fn speed_up(ratio: f64) -> Result<Self> {
        if ratio > 1.0 && ratio <= Self::MAX_RATIO {
            Ok(Tempo::SpeedUp(ratio))
        } else {
            Err(Error::parameter(format!(
                "speed-up ratio must be within (1, {}], got {ratio}",
                Self::MAX_RATIO
            )))
        }
    }

    /// Pick the direction from the ratio itself. A ratio of exactly 1 is
    /// rejected since it changes nothing.
    pub fn from_ratio(ratio: f64) -> Result<Self> {
        if ratio < 1.0 {
            Self::slow_down(ratio)
        } else {
            Self::speed_up(ratio)
        }
    }

    /// Playback rate relative to the input.
    pub fn ratio(&self) -> f64 {
        match *self {
            Tempo::SlowDown(r) | Tempo::SpeedUp(r) => r,
        }
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Tempo::SlowDown(Self::DEFAULT_SLOW_DOWN)
    }
}

/// One augmentation with its parameters.
///
/// In-process variants run through [`Augmentation::apply`]. External
/// variants ([`is_external`](Self::is_external)) need the transcoder and are
/// rejected by `apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Augmentation {
    /// Gain, clip and mean-absolute renormalization.
    Gain {
        /// Gain in dB.
        gain_db: f64,
    },
    /// Additive Gaussian noise.
    Noise {
        /// Signal-to-noise ratio in dB.
        snr_db: f64,
    },
    /// Hamming fade, optionally preceded by silence trimming.
    Fade {
        /// Trim silence through the transcoder first.
        trim_silence: bool,
    },
    /// Peak or RMS normalization.
    Normalize(Normalization),
    /// Circular time shift.
    Shift {
        /// Shift amount in seconds.
        seconds: f64,
        /// Which way the content moves.
        direction: Direction,
    },
    /// Sample order reversal.
    Reverse,
    /// Random excerpt.
    Crop {
        /// Shortest excerpt in seconds.
        min_len_secs: f64,
    },
    /// Convolution with a named impulse response.
    Convolve {
        /// Name that appears in the output file name.
        ir_name: String,
        /// Wet level in `[0, 1]`.
        level: f64,
    },
    /// Butterworth filter.
    Filter {
        /// Band type and cutoffs.
        band: FilterBand,
        /// Filter order.
        order: usize,
    },
    /// Tempo change.
    Tempo(Tempo),
    /// Pitch change by resampling then retiming.
    Tone {
        /// Pitch factor; above 1 raises the pitch.
        tone: f64,
    },
    /// Sample-rate conversion.
    Resample {
        /// Target rate in Hz.
        sample_rate: u32,
    },
    /// Removal of silent stretches.
    TrimSilence,
}

impl Augmentation {
    /// Short operation name, matching the CLI subcommand.
    pub fn name(&self) -> &'static str {
        match self {
            Augmentation::Gain { .. } => "gain",
            Augmentation::Noise { .. } => "noise",
            Augmentation::Fade { .. } => "fade",
            Augmentation::Normalize(_) => "normalize",
            Augmentation::Shift { .. } => "shift",
            Augmentation::Reverse => "reverse",
            Augmentation::Crop { .. } => "crop",
            Augmentation::Convolve { .. } => "convolve",
            Augmentation::Filter { .. } => "filter",
            Augmentation::Tempo(_) => "tempo",
            Augmentation::Tone { .. } => "tone",
            Augmentation::Resample { .. } => "resample",
            Augmentation::TrimSilence => "trim",
        }
    }

    /// File-name suffix appended to the input's base name.
    ///
    /// ```rust
    /// use muta_core::Augmentation;
    ///
    /// let gain = Augmentation::Gain { gain_db: -50.0 };
    /// assert_eq!(gain.suffix(), "_augmented_with_-50_gain.wav");
    /// ```
    pub fn suffix(&self) -> String {
        match self {
            Augmentation::Gain { gain_db } => format!("_augmented_with_{gain_db}_gain.wav"),
            Augmentation::Noise { snr_db } => format!("_augmented_{snr_db}_noisy.wav"),
            Augmentation::Fade { .. } => "_augmented_fade_in_out.wav".to_string(),
            Augmentation::Normalize(technique) => {
                format!("_augmented_{}_normalized.wav", technique.name())
            }
            Augmentation::Shift { seconds, direction } => {
                format!("_augmented_{direction}_{seconds}_shifted.wav")
            }
            Augmentation::Reverse => "_augmented_reversed.wav".to_string(),
            Augmentation::Crop { min_len_secs } => {
                format!("_augmented_randomly_cropped_{min_len_secs}.wav")
            }
            Augmentation::Convolve { ir_name, level } => {
                format!("_augmented_{ir_name}_convolved_with_level_{level}.wav")
            }
            Augmentation::Filter { band, .. } => {
                format!("_augmented_{}_pass_filtered.wav", band.kind())
            }
            Augmentation::Tempo(Tempo::SlowDown(_)) => "_augmented_slowed.wav".to_string(),
            Augmentation::Tempo(Tempo::SpeedUp(_)) => "_augmented_speeded.wav".to_string(),
            Augmentation::Tone { tone } => format!("_augmented_{tone}_toned.wav"),
            Augmentation::Resample { sample_rate } => {
                format!("_augmented_resampled_to_{sample_rate}.wav")
            }
            Augmentation::TrimSilence => "_augmented_without_silence.wav".to_string(),
        }
    }

    /// Whether this variant needs the external transcoder.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Augmentation::Fade { trim_silence: true }
                | Augmentation::Tempo(_)
                | Augmentation::Tone { .. }
                | Augmentation::Resample { .. }
                | Augmentation::TrimSilence
        )
    }

    /// Run an in-process augmentation.
    ///
    /// `impulse_response` is only read by [`Augmentation::Convolve`], which
    /// fails with [`Error::Parameter`] when it is absent. `rng` drives noise
    /// and cropping. External variants fail with [`Error::Parameter`].
    pub fn apply<R: Rng + ?Sized>(
        &self,
        wave: &Waveform,
        impulse_response: Option<&Waveform>,
        rng: &mut R,
    ) -> Result<Waveform> {
        #[cfg(feature = "tracing")]
        tracing::debug!(augmentation = self.name(), len = wave.len(), "apply");

        match self {
            Augmentation::Gain { gain_db } => amplitude::apply_gain(wave, *gain_db),
            Augmentation::Noise { snr_db } => amplitude::add_noise(wave, *snr_db, rng),
            Augmentation::Fade {
                trim_silence: false,
            } => amplitude::fade_in_and_out(wave),
            Augmentation::Normalize(technique) => amplitude::normalize(wave, *technique),
            Augmentation::Shift { seconds, direction } => {
                time::shift_time(wave, *seconds, *direction)
            }
            Augmentation::Reverse => Ok(time::reverse(wave)),
            Augmentation::Crop { min_len_secs } => time::random_cropping(wave, *min_len_secs, rng),
            Augmentation::Convolve { ir_name, level } => {
                let ir = impulse_response.ok_or_else(|| {
                    Error::parameter(format!("impulse response '{ir_name}' was not provided"))
                })?;
                convolution::convolve(wave, ir, *level)
            }
            Augmentation::Filter { band, order } => apply_filter(wave, *band, *order),
            Augmentation::Fade { trim_silence: true }
            | Augmentation::Tempo(_)
            | Augmentation::Tone { .. }
            | Augmentation::Resample { .. }
            | Augmentation::TrimSilence => Err(Error::parameter(format!(
                "'{}' runs through the external transcoder",
                self.name()
            ))),
        }
    }
}
