//! Amplitude-domain augmentations: gain, noise injection, fades, normalization.
//!
//! Most transforms here end with a mean-absolute-amplitude normalization
//! ([`normalize_mean_abs`]) so perceived loudness stays comparable across
//! parameter settings. That step fails with
//! [`Error::NumericDegeneracy`] on silent input instead of emitting NaN.

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

use rand::Rng;

use crate::math::{db_to_linear, ensure_finite, hard_clip, normalize_mean_abs, peak, rms};
use crate::{Error, Result, Waveform};

/// Multiply by `10^(gain_db / 20)` and hard-clip to `[-1, 1]`.
///
/// This is the stage of [`apply_gain`] before renormalization. With strong
/// attenuation the result can sit below 16-bit resolution; that is kept as
/// is rather than clamped away.
pub fn scale_and_clip(wave: &Waveform, gain_db: f64) -> Result<Waveform> {
    if !gain_db.is_finite() {
        return Err(Error::parameter(format!("gain must be finite, got {gain_db}")));
    }
    let factor = db_to_linear(gain_db);

    #[cfg(feature = "tracing")]
    tracing::debug!(gain_db, factor, "scale_and_clip");

    Ok(wave.with_samples(
        wave.samples()
            .iter()
            .map(|&x| hard_clip(x * factor))
            .collect(),
    ))
}

/// Apply a gain in dB, hard-clip, then renormalize by mean absolute amplitude.
///
/// Positive values amplify, negative values attenuate. Very negative gains
/// push the signal toward silence and the renormalization then inflates
/// whatever remains; that side effect is accepted. A signal that reaches
/// exact zero fails with [`Error::NumericDegeneracy`].
///
/// # Example
///
/// ```rust
/// use muta_core::{Waveform, amplitude::apply_gain, math::mean_abs};
///
/// let wave = Waveform::new(vec![0.1, -0.2, 0.3, -0.4], 8000).unwrap();
/// let out = apply_gain(&wave, 6.0).unwrap();
/// assert!((mean_abs(out.samples()) - 1.0).abs() < 1e-12);
/// ```
pub fn apply_gain(wave: &Waveform, gain_db: f64) -> Result<Waveform> {
    let scaled = scale_and_clip(wave, gain_db)?;
    Ok(wave.with_samples(normalize_mean_abs(scaled.into_samples())?))
}

/// Draw `len` samples of zero-mean, unit-variance Gaussian noise.
///
/// Uses the Box-Muller transform on the supplied generator.
pub fn gaussian_noise<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<f64> {
    let mut noise = Vec::with_capacity(len + 1);
    while noise.len() < len {
        // 1 - U[0, 1) keeps the log argument away from zero
        let u1: f64 = 1.0 - rng.r#gen::<f64>();
        let u2: f64 = rng.r#gen::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * PI * u2;
        noise.push(radius * theta.cos());
        noise.push(radius * theta.sin());
    }
    noise.truncate(len);
    noise
}

/// Mix Gaussian noise into the signal and restore the original RMS.
///
/// The noise is scaled by `(rms_signal / rms_noise) * 10^(snr_db / 20)`,
/// summed with the signal, and the sum is rescaled so its RMS equals the
/// input RMS. This is the stage of [`add_noise`] before renormalization.
pub fn mix_noise<R: Rng + ?Sized>(wave: &Waveform, snr_db: f64, rng: &mut R) -> Result<Waveform> {
    if !snr_db.is_finite() {
        return Err(Error::parameter(format!("SNR must be finite, got {snr_db}")));
    }

    let signal = wave.samples();
    let rms_signal = rms(signal);
    if rms_signal == 0.0 {
        return Err(Error::degenerate("signal has zero power"));
    }

    let noise = gaussian_noise(signal.len(), rng);
    let rms_noise = rms(&noise);
    if rms_noise == 0.0 {
        return Err(Error::degenerate("generated noise has zero power"));
    }

    let noise_factor = (rms_signal / rms_noise) * db_to_linear(snr_db);
    let mut mixed: Vec<f64> = signal
        .iter()
        .zip(&noise)
        .map(|(&s, &n)| s + n * noise_factor)
        .collect();

    let rms_mixed = rms(&mixed);
    if rms_mixed == 0.0 || !rms_mixed.is_finite() {
        return Err(Error::degenerate(format!("noisy mix has RMS {rms_mixed}")));
    }
    let correction = rms_signal / rms_mixed;
    for s in &mut mixed {
        *s *= correction;
    }
    ensure_finite(&mixed, "noise injection")?;

    #[cfg(feature = "tracing")]
    tracing::debug!(snr_db, noise_factor, correction, "mix_noise");

    Ok(wave.with_samples(mixed))
}

/// Inject Gaussian noise at `snr_db`, then renormalize by mean absolute amplitude.
///
/// See [`mix_noise`] for the power-preserving mixing step.
pub fn add_noise<R: Rng + ?Sized>(wave: &Waveform, snr_db: f64, rng: &mut R) -> Result<Waveform> {
    let mixed = mix_noise(wave, snr_db, rng)?;
    Ok(wave.with_samples(normalize_mean_abs(mixed.into_samples())?))
}

/// Symmetric Hamming window of length `len`.
///
/// `w[n] = 0.54 - 0.46 * cos(2πn / (len - 1))`; a single-sample window is `[1.0]`.
pub fn hamming(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let denom = (len - 1) as f64;
            (0..len)
                .map(|n| 0.54 - 0.46 * (2.0 * PI * n as f64 / denom).cos())
                .collect()
        }
    }
}

/// Fade in and out with a full-length Hamming window, then renormalize.
pub fn fade_in_and_out(wave: &Waveform) -> Result<Waveform> {
    let window = hamming(wave.len());
    let faded = wave
        .samples()
        .iter()
        .zip(&window)
        .map(|(&s, &w)| s * w)
        .collect();
    Ok(wave.with_samples(normalize_mean_abs(faded)?))
}

/// Normalization technique for [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Normalization {
    /// Divide by the peak absolute amplitude.
    #[default]
    Peak,
    /// Scale to a target RMS level.
    Rms {
        /// Target RMS in dB relative to full scale (0 dB = RMS 1.0).
        level_db: f64,
    },
}

impl Normalization {
    /// Technique name used in output file suffixes.
    pub fn name(&self) -> &'static str {
        match self {
            Normalization::Peak => "peak",
            Normalization::Rms { .. } => "rms",
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Normalization {
    type Err = Error;

    /// Parse `peak` or `rms` (RMS target 0 dB).
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "peak" => Ok(Normalization::Peak),
            "rms" => Ok(Normalization::Rms { level_db: 0.0 }),
            other => Err(Error::parameter(format!(
                "unknown normalization technique '{other}'"
            ))),
        }
    }
}

/// Normalize by peak or to a target RMS level.
///
/// `Peak` divides by the largest absolute sample, not the largest signed
/// sample, so signals whose negative excursion dominates still land in
/// `[-1, 1]`.
///
/// All-zero input fails with [`Error::NumericDegeneracy`] for either technique.
pub fn normalize(wave: &Waveform, technique: Normalization) -> Result<Waveform> {
    let samples = wave.samples();
    let scale = match technique {
        Normalization::Peak => {
            let max = peak(samples);
            if max == 0.0 {
                return Err(Error::degenerate("cannot peak-normalize a silent signal"));
            }
            1.0 / max
        }
        Normalization::Rms { level_db } => {
            if !level_db.is_finite() {
                return Err(Error::parameter(format!(
                    "RMS level must be finite, got {level_db}"
                )));
            }
            let target = db_to_linear(level_db);
            let energy: f64 = samples.iter().map(|&x| x * x).sum();
            if energy == 0.0 {
                return Err(Error::degenerate("cannot RMS-normalize a silent signal"));
            }
            (samples.len() as f64 * target * target / energy).sqrt()
        }
    };

    let out: Vec<f64> = samples.iter().map(|&x| x * scale).collect();
    ensure_finite(&out, "normalization")?;
    Ok(wave.with_samples(out))
}
