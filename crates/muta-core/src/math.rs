//! Level math shared by the transforms.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] - amplitude-domain decibels to a linear factor
//!
//! # Measurements
//!
//! - [`rms`] - root mean square
//! - [`mean_abs`] - mean absolute amplitude
//! - [`peak`] - maximum absolute amplitude
//!
//! # Normalization
//!
//! - [`normalize_mean_abs`] - divide by the mean absolute amplitude, the
//!   loudness normalization applied at the end of most amplitude transforms

use crate::{Error, Result};

/// Convert amplitude decibels to a linear factor: `10^(db / 20)`.
///
/// # Example
/// ```rust
/// use muta_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 1e-12);
/// assert!((db_to_linear(-20.0) - 0.1).abs() < 1e-12);
/// ```
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Hard clip to `[-1.0, 1.0]`.
#[inline]
pub fn hard_clip(x: f64) -> f64 {
    x.clamp(-1.0, 1.0)
}

/// Root mean square of a signal. Empty input yields 0.
pub fn rms(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = signal.iter().map(|&x| x * x).sum();
    (sum_sq / signal.len() as f64).sqrt()
}

/// Mean absolute amplitude. Empty input yields 0.
pub fn mean_abs(signal: &[f64]) -> f64 {
    if signal.is_empty() {
        return 0.0;
    }
    signal.iter().map(|x| x.abs()).sum::<f64>() / signal.len() as f64
}

/// Maximum absolute amplitude. Empty input yields 0.
pub fn peak(signal: &[f64]) -> f64 {
    signal.iter().fold(0.0f64, |acc, x| acc.max(x.abs()))
}

/// Divide every sample by the signal's mean absolute amplitude.
///
/// Silent or empty input, and any input that would produce non-finite
/// output, fails with [`Error::NumericDegeneracy`].
pub fn normalize_mean_abs(mut samples: Vec<f64>) -> Result<Vec<f64>> {
    let level = mean_abs(&samples);
    if level == 0.0 || !level.is_finite() {
        return Err(Error::degenerate(format!(
            "cannot normalize by mean absolute amplitude {level}"
        )));
    }
    for s in &mut samples {
        *s /= level;
    }
    ensure_finite(&samples, "mean-abs normalization")?;
    Ok(samples)
}

/// Fail with [`Error::NumericDegeneracy`] if any sample is NaN or infinite.
pub fn ensure_finite(samples: &[f64], stage: &str) -> Result<()> {
    match samples.iter().position(|s| !s.is_finite()) {
        Some(index) => Err(Error::degenerate(format!(
            "{stage} produced a non-finite sample at index {index}"
        ))),
        None => Ok(()),
    }
}
