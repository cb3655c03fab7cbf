//! Time-domain augmentations: shifting, reversal, random cropping.

use core::fmt;
use core::str::FromStr;

use rand::Rng;

use crate::{Error, Result, Waveform};

/// Shift direction for [`shift_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Content moves toward the end of the buffer; the head is vacated.
    Left,
    /// Content moves toward the start of the buffer; the tail is vacated.
    Right,
}

impl Direction {
    /// Name used in output file suffixes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(Error::parameter(format!(
                "shift direction must be 'left' or 'right', got '{other}'"
            ))),
        }
    }
}

/// What fills the samples vacated by a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fill {
    /// Samples pushed off one edge re-enter at the other (circular rotation).
    #[default]
    Wrap,
    /// Vacated samples are set to zero.
    Silence,
}

/// Convert a shift in seconds to a whole number of samples.
pub fn shift_samples(seconds: f64, sample_rate: u32) -> Result<usize> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(Error::parameter(format!(
            "shift must be a finite, non-negative number of seconds, got {seconds}"
        )));
    }
    Ok((seconds * f64::from(sample_rate)).round() as usize)
}

/// Circularly rotate the buffer by `round(seconds * sample_rate)` samples.
///
/// `Left` moves content toward the end, so the last `k` samples wrap to the
/// front. `Right` moves content toward the start, so the first `k` samples
/// wrap to the end. Shifts longer than the buffer wrap modulo its length.
/// With [`Fill::Silence`] the wrapped samples become zeros instead, so a left
/// shift silences the first `k` samples.
///
/// # Example
///
/// ```rust
/// use muta_core::{Waveform, time::{Direction, shift_time}};
///
/// let wave = Waveform::new(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
/// let left = shift_time(&wave, 0.5, Direction::Left).unwrap();
/// assert_eq!(left.samples(), &[4.0, 1.0, 2.0, 3.0]);
/// ```
pub fn shift_time(wave: &Waveform, seconds: f64, direction: Direction) -> Result<Waveform> {
    shift_time_with(wave, seconds, direction, Fill::Wrap)
}

/// Shift with an explicit [`Fill`] policy.
///
/// With [`Fill::Silence`] a shift of the full length or more yields silence.
pub fn shift_time_with(
    wave: &Waveform,
    seconds: f64,
    direction: Direction,
    fill: Fill,
) -> Result<Waveform> {
    let k = shift_samples(seconds, wave.sample_rate())?;
    let len = wave.len();
    let mut out = wave.samples().to_vec();

    #[cfg(feature = "tracing")]
    tracing::debug!(seconds, samples = k, %direction, ?fill, "shift_time");

    if len == 0 {
        return Ok(wave.with_samples(out));
    }

    match fill {
        Fill::Wrap => match direction {
            Direction::Left => out.rotate_right(k % len),
            Direction::Right => out.rotate_left(k % len),
        },
        Fill::Silence => {
            let k = k.min(len);
            match direction {
                Direction::Left => {
                    out.rotate_right(k);
                    out[..k].fill(0.0);
                }
                Direction::Right => {
                    out.rotate_left(k);
                    out[len - k..].fill(0.0);
                }
            }
        }
    }

    Ok(wave.with_samples(out))
}

/// Reverse the sample order. Applying it twice returns the input exactly.
pub fn reverse(wave: &Waveform) -> Waveform {
    let mut out = wave.samples().to_vec();
    out.reverse();
    wave.with_samples(out)
}

/// Crop a random excerpt at least `min_len_secs` long.
///
/// The start time is drawn from `U[0, duration - min_len]` and the end time
/// from `U[start + min_len, duration]`, so both the offset and the length
/// vary per call. The excerpt spans samples `floor(start * rate)` up to
/// `ceil(end * rate)` (capped at the buffer length).
///
/// Fails with [`Error::Parameter`] unless `duration > min_len_secs`.
pub fn random_cropping<R: Rng + ?Sized>(
    wave: &Waveform,
    min_len_secs: f64,
    rng: &mut R,
) -> Result<Waveform> {
    if !min_len_secs.is_finite() || min_len_secs < 0.0 {
        return Err(Error::parameter(format!(
            "minimum crop length must be finite and non-negative, got {min_len_secs}"
        )));
    }
    let duration = wave.duration_secs();
    if duration <= min_len_secs {
        return Err(Error::parameter(format!(
            "minimum crop length {min_len_secs}s is not shorter than the {duration}s input"
        )));
    }

    let rate = f64::from(wave.sample_rate());
    let start = rng.gen_range(0.0..=duration - min_len_secs);
    let end = rng.gen_range((start + min_len_secs).min(duration)..=duration);

    let len = wave.len();
    let stop = ((end * rate).ceil() as usize).min(len);
    let begin = ((start * rate).floor() as usize).min(stop);

    #[cfg(feature = "tracing")]
    tracing::debug!(start, end, begin, stop, "random_cropping");

    Ok(wave.with_samples(wave.samples()[begin..stop].to_vec()))
}
