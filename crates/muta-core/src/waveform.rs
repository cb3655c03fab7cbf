//! The waveform value every transform consumes and produces.

use crate::{Error, Result};

/// A mono sample buffer paired with its sample rate.
///
/// Waveforms are immutable once built: transforms borrow their input and
/// return a new value, so a single waveform can be shared freely between
/// concurrent augmentation calls.
///
/// # Example
///
/// ```rust
/// use muta_core::Waveform;
///
/// let wave = Waveform::new(vec![0.0, 0.5, -0.5, 0.0], 8000).unwrap();
/// assert_eq!(wave.len(), 4);
/// assert_eq!(wave.duration_secs(), 4.0 / 8000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl Waveform {
    /// Build a waveform from samples and a sample rate in Hz.
    ///
    /// A zero sample rate is rejected with [`Error::Parameter`].
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::parameter("sample rate must be positive"));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Build a waveform from single-precision samples.
    pub fn from_f32(samples: &[f32], sample_rate: u32) -> Result<Self> {
        Self::new(samples.iter().map(|&s| f64::from(s)).collect(), sample_rate)
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Borrow the sample buffer.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consume the waveform, returning its samples.
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Samples converted to `f32`, for encoders that want single precision.
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples.iter().map(|&s| s as f32).collect()
    }

    /// New waveform at the same sample rate.
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Self {
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }
}
