//! Butterworth filtering of whole waveforms.

use crate::butterworth::{FilterBand, design};
use crate::iir::lfilter;
use crate::math::ensure_finite;
use crate::{Result, Waveform};

/// Design a Butterworth filter for `band` and run it over the waveform.
///
/// Filtering is causal (not zero-phase), so the output lags the input by
/// the filter's group delay. The output is not renormalized.
///
/// # Example
///
/// ```rust
/// use muta_core::{Waveform, butterworth::FilterBand, filter::apply_filter};
///
/// let wave = Waveform::new(vec![1.0; 400], 8000).unwrap();
/// let out = apply_filter(&wave, FilterBand::Lowpass { cutoff_hz: 500.0 }, 5).unwrap();
/// // DC passes a lowpass once the transient settles
/// assert!((out.samples()[399] - 1.0).abs() < 1e-3);
/// ```
pub fn apply_filter(wave: &Waveform, band: FilterBand, order: usize) -> Result<Waveform> {
    let coefficients = design(band, wave.sample_rate(), order)?;
    let out = lfilter(&coefficients, wave.samples());
    ensure_finite(&out, "filtering")?;
    Ok(wave.with_samples(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::butterworth::DEFAULT_ORDER;
    use crate::math::rms;
    use core::f64::consts::PI;

    fn tone(freq: f64, sample_rate: u32, len: usize) -> Waveform {
        let samples = (0..len)
            .map(|i| (2.0 * PI * freq * i as f64 / f64::from(sample_rate)).sin())
            .collect();
        Waveform::new(samples, sample_rate).unwrap()
    }

    /// RMS over the second half, after the filter transient.
    fn steady_rms(wave: &Waveform) -> f64 {
        rms(&wave.samples()[wave.len() / 2..])
    }

    #[test]
    fn lowpass_keeps_low_tone_and_removes_high_tone() {
        let band = FilterBand::Lowpass { cutoff_hz: 1000.0 };
        let low = apply_filter(&tone(100.0, 8000, 8000), band, DEFAULT_ORDER).unwrap();
        let high = apply_filter(&tone(3000.0, 8000, 8000), band, DEFAULT_ORDER).unwrap();
        assert!((steady_rms(&low) - core::f64::consts::FRAC_1_SQRT_2).abs() < 0.01);
        assert!(steady_rms(&high) < 0.01);
    }

    #[test]
    fn highpass_removes_low_tone() {
        let band = FilterBand::Highpass { cutoff_hz: 2000.0 };
        let low = apply_filter(&tone(100.0, 8000, 8000), band, DEFAULT_ORDER).unwrap();
        let high = apply_filter(&tone(3500.0, 8000, 8000), band, DEFAULT_ORDER).unwrap();
        assert!(steady_rms(&low) < 0.01);
        assert!(steady_rms(&high) > 0.6);
    }

    #[test]
    fn bandpass_keeps_center_tone() {
        let band = FilterBand::Bandpass {
            low_hz: 300.0,
            high_hz: 1000.0,
        };
        let mid = apply_filter(&tone(550.0, 8000, 8000), band, DEFAULT_ORDER).unwrap();
        let far = apply_filter(&tone(3000.0, 8000, 8000), band, DEFAULT_ORDER).unwrap();
        assert!(steady_rms(&mid) > 0.6);
        assert!(steady_rms(&far) < 0.01);
    }

    #[test]
    fn output_length_and_rate_preserved() {
        let wave = tone(440.0, 16000, 1234);
        let out = apply_filter(&wave, FilterBand::Lowpass { cutoff_hz: 4000.0 }, 3).unwrap();
        assert_eq!(out.len(), 1234);
        assert_eq!(out.sample_rate(), 16000);
    }

    #[test]
    fn invalid_cutoff_propagates_parameter_error() {
        let wave = tone(440.0, 8000, 100);
        let err = apply_filter(&wave, FilterBand::Lowpass { cutoff_hz: 5000.0 }, 5).unwrap_err();
        assert!(err.is_parameter());
    }
}
