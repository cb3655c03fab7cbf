//! Digital Butterworth filter design.
//!
//! Coefficients are derived through the classic analog-prototype route:
//!
//! 1. Place the N prototype poles on the left half of the unit circle.
//! 2. Prewarp each normalized cutoff so the bilinear transform lands it on
//!    the requested digital frequency.
//! 3. Move the prototype to the requested band (low, high, band) in
//!    zero-pole-gain form.
//! 4. Map to the z-plane with the bilinear transform and expand the roots
//!    into numerator/denominator polynomials.
//!
//! Cutoffs are normalized by the Nyquist frequency (`sample_rate / 2`) and
//! must land strictly inside `(0, 1)`; out-of-range cutoffs are rejected,
//! never clamped.
//!
//! # Example
//!
//! ```rust
//! use muta_core::butterworth::{FilterBand, design};
//!
//! let coeffs = design(FilterBand::Lowpass { cutoff_hz: 1000.0 }, 8000, 5).unwrap();
//! assert_eq!(coeffs.numerator().len(), 6);
//! assert!((coeffs.magnitude_at(0.0) - 1.0).abs() < 1e-9);
//! ```

use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

use rustfft::num_complex::Complex64;

use crate::{Error, Result};

/// Filter order used when the caller does not pick one.
pub const DEFAULT_ORDER: usize = 5;

/// Bilinear transform constant `2 * fs` for the normalized design rate fs = 2.
const BILINEAR_FS2: f64 = 4.0;

/// Band type of a Butterworth filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Lowpass
    Low,
    /// Highpass
    High,
    /// Bandpass
    Band,
}

impl FilterKind {
    /// Short name used in output file suffixes (`low`, `high`, `band`).
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Low => "low",
            FilterKind::High => "high",
            FilterKind::Band => "band",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "lowpass" => Ok(FilterKind::Low),
            "high" | "highpass" => Ok(FilterKind::High),
            "band" | "bandpass" => Ok(FilterKind::Band),
            other => Err(Error::parameter(format!("unknown filter type '{other}'"))),
        }
    }
}

/// Band specification with cutoffs in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterBand {
    /// Pass below `cutoff_hz`.
    Lowpass {
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
    },
    /// Pass above `cutoff_hz`.
    Highpass {
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
    },
    /// Pass between `low_hz` and `high_hz`.
    Bandpass {
        /// Lower edge in Hz.
        low_hz: f64,
        /// Upper edge in Hz.
        high_hz: f64,
    },
}

impl FilterBand {
    /// Build a band from a kind and the cutoff pair.
    ///
    /// Lowpass uses `low_cutoff`. Highpass uses `high_cutoff` when given and
    /// falls back to `low_cutoff`. Bandpass requires both.
    pub fn from_cutoffs(
        kind: FilterKind,
        low_cutoff: f64,
        high_cutoff: Option<f64>,
    ) -> Result<Self> {
        match kind {
            FilterKind::Low => Ok(FilterBand::Lowpass {
                cutoff_hz: low_cutoff,
            }),
            FilterKind::High => Ok(FilterBand::Highpass {
                cutoff_hz: high_cutoff.unwrap_or(low_cutoff),
            }),
            FilterKind::Band => match high_cutoff {
                Some(high_hz) => Ok(FilterBand::Bandpass {
                    low_hz: low_cutoff,
                    high_hz,
                }),
                None => Err(Error::parameter("bandpass filter needs a high cutoff")),
            },
        }
    }

    /// The band type.
    pub fn kind(&self) -> FilterKind {
        match self {
            FilterBand::Lowpass { .. } => FilterKind::Low,
            FilterBand::Highpass { .. } => FilterKind::High,
            FilterBand::Bandpass { .. } => FilterKind::Band,
        }
    }
}

/// Numerator (`b`) and denominator (`a`) coefficients of a digital IIR filter.
///
/// `a[0]` is never zero; [`crate::iir::IirFilter`] normalizes by it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl FilterCoefficients {
    /// Wrap a coefficient pair, checking it describes a usable filter.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> Result<Self> {
        if b.is_empty() || a.is_empty() {
            return Err(Error::parameter("filter coefficients must not be empty"));
        }
        if a[0] == 0.0 {
            return Err(Error::parameter("leading denominator coefficient is zero"));
        }
        if b.iter().chain(a.iter()).any(|c| !c.is_finite()) {
            return Err(Error::degenerate("filter design produced non-finite coefficients"));
        }
        Ok(Self { b, a })
    }

    /// Feedforward coefficients.
    pub fn numerator(&self) -> &[f64] {
        &self.b
    }

    /// Feedback coefficients.
    pub fn denominator(&self) -> &[f64] {
        &self.a
    }

    /// Magnitude response at a Nyquist-normalized frequency in `[0, 1]`.
    pub fn magnitude_at(&self, normalized: f64) -> f64 {
        let omega = PI * normalized;
        let eval = |coeffs: &[f64]| -> Complex64 {
            coeffs
                .iter()
                .enumerate()
                .map(|(k, &c)| Complex64::from_polar(c, -omega * k as f64))
                .sum()
        };
        (eval(&self.b) / eval(&self.a)).norm()
    }
}

/// Roots and gain of a transfer function.
#[derive(Debug, Clone)]
struct Zpk {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

impl Zpk {
    fn relative_degree(&self) -> usize {
        self.poles.len() - self.zeros.len()
    }
}

/// Design Butterworth coefficients for `band` at `sample_rate`.
///
/// `order` sets the steepness ([`DEFAULT_ORDER`] is 5). Bandpass designs
/// have twice the order in poles, so they return `2 * order + 1`
/// coefficients per polynomial.
pub fn design(band: FilterBand, sample_rate: u32, order: usize) -> Result<FilterCoefficients> {
    if order == 0 {
        return Err(Error::parameter("filter order must be at least 1"));
    }
    if sample_rate == 0 {
        return Err(Error::parameter("sample rate must be positive"));
    }
    let nyquist = f64::from(sample_rate) / 2.0;
    let proto = prototype(order);

    let analog = match band {
        FilterBand::Lowpass { cutoff_hz } => {
            lowpass_to_lowpass(&proto, prewarp(normalize_cutoff(cutoff_hz, nyquist)?))
        }
        FilterBand::Highpass { cutoff_hz } => {
            lowpass_to_highpass(&proto, prewarp(normalize_cutoff(cutoff_hz, nyquist)?))
        }
        FilterBand::Bandpass { low_hz, high_hz } => {
            let low = normalize_cutoff(low_hz, nyquist)?;
            let high = normalize_cutoff(high_hz, nyquist)?;
            if low >= high {
                return Err(Error::parameter(format!(
                    "bandpass low cutoff {low_hz} Hz must be below high cutoff {high_hz} Hz"
                )));
            }
            let (w1, w2) = (prewarp(low), prewarp(high));
            lowpass_to_bandpass(&proto, (w1 * w2).sqrt(), w2 - w1)
        }
    };

    let digital = bilinear(&analog);
    let b = poly(&digital.zeros)
        .iter()
        .map(|c| c.re * digital.gain)
        .collect();
    let a = poly(&digital.poles).iter().map(|c| c.re).collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(kind = %band.kind(), order, sample_rate, "butterworth design");

    FilterCoefficients::new(b, a)
}

/// Normalize a cutoff in Hz by the Nyquist frequency.
///
/// The result must lie strictly inside `(0, 1)`.
pub fn normalize_cutoff(cutoff_hz: f64, nyquist: f64) -> Result<f64> {
    let normalized = cutoff_hz / nyquist;
    if normalized > 0.0 && normalized < 1.0 {
        Ok(normalized)
    } else {
        Err(Error::parameter(format!(
            "cutoff {cutoff_hz} Hz normalizes to {normalized}, outside (0, 1) for Nyquist {nyquist} Hz"
        )))
    }
}

/// Analog Butterworth prototype: unit cutoff, no zeros, unity gain.
fn prototype(order: usize) -> Zpk {
    let n = order as f64;
    let poles = (0..order)
        .map(|k| {
            let m = 1.0 - n + 2.0 * k as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * n))
        })
        .collect();
    Zpk {
        zeros: Vec::new(),
        poles,
        gain: 1.0,
    }
}

/// Analog frequency that the bilinear transform maps onto `normalized`.
#[inline]
fn prewarp(normalized: f64) -> f64 {
    BILINEAR_FS2 * (PI * normalized / 2.0).tan()
}

fn lowpass_to_lowpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();
    Zpk {
        zeros: proto.zeros.iter().map(|&z| z * wo).collect(),
        poles: proto.poles.iter().map(|&p| p * wo).collect(),
        gain: proto.gain * wo.powi(degree as i32),
    }
}

fn lowpass_to_highpass(proto: &Zpk, wo: f64) -> Zpk {
    let degree = proto.relative_degree();
    let wo_c = Complex64::new(wo, 0.0);

    let mut zeros: Vec<Complex64> = proto.zeros.iter().map(|&z| wo_c / z).collect();
    zeros.extend(std::iter::repeat_n(Complex64::new(0.0, 0.0), degree));
    let poles = proto.poles.iter().map(|&p| wo_c / p).collect();

    let num: Complex64 = proto.zeros.iter().map(|&z| -z).product();
    let den: Complex64 = proto.poles.iter().map(|&p| -p).product();
    Zpk {
        zeros,
        poles,
        gain: proto.gain * (num / den).re,
    }
}

fn lowpass_to_bandpass(proto: &Zpk, wo: f64, bw: f64) -> Zpk {
    let degree = proto.relative_degree();
    let wo_sq = Complex64::new(wo * wo, 0.0);

    // Each prototype root splits into a conjugate-symmetric pair around wo.
    let split = |roots: &[Complex64]| -> Vec<Complex64> {
        let scaled: Vec<Complex64> = roots.iter().map(|&r| r * (bw / 2.0)).collect();
        let upper = scaled.iter().map(|&r| r + (r * r - wo_sq).sqrt());
        let lower = scaled.iter().map(|&r| r - (r * r - wo_sq).sqrt());
        upper.chain(lower).collect()
    };

    let mut zeros = split(&proto.zeros);
    zeros.extend(std::iter::repeat_n(Complex64::new(0.0, 0.0), degree));
    Zpk {
        zeros,
        poles: split(&proto.poles),
        gain: proto.gain * bw.powi(degree as i32),
    }
}

fn bilinear(analog: &Zpk) -> Zpk {
    let degree = analog.relative_degree();
    let fs2 = Complex64::new(BILINEAR_FS2, 0.0);

    let mut zeros: Vec<Complex64> = analog.zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
    zeros.extend(std::iter::repeat_n(Complex64::new(-1.0, 0.0), degree));
    let poles = analog.poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();

    let num: Complex64 = analog.zeros.iter().map(|&z| fs2 - z).product();
    let den: Complex64 = analog.poles.iter().map(|&p| fs2 - p).product();
    Zpk {
        zeros,
        poles,
        gain: analog.gain * (num / den).re,
    }
}

/// Expand roots into monic polynomial coefficients, highest power first.
fn poly(roots: &[Complex64]) -> Vec<Complex64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            coeffs[i] = coeffs[i] - root * coeffs[i - 1];
        }
    }
    coeffs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < tol, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn first_order_lowpass_at_half_nyquist() {
        let c = design(FilterBand::Lowpass { cutoff_hz: 2000.0 }, 8000, 1).unwrap();
        assert_close(c.numerator(), &[0.5, 0.5], 1e-12);
        assert_close(c.denominator(), &[1.0, 0.0], 1e-12);
    }

    #[test]
    fn second_order_lowpass_matches_reference() {
        let c = design(FilterBand::Lowpass { cutoff_hz: 2000.0 }, 8000, 2).unwrap();
        assert_close(c.numerator(), &[0.29289322, 0.58578644, 0.29289322], 1e-7);
        assert_close(c.denominator(), &[1.0, 0.0, 0.17157288], 1e-7);
    }

    #[test]
    fn second_order_highpass_matches_reference() {
        let c = design(FilterBand::Highpass { cutoff_hz: 2000.0 }, 8000, 2).unwrap();
        assert_close(c.numerator(), &[0.29289322, -0.58578644, 0.29289322], 1e-7);
        assert_close(c.denominator(), &[1.0, 0.0, 0.17157288], 1e-7);
    }

    #[test]
    fn lowpass_passes_dc_and_is_3db_down_at_cutoff() {
        for order in [1, 3, 5, 9] {
            let c = design(FilterBand::Lowpass { cutoff_hz: 1000.0 }, 8000, order).unwrap();
            assert!((c.magnitude_at(0.0) - 1.0).abs() < 1e-9, "order {order}");
            let at_cutoff = c.magnitude_at(0.25);
            assert!((at_cutoff - core::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6, "order {order}");
            if order >= 3 {
                assert!(c.magnitude_at(0.9) < 0.01, "order {order}");
            }
        }
    }

    #[test]
    fn highpass_passes_nyquist_and_blocks_dc() {
        let c = design(FilterBand::Highpass { cutoff_hz: 300.0 }, 8000, 5).unwrap();
        assert!((c.magnitude_at(1.0) - 1.0).abs() < 1e-9);
        assert!(c.magnitude_at(0.0) < 1e-9);
    }

    #[test]
    fn bandpass_has_doubled_order_and_unity_center_gain() {
        let c = design(
            FilterBand::Bandpass {
                low_hz: 300.0,
                high_hz: 1000.0,
            },
            8000,
            5,
        )
        .unwrap();
        assert_eq!(c.numerator().len(), 11);
        assert_eq!(c.denominator().len(), 11);

        let w1 = prewarp(300.0 / 4000.0);
        let w2 = prewarp(1000.0 / 4000.0);
        let center = 2.0 / PI * ((w1 * w2).sqrt() / BILINEAR_FS2).atan();
        assert!((c.magnitude_at(center) - 1.0).abs() < 1e-6);
        assert!(c.magnitude_at(0.0) < 1e-9);
        assert!(c.magnitude_at(1.0) < 1e-9);
    }

    #[test]
    fn cutoff_at_or_above_nyquist_rejected() {
        let err = design(FilterBand::Lowpass { cutoff_hz: 4000.0 }, 8000, 5).unwrap_err();
        assert!(err.is_parameter());
        let err = design(FilterBand::Highpass { cutoff_hz: 0.0 }, 8000, 5).unwrap_err();
        assert!(err.is_parameter());
        let err = design(FilterBand::Lowpass { cutoff_hz: f64::NAN }, 8000, 5).unwrap_err();
        assert!(err.is_parameter());
    }

    #[test]
    fn inverted_band_rejected() {
        let err = design(
            FilterBand::Bandpass {
                low_hz: 2000.0,
                high_hz: 1000.0,
            },
            8000,
            5,
        )
        .unwrap_err();
        assert!(err.is_parameter());
    }

    #[test]
    fn zero_order_rejected() {
        let err = design(FilterBand::Lowpass { cutoff_hz: 100.0 }, 8000, 0).unwrap_err();
        assert!(err.is_parameter());
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("low".parse::<FilterKind>().unwrap(), FilterKind::Low);
        assert_eq!("Highpass".parse::<FilterKind>().unwrap(), FilterKind::High);
        assert_eq!("band".parse::<FilterKind>().unwrap(), FilterKind::Band);
        assert!("notch".parse::<FilterKind>().is_err());
    }

    #[test]
    fn band_from_cutoffs() {
        let hp = FilterBand::from_cutoffs(FilterKind::High, 50.0, Some(2000.0)).unwrap();
        assert_eq!(hp, FilterBand::Highpass { cutoff_hz: 2000.0 });
        let hp = FilterBand::from_cutoffs(FilterKind::High, 50.0, None).unwrap();
        assert_eq!(hp, FilterBand::Highpass { cutoff_hz: 50.0 });
        assert!(FilterBand::from_cutoffs(FilterKind::Band, 50.0, None).is_err());
    }

    #[test]
    fn coefficients_reject_zero_leading_denominator() {
        assert!(FilterCoefficients::new(vec![1.0], vec![0.0, 1.0]).is_err());
        assert!(FilterCoefficients::new(Vec::new(), vec![1.0]).is_err());
    }
}
