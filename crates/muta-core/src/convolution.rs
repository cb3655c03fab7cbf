//! Impulse-response convolution for room and channel simulation.

use rustfft::FftPlanner;
use rustfft::num_complex::Complex64;

use crate::math::normalize_mean_abs;
use crate::{Error, Result, Waveform};

/// Products above this count go through the FFT path.
const DIRECT_LIMIT: usize = 1 << 16;

/// Full linear convolution, `signal.len() + kernel.len() - 1` samples long.
///
/// Small problems use the direct sum; larger ones multiply zero-padded
/// spectra. Either empty input yields an empty output.
pub fn linear_convolution(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    if signal.is_empty() || kernel.is_empty() {
        return Vec::new();
    }
    if signal.len().saturating_mul(kernel.len()) <= DIRECT_LIMIT {
        direct_convolution(signal, kernel)
    } else {
        fft_convolution(signal, kernel)
    }
}

fn direct_convolution(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; signal.len() + kernel.len() - 1];
    for (i, &s) in signal.iter().enumerate() {
        for (j, &k) in kernel.iter().enumerate() {
            out[i + j] += s * k;
        }
    }
    out
}

fn fft_convolution(signal: &[f64], kernel: &[f64]) -> Vec<f64> {
    let out_len = signal.len() + kernel.len() - 1;
    let size = out_len.next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(size);
    let ifft = planner.plan_fft_inverse(size);

    let padded = |x: &[f64]| -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = x.iter().map(|&v| Complex64::new(v, 0.0)).collect();
        buffer.resize(size, Complex64::new(0.0, 0.0));
        buffer
    };

    let mut spectrum = padded(signal);
    let mut kernel_spectrum = padded(kernel);
    fft.process(&mut spectrum);
    fft.process(&mut kernel_spectrum);

    for (s, k) in spectrum.iter_mut().zip(&kernel_spectrum) {
        *s *= *k;
    }
    ifft.process(&mut spectrum);

    // rustfft leaves the inverse unscaled
    let scale = 1.0 / size as f64;
    spectrum.iter().take(out_len).map(|c| c.re * scale).collect()
}

/// Convolve with an impulse response and blend with the dry signal.
///
/// The full convolution is truncated to the input length (causal,
/// same-length output), blended as `level * wet + (1 - level) * dry`, then
/// renormalized by mean absolute amplitude. `level = 0` returns the
/// normalized dry signal, `level = 1` is fully wet.
///
/// Fails with [`Error::Parameter`] when the sample rates differ, the impulse
/// response is empty, or `level` lies outside `[0, 1]`.
pub fn convolve(wave: &Waveform, impulse_response: &Waveform, level: f64) -> Result<Waveform> {
    if impulse_response.sample_rate() != wave.sample_rate() {
        return Err(Error::parameter(format!(
            "impulse response rate {} Hz does not match waveform rate {} Hz",
            impulse_response.sample_rate(),
            wave.sample_rate()
        )));
    }
    if !(0.0..=1.0).contains(&level) {
        return Err(Error::parameter(format!(
            "convolution level must be within [0, 1], got {level}"
        )));
    }
    if impulse_response.is_empty() {
        return Err(Error::parameter("impulse response is empty"));
    }

    let dry = wave.samples();
    let mut wet = linear_convolution(dry, impulse_response.samples());
    wet.truncate(dry.len());

    #[cfg(feature = "tracing")]
    tracing::debug!(
        level,
        ir_len = impulse_response.len(),
        len = dry.len(),
        "convolve"
    );

    let mixed = wet
        .iter()
        .zip(dry)
        .map(|(&w, &d)| level * w + (1.0 - level) * d)
        .collect();
    Ok(wave.with_samples(normalize_mean_abs(mixed)?))
}
