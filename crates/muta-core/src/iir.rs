//! Causal IIR filtering with arbitrary-order coefficients.

use crate::butterworth::FilterCoefficients;

/// Stateful IIR filter in Direct Form II Transposed.
///
/// ```text
/// y[n] = b0*x[n] + z0[n-1]
/// zi[n] = b(i+1)*x[n] + z(i+1)[n-1] - a(i+1)*y[n]
/// ```
///
/// Coefficients are normalized by `a[0]` on construction. Processing is
/// causal, so the output carries the filter's phase delay.
#[derive(Debug, Clone)]
pub struct IirFilter {
    b: Vec<f64>,
    a: Vec<f64>,
    /// One slot longer than the delay line; the last slot stays zero.
    state: Vec<f64>,
}

impl IirFilter {
    /// Create a filter with zeroed state.
    pub fn new(coefficients: &FilterCoefficients) -> Self {
        let num = coefficients.numerator();
        let den = coefficients.denominator();
        let len = num.len().max(den.len());
        let a0_inv = 1.0 / den[0];

        let pad = |c: &[f64]| -> Vec<f64> {
            (0..len)
                .map(|i| c.get(i).copied().unwrap_or(0.0) * a0_inv)
                .collect()
        };

        Self {
            b: pad(num),
            a: pad(den),
            state: vec![0.0; len],
        }
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let output = self.b[0] * input + self.state[0];
        for i in 1..self.b.len() {
            self.state[i - 1] = self.b[i] * input + self.state[i] - self.a[i] * output;
        }
        output
    }
}

/// Filter a whole signal from zero initial state.
pub fn lfilter(coefficients: &FilterCoefficients, input: &[f64]) -> Vec<f64> {
    let mut filter = IirFilter::new(coefficients);
    input.iter().map(|&x| filter.process(x)).collect()
}
