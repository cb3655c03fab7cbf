//! Muta Core - Waveform augmentation transforms
//!
//! Every transform borrows a [`Waveform`] and returns a new one, so a source
//! recording can be fanned out into many variants without copying it up front.
//!
//! - [`amplitude`] - Gain, additive noise, Hamming fade, peak/RMS normalization
//! - [`time`] - Circular shift, reversal, random cropping
//! - [`convolution`] - Impulse-response convolution with dry/wet blend
//! - [`filter`] - Butterworth low/high/band-pass filtering
//! - [`butterworth`] - Digital Butterworth coefficient design
//! - [`iir`] - Direct Form II Transposed IIR filtering
//! - [`augmentation`] - Operation descriptors and output file suffixes
//! - [`math`] - dB conversion, RMS, mean-abs normalization
//!
//! ## Example
//!
//! ```rust
//! use muta_core::{Augmentation, Waveform};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let wave = Waveform::new(vec![0.1, -0.2, 0.3, -0.4], 8000).unwrap();
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! let reversed = Augmentation::Reverse.apply(&wave, None, &mut rng).unwrap();
//! assert_eq!(reversed.samples(), &[-0.4, 0.3, -0.2, 0.1]);
//! ```
//!
//! ## Randomness
//!
//! Noise and cropping draw from a caller-supplied [`rand::Rng`]. Seed a
//! `StdRng` for reproducible output.
//!
//! ## Features
//!
//! - `tracing`: emit `debug!` events with transform parameters

pub mod amplitude;
pub mod augmentation;
pub mod butterworth;
pub mod convolution;
pub mod error;
pub mod filter;
pub mod iir;
pub mod math;
pub mod time;
pub mod waveform;

pub use amplitude::{
    Normalization, add_noise, apply_gain, fade_in_and_out, mix_noise, normalize, scale_and_clip,
};
pub use augmentation::{Augmentation, Tempo};
pub use butterworth::{DEFAULT_ORDER, FilterBand, FilterCoefficients, FilterKind, design};
pub use convolution::convolve;
pub use error::{Error, Result};
pub use filter::apply_filter;
pub use iir::{IirFilter, lfilter};
pub use math::{db_to_linear, normalize_mean_abs};
pub use time::{Direction, Fill, random_cropping, reverse, shift_time, shift_time_with};
pub use waveform::Waveform;
