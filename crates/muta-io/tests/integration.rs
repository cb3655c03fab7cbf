//! Integration tests for muta-io WAV I/O and output naming.

use muta_core::{Augmentation, Normalization, Waveform, apply_gain};
use muta_io::{Encoding, Error, WavFormat, decode, encode, read_wav_info, write_augmented};
use tempfile::tempdir;

/// Sine wave at the given sample rate.
fn sine_wave(sample_rate: u32, freq_hz: f64, num_samples: usize) -> Waveform {
    let samples = (0..num_samples)
        .map(|i| 0.8 * (std::f64::consts::TAU * freq_hz * i as f64 / f64::from(sample_rate)).sin())
        .collect();
    Waveform::new(samples, sample_rate).unwrap()
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_float32_common_rates() {
    let dir = tempdir().unwrap();
    for sr in [8000, 16000, 44100, 48000] {
        let wave = sine_wave(sr, 440.0, sr as usize / 4);
        let path = dir.path().join(format!("sine_{sr}.wav"));
        encode(&wave, &path, Encoding::Float32).unwrap();

        let loaded = decode(&path).unwrap();
        assert_eq!(loaded.sample_rate(), sr);
        assert_eq!(loaded.len(), wave.len());
        for (a, b) in wave.samples().iter().zip(loaded.samples()) {
            assert!((a - b).abs() < 1e-6, "sample mismatch: {a} vs {b}");
        }
    }
}

#[test]
fn wav_roundtrip_pcm16_within_quantization() {
    let dir = tempdir().unwrap();
    let wave = sine_wave(16000, 1000.0, 16000);
    let path = dir.path().join("sine.wav");
    encode(&wave, &path, Encoding::Pcm16).unwrap();

    let loaded = decode(&path).unwrap();
    for (a, b) in wave.samples().iter().zip(loaded.samples()) {
        assert!((a - b).abs() <= 0.5 / 32768.0 + 1e-12);
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

#[test]
fn wav_info_reports_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("info.wav");
    encode(&sine_wave(8000, 440.0, 12000), &path, Encoding::Float32).unwrap();

    let info = read_wav_info(&path).unwrap();
    assert_eq!(info.channels, 1);
    assert_eq!(info.sample_rate, 8000);
    assert_eq!(info.bits_per_sample, 32);
    assert_eq!(info.num_frames, 12000);
    assert!((info.duration_secs - 1.5).abs() < 1e-12);
    assert_eq!(info.format, WavFormat::IeeeFloat);
}

// ---------------------------------------------------------------------------
// Augmented output
// ---------------------------------------------------------------------------

#[test]
fn write_augmented_places_file_beside_input() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("cat.wav");
    let wave = sine_wave(8000, 440.0, 8000);
    encode(&wave, &input, Encoding::Pcm16).unwrap();

    let source = decode(&input).unwrap();
    let augmentation = Augmentation::Gain { gain_db: -50.0 };
    let out = apply_gain(&source, -50.0).unwrap();
    let written = write_augmented(&input, &augmentation, &out, Encoding::Float32).unwrap();

    assert_eq!(written, dir.path().join("cat_augmented_with_-50_gain.wav"));
    let reloaded = decode(&written).unwrap();
    assert_eq!(reloaded.len(), 8000);
    // mean-abs normalized output exceeds unity and survives float encoding
    assert!(reloaded.samples().iter().any(|s| s.abs() > 1.0));
}

#[test]
fn write_augmented_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("gone").join("cat.wav");
    let wave = sine_wave(8000, 440.0, 100);
    let err = write_augmented(
        &input,
        &Augmentation::Normalize(Normalization::Peak),
        &wave,
        Encoding::Float32,
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingDirectory(_)));
}
