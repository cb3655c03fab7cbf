//! Integration tests for muta-cli.
//!
//! Each test runs the `muta` binary against WAV files written into a
//! temporary directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use muta_core::Waveform;
use muta_io::{Encoding, decode, encode};
use tempfile::{TempDir, tempdir};

/// Helper to get the path to the `muta` binary built by cargo.
fn muta_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_muta"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn run(args: &[&str]) -> Output {
    muta_bin().args(args).output().expect("failed to run muta")
}

fn stdout_path(output: &Output) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&output.stdout).trim())
}

/// One second of a 440 Hz tone at 8 kHz.
fn tone_file(dir: &TempDir, name: &str) -> PathBuf {
    let samples = (0..8000)
        .map(|i| 0.5 * (2.0 * std::f64::consts::PI * 440.0 * i as f64 / 8000.0).sin())
        .collect();
    let path = dir.path().join(name);
    encode(&Waveform::new(samples, 8000).unwrap(), &path, Encoding::Float32).unwrap();
    path
}

fn s(path: &Path) -> &str {
    path.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// In-process augmentations
// ---------------------------------------------------------------------------

#[test]
fn gain_writes_next_to_input() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "dog.wav");

    let output = run(&["gain", s(&input), "--db", "-6"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let written = stdout_path(&output);
    assert_eq!(written, dir.path().join("dog_augmented_with_-6_gain.wav"));
    let wave = decode(&written).unwrap();
    assert_eq!(wave.len(), 8000);
    assert_eq!(wave.sample_rate(), 8000);
}

#[test]
fn reverse_reverses_samples() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "cat.wav");

    let output = run(&["reverse", s(&input)]);
    assert!(output.status.success());

    let original = decode(&input).unwrap();
    let reversed = decode(dir.path().join("cat_augmented_reversed.wav")).unwrap();
    let mut expected = original.samples().to_vec();
    expected.reverse();
    assert_eq!(reversed.samples(), expected.as_slice());
}

#[test]
fn shift_name_carries_direction_and_seconds() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "bird.wav");

    let output = run(&["shift", s(&input), "--seconds", "0.25", "--direction", "left"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_path(&output),
        dir.path().join("bird_augmented_left_0.25_shifted.wav")
    );
}

#[test]
fn out_dir_and_encoding_flags() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    let input = tone_file(&dir, "cow.wav");

    let output = run(&[
        "normalize",
        s(&input),
        "--out-dir",
        s(out.path()),
        "--encoding",
        "pcm16",
    ]);
    assert!(output.status.success());

    let written = out.path().join("cow_augmented_peak_normalized.wav");
    assert_eq!(stdout_path(&output), written);
    let info = muta_io::read_wav_info(&written).unwrap();
    assert_eq!(info.bits_per_sample, 16);
}

#[test]
fn seeded_noise_is_reproducible() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "owl.wav");
    let out_a = tempdir().unwrap();
    let out_b = tempdir().unwrap();

    for out in [&out_a, &out_b] {
        let output = run(&[
            "noise",
            s(&input),
            "--snr",
            "10",
            "--seed",
            "7",
            "--out-dir",
            s(out.path()),
        ]);
        assert!(output.status.success());
    }

    let a = decode(out_a.path().join("owl_augmented_10_noisy.wav")).unwrap();
    let b = decode(out_b.path().join("owl_augmented_10_noisy.wav")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn convolve_names_output_after_impulse_response() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "horse.wav");
    let ir = dir.path().join("hall.v2.wav");
    encode(
        &Waveform::new(vec![1.0, 0.5, 0.25], 8000).unwrap(),
        &ir,
        Encoding::Float32,
    )
    .unwrap();

    let output = run(&["convolve", s(&input), "--ir", s(&ir), "--level", "0.5"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout_path(&output),
        dir.path().join("horse_augmented_hall_convolved_with_level_0.5.wav")
    );
}

#[test]
fn filter_bandpass() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "frog.wav");

    let output = run(&[
        "filter", s(&input), "--kind", "band", "--low", "300", "--high", "600",
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout_path(&output),
        dir.path().join("frog_augmented_band_pass_filtered.wav")
    );
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn crop_longer_than_input_fails() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "bee.wav");

    let output = run(&["crop", s(&input), "--min-len", "5"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid parameter"));
    assert!(!dir.path().join("bee_augmented_randomly_cropped_5.wav").exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    let output = run(&["reverse", s(&dir.path().join("absent.wav"))]);
    assert!(!output.status.success());
}

#[test]
fn missing_out_dir_fails() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "ant.wav");
    let output = run(&["reverse", s(&input), "--out-dir", s(&dir.path().join("nope"))]);
    assert!(!output.status.success());
}

#[test]
fn external_augmentation_without_transcoder_fails() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "pig.wav");
    let config = dir.path().join("muta.toml");
    std::fs::write(
        &config,
        "[transcoder]\nprogram = \"/nonexistent/muta-transcoder\"\n",
    )
    .unwrap();

    let output = run(&["--config", s(&config), "resample", s(&input), "--rate", "16000"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
    assert!(!dir.path().join("pig_augmented_resampled_to_16000.wav").exists());
}

#[test]
fn out_of_range_tempo_fails_before_transcoding() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "rat.wav");
    let output = run(&["tempo", s(&input), "--mode", "slow", "--ratio", "0.2"]);
    assert!(!output.status.success());
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "elk.wav");
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "[transcoder]\ntimeout_secs = 0\n").unwrap();

    let output = run(&["--config", s(&config), "reverse", s(&input)]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// Info
// ---------------------------------------------------------------------------

#[test]
fn info_json() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "yak.wav");

    let output = run(&["info", s(&input), "--json"]);
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sample_rate"], 8000);
    assert_eq!(json["channels"], 1);
    assert_eq!(json["num_frames"], 8000);
    assert_eq!(json["format"], "ieee_float");
}

#[test]
fn info_text() {
    let dir = tempdir().unwrap();
    let input = tone_file(&dir, "emu.wav");

    let output = run(&["info", s(&input)]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Sample Rate: 8000 Hz"));
    assert!(stdout.contains("IEEE Float 32-bit"));
}
