//! Integration tests for muta-config.
//!
//! Settings files on disk: saving, reloading and error reporting.

use muta_config::{ConfigError, Settings};
use muta_io::Encoding;
use tempfile::TempDir;

#[test]
fn test_save_and_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.toml");

    let mut settings = Settings::default();
    settings.transcoder.timeout_secs = 42;
    settings.transcoder.silence_threshold_db = -50.0;
    settings.output.encoding = Encoding::Pcm16;
    settings.save(&path).unwrap();

    assert!(path.is_file());
    let loaded = Settings::load(&path).unwrap();
    assert_eq!(loaded, settings);
}

#[test]
fn test_load_or_default_prefers_explicit_path() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    std::fs::write(&path, "[transcoder]\ntimeout_secs = 7\n").unwrap();

    let settings = Settings::load_or_default(Some(&path)).unwrap();
    assert_eq!(settings.transcoder.timeout_secs, 7);
}

#[test]
fn test_explicit_missing_file_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.toml");
    let err = Settings::load_or_default(Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_invalid_file_contents() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.toml");

    std::fs::write(&path, "[transcoder\n").unwrap();
    assert!(matches!(
        Settings::load(&path).unwrap_err(),
        ConfigError::TomlParse(_)
    ));

    std::fs::write(&path, "[transcoder]\nsilence_min_duration_secs = -1.0\n").unwrap();
    let err = Settings::load(&path).unwrap_err();
    assert!(err.to_string().contains("silence_min_duration_secs"));
}
