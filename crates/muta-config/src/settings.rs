//! Settings file format and loading.

use std::path::{Path, PathBuf};
use std::time::Duration;

use muta_io::Encoding;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths::user_config_file;

/// Default transcoder timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
/// Default silence threshold for trimming, in dB.
pub const DEFAULT_SILENCE_THRESHOLD_DB: f64 = -36.0;
/// Default minimum silence duration for trimming, in seconds.
pub const DEFAULT_SILENCE_MIN_DURATION_SECS: f64 = 0.25;

/// Settings for the muta tools.
///
/// Every field has a default, so an empty file (or no file) is valid.
///
/// # TOML Format
///
/// ```toml
/// [transcoder]
/// program = "/usr/local/bin/ffmpeg"
/// timeout_secs = 120
/// silence_threshold_db = -40.0
/// silence_min_duration_secs = 0.5
///
/// [output]
/// encoding = "pcm16"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// External transcoder settings.
    pub transcoder: TranscoderSettings,
    /// Output file settings.
    pub output: OutputSettings,
}

/// The `[transcoder]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscoderSettings {
    /// Transcoder executable. Looked up on `PATH` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
    /// Seconds to wait for one transcoder run before killing it.
    pub timeout_secs: u64,
    /// Level below which audio counts as silence, in dB.
    pub silence_threshold_db: f64,
    /// Shortest stretch of silence that gets removed, in seconds.
    pub silence_min_duration_secs: f64,
}

impl Default for TranscoderSettings {
    fn default() -> Self {
        Self {
            program: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            silence_threshold_db: DEFAULT_SILENCE_THRESHOLD_DB,
            silence_min_duration_secs: DEFAULT_SILENCE_MIN_DURATION_SECS,
        }
    }
}

impl TranscoderSettings {
    /// Timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The `[output]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputSettings {
    /// Sample encoding of written files.
    pub encoding: Encoding,
}

impl Settings {
    /// Load settings from a TOML file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string and validate them.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Resolve settings the way the CLI does.
    ///
    /// An explicit path must exist. Without one, the user settings file is
    /// read if present, otherwise defaults are used.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let user_file = user_config_file();
        if user_file.is_file() {
            Self::load(user_file)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges.
    ///
    /// Rejects a zero timeout, a silence threshold that is not negative, and
    /// a silence duration that is not positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.transcoder;
        if t.timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "transcoder.timeout_secs",
                "must be at least one second",
            ));
        }
        if !(t.silence_threshold_db.is_finite() && t.silence_threshold_db < 0.0) {
            return Err(ConfigError::invalid(
                "transcoder.silence_threshold_db",
                format!("must be a negative dB level, got {}", t.silence_threshold_db),
            ));
        }
        if !(t.silence_min_duration_secs.is_finite() && t.silence_min_duration_secs > 0.0) {
            return Err(ConfigError::invalid(
                "transcoder.silence_min_duration_secs",
                format!("must be positive, got {}", t.silence_min_duration_secs),
            ));
        }
        if let Some(program) = &t.program
            && program.as_os_str().is_empty()
        {
            return Err(ConfigError::invalid("transcoder.program", "must not be empty"));
        }
        Ok(())
    }
}
