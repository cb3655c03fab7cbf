//! Settings for the muta augmentation tools.
//!
//! Settings live in a small TOML file with a `[transcoder]` table (external
//! program, timeout, silence trimming thresholds) and an `[output]` table
//! (sample encoding). Every field has a default.
//!
//! # Example
//!
//! ```rust,no_run
//! use muta_config::{Settings, user_config_file};
//!
//! // Explicit file, else the user's config.toml, else defaults
//! let settings = Settings::load_or_default(None).unwrap();
//! println!("transcoder timeout: {:?}", settings.transcoder.timeout());
//!
//! settings.save(user_config_file()).unwrap();
//! ```

mod error;
mod settings;

/// Platform-specific configuration paths.
pub mod paths;

pub use error::ConfigError;
pub use paths::{CONFIG_FILE_NAME, user_config_dir, user_config_file};
pub use settings::{
    DEFAULT_SILENCE_MIN_DURATION_SECS, DEFAULT_SILENCE_THRESHOLD_DB, DEFAULT_TIMEOUT_SECS,
    OutputSettings, Settings, TranscoderSettings,
};
