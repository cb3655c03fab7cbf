//! CLI command implementations.

pub mod amplitude;
pub mod common;
pub mod external;
pub mod info;
pub mod spectral;
pub mod time;
