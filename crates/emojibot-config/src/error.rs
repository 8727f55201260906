//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension is neither TOML nor YAML.
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// TOML parse error.
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parse error.
    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration parsed but a value is unusable.
    #[error("Configuration error: {0}")]
    Invalid(String),
}
