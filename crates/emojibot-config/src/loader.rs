//! Configuration loading from TOML or YAML files with environment overrides.

use crate::error::ConfigError;
use crate::schema::Config;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "EMOJIBOT_CONFIG";

/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.yml` or `.yaml`
    Yaml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("yml" | "yaml") => Ok(Self::Yaml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a loader for the file named by `EMOJIBOT_CONFIG`, or `config.toml`.
    pub fn from_env() -> Self {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::new(path)
    }

    /// Path this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file, falling back to defaults when it does not exist, then
    /// applies environment overrides. The result is not validated.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let mut config = if self.path.exists() {
            let contents = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })?;
            let config = Self::parse(&contents, ConfigFormat::from_path(&self.path)?)?;
            info!("Loaded configuration from {}", self.path.display());
            config
        } else {
            info!(
                "No configuration file at {}, using defaults",
                self.path.display()
            );
            Config::default()
        };

        apply_overrides(&mut config, |key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses configuration text in the given format.
    pub fn parse(contents: &str, format: ConfigFormat) -> Result<Config, ConfigError> {
        let config = match format {
            ConfigFormat::Toml => toml::from_str(contents)?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents)?,
        };
        Ok(config)
    }
}

/// Applies `DISCORD_TOKEN` and `EMOJIBOT_PREFIX` on top of a configuration.
pub fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(token) = lookup("DISCORD_TOKEN").filter(|t| !t.is_empty()) {
        debug!("Discord token taken from environment");
        config.discord.token = token;
    }

    if let Some(prefix) = lookup("EMOJIBOT_PREFIX").filter(|p| !p.is_empty()) {
        debug!(prefix = %prefix, "Command prefix taken from environment");
        config.discord.prefix = prefix;
    }
}
