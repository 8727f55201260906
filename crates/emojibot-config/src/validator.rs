//! Runtime validation of a loaded configuration.

use crate::error::ConfigError;
use crate::schema::{Config, CooldownConfig};
use url::Url;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first unusable value.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.discord.token.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Discord token cannot be empty".to_string(),
            ));
        }

        if config.discord.prefix.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "Command prefix cannot be empty".to_string(),
            ));
        }

        Self::validate_cdn_url(&config.discord.cdn_url)?;
        Self::validate_cooldown("cooldowns.lookup", config.cooldowns.lookup)?;
        Self::validate_cooldown("cooldowns.mutation", config.cooldowns.mutation)?;

        if config.assets.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "assets.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    fn validate_cdn_url(cdn_url: &str) -> Result<(), ConfigError> {
        let url = Url::parse(cdn_url)
            .map_err(|e| ConfigError::Invalid(format!("discord.cdn_url is not a URL: {e}")))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "discord.cdn_url must use http or https, not {other}"
            ))),
        }
    }

    fn validate_cooldown(section: &str, cooldown: CooldownConfig) -> Result<(), ConfigError> {
        if cooldown.uses == 0 || cooldown.per_seconds == 0 {
            return Err(ConfigError::Invalid(format!(
                "{section} needs at least one use per non-empty window"
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config
    }

    #[test]
    fn test_default_needs_token() {
        assert!(Config::default().validate().is_err());
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_cdn() {
        let mut config = valid_config();
        config.discord.cdn_url = "ftp://cdn.example.com".to_string();
        assert!(config.validate().is_err());

        config.discord.cdn_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_cooldown_window() {
        let mut config = valid_config();
        config.cooldowns.mutation.per_seconds = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cooldowns.mutation"));

        let mut config = valid_config();
        config.cooldowns.lookup.uses = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_blank_prefix() {
        let mut config = valid_config();
        config.discord.prefix = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
