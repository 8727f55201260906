//! Tracing subscriber setup.

use crate::error::{BotError, BotResult};
use emojibot_config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// The filter to log with: `RUST_LOG` wins over the configured directives.
pub fn log_filter(config: &LoggingConfig) -> BotResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| BotError::Logging(format!("invalid filter `{}`: {e}", config.filter)))
}

/// Installs the global subscriber, as JSON lines when `config.json` is set.
pub fn init_logging(config: &LoggingConfig) -> BotResult<()> {
    let filter = log_filter(config)?;
    let json = config.json.then(|| fmt::layer().json());
    let text = (!config.json).then(fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init()
        .map_err(|e| BotError::Logging(e.to_string()))
}
