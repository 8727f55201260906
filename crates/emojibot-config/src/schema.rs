//! Configuration schema definitions using serde.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for Emojibot.
///
/// Every section falls back to its defaults when missing from the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Command cooldowns.
    pub cooldowns: CooldownsConfig,
    /// Emoji asset fetching.
    pub assets: AssetsConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Prefix for text commands.
    pub prefix: String,
    /// Base URL of the emoji CDN.
    pub cdn_url: String,
}

/// Cooldowns applied to the emoji commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CooldownsConfig {
    /// Read-only lookups, bucketed per channel.
    pub lookup: CooldownConfig,
    /// Commands that change the guild, bucketed per guild.
    pub mutation: CooldownConfig,
}

/// A windowed rate limit: `uses` invocations per `per_seconds`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownConfig {
    /// Invocations allowed inside one window.
    pub uses: u32,
    /// Window length in seconds.
    pub per_seconds: u64,
}

impl CooldownConfig {
    /// The window as a [`Duration`].
    pub const fn window(&self) -> Duration {
        Duration::from_secs(self.per_seconds)
    }
}

/// Emoji asset fetching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// User agent sent to the CDN.
    pub user_agent: String,
}

impl AssetsConfig {
    /// The request timeout as a [`Duration`].
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
}
