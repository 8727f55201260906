//! Default values for every configuration section.

use crate::schema::*;
use emojibot_common::DEFAULT_CDN_URL;

/// Invocations allowed per cooldown window.
pub const DEFAULT_COOLDOWN_USES: u32 = 3;

/// Cooldown window length in seconds.
pub const DEFAULT_COOLDOWN_SECONDS: u64 = 8;

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            cooldowns: CooldownsConfig::default(),
            assets: AssetsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            prefix: "!".to_string(),
            cdn_url: DEFAULT_CDN_URL.to_string(),
        }
    }
}

impl Default for CooldownsConfig {
    fn default() -> Self {
        Self {
            lookup: CooldownConfig::default(),
            mutation: CooldownConfig::default(),
        }
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            uses: DEFAULT_COOLDOWN_USES,
            per_seconds: DEFAULT_COOLDOWN_SECONDS,
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            user_agent: concat!("emojibot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "emojibot=info,emojibot_commands=info".to_string(),
            json: false,
        }
    }
}
