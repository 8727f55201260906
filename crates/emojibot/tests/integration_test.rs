//! Integration tests for emojibot crate.
//!
//! These cover startup wiring that does not need a gateway connection.

use emojibot::{bucket_idle_time, log_filter, Emojibot};
use emojibot_common::test_utils::init_test_logging;
use emojibot_config::{ConfigCache, ConfigLoader};
use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[test]
fn test_config_file_drives_startup_settings() {
    init_test_logging();

    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
[discord]
token = "test-token"
prefix = "?"

[cooldowns.lookup]
uses = 5
per_seconds = 20

[cooldowns.mutation]
uses = 2
per_seconds = 60

[logging]
filter = "emojibot=trace"
"#
    )
    .unwrap();

    let loader = ConfigLoader::new(file.path());
    let cache = ConfigCache::load(&loader).unwrap();
    let config = cache.get();

    assert_eq!(config.discord.prefix, "?");
    assert_eq!(bucket_idle_time(&config), Duration::from_secs(60));
    assert!(log_filter(&config.logging).is_ok());
}

#[tokio::test]
async fn test_bot_shares_one_cooldown_tracker() {
    let loader = ConfigLoader::new("does-not-exist.toml");
    let mut config = loader.load().unwrap();
    config.discord.token = "test-token".into();

    let bot = Emojibot::new(Arc::new(ConfigCache::new(config)), loader);
    let tracker = bot.cooldowns();
    tracker
        .hit(
            "emoji",
            emojibot_commands::cooldown::CooldownScope::Channel(1),
            emojibot_config::CooldownConfig {
                uses: 1,
                per_seconds: 8,
            },
        )
        .unwrap();

    assert_eq!(bot.cooldowns().len(), 1);
    bot.cooldowns().prune(Instant::now() + Duration::from_secs(9), Duration::from_secs(8));
    assert!(tracker.is_empty());
}
