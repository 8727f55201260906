//! Main entry point for Emojibot.

use emojibot::{init_logging, BotResult, Emojibot};
use emojibot_config::{ConfigCache, ConfigLoader};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> BotResult<()> {
    let loader = ConfigLoader::from_env();
    let config = Arc::new(ConfigCache::load(&loader)?);

    init_logging(&config.get().logging)?;
    info!(
        config = %loader.path().display(),
        "Starting Emojibot v{}",
        env!("CARGO_PKG_VERSION")
    );

    let bot = Emojibot::new(config, loader);

    if let Err(e) = bot.start().await {
        error!("Bot stopped: {e}");
        return Err(e);
    }

    Ok(())
}
