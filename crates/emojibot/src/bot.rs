//! Core bot logic using the Poise framework.

use crate::error::BotResult;
use emojibot_commands::assets::HttpAssetFetcher;
use emojibot_commands::cooldown::CooldownTracker;
use emojibot_commands::{create_framework, Data};
use emojibot_config::{Config, ConfigCache, ConfigLoader};
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// How often idle cooldown buckets are dropped.
pub const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Gateway intents: message content is needed for prefix commands and
/// for reading emoji out of referenced messages.
pub fn intents() -> serenity::GatewayIntents {
    serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT
}

/// Buckets idle for longer than the widest configured window hold no state.
pub fn bucket_idle_time(config: &Config) -> Duration {
    config
        .cooldowns
        .lookup
        .window()
        .max(config.cooldowns.mutation.window())
}

/// Main bot structure.
pub struct Emojibot {
    config: Arc<ConfigCache>,
    loader: ConfigLoader,
    cooldowns: Arc<CooldownTracker>,
}

impl Emojibot {
    /// Creates a new bot around a loaded configuration.
    pub fn new(config: Arc<ConfigCache>, loader: ConfigLoader) -> Self {
        Self {
            config,
            loader,
            cooldowns: Arc::new(CooldownTracker::new()),
        }
    }

    /// Shared cooldown tracker.
    pub fn cooldowns(&self) -> Arc<CooldownTracker> {
        Arc::clone(&self.cooldowns)
    }

    fn spawn_cooldown_pruning(&self) {
        let cooldowns = self.cooldowns();
        let config = Arc::clone(&self.config);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(PRUNE_INTERVAL);
            loop {
                interval.tick().await;
                cooldowns.prune(Instant::now(), bucket_idle_time(&config.get()));
                debug!(buckets = cooldowns.len(), "Pruned cooldown buckets");
            }
        });
    }

    /// Reloads the configuration file on SIGHUP. The prefix and token are
    /// only read at startup.
    #[cfg(unix)]
    fn spawn_config_reload(&self) -> BotResult<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut hangups = signal(SignalKind::hangup())?;
        let config = Arc::clone(&self.config);
        let loader = self.loader.clone();

        tokio::spawn(async move {
            while hangups.recv().await.is_some() {
                if let Err(e) = config.reload(&loader) {
                    error!("Keeping previous configuration: {e}");
                }
            }
        });
        Ok(())
    }

    #[cfg(not(unix))]
    fn spawn_config_reload(&self) -> BotResult<()> {
        debug!(
            "Configuration reload is not supported here; {} is read once",
            self.loader.path().display()
        );
        Ok(())
    }

    /// Starts the bot and runs until the gateway connection ends or Ctrl+C.
    pub async fn start(&self) -> BotResult<()> {
        let config = self.config.get();
        let assets = HttpAssetFetcher::new(&config.assets)?;

        let data_config = Arc::clone(&self.config);
        let cooldowns = self.cooldowns();
        let framework = create_framework(config.discord.prefix.clone())
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    info!(user = %ready.user.name, guilds = ready.guilds.len(), "Connected to Discord");
                    Ok(Data {
                        config: data_config,
                        cooldowns,
                        assets,
                    })
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&config.discord.token, intents())
            .framework(framework)
            .await?;

        self.spawn_cooldown_pruning();
        self.spawn_config_reload()?;

        let shard_manager = Arc::clone(&client.shard_manager);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down");
                shard_manager.shutdown_all().await;
            }
        });

        client.start().await?;
        Ok(())
    }
}
