//! Poise framework setup and command registration logic.

use crate::args::ArgumentError;
use crate::assets::HttpAssetFetcher;
use crate::cooldown::CooldownTracker;
use crate::reply::Reply;
use emojibot_config::ConfigCache;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Application data accessible in all commands.
pub struct Data {
    /// Live configuration.
    pub config: Arc<ConfigCache>,
    /// Cooldown buckets shared by every command.
    pub cooldowns: Arc<CooldownTracker>,
    /// CDN client used to download emoji images.
    pub assets: HttpAssetFetcher,
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every command the bot registers.
pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        crate::help::help(),
        crate::emoji_info::emoji(),
        crate::steal::steal(),
        crate::emojilock::emojilock(),
    ]
}

/// Framework options for the given message prefix.
pub fn framework_options(prefix: impl Into<String>) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: commands(),
        prefix_options: poise::PrefixFrameworkOptions {
            prefix: Some(prefix.into()),
            mention_as_prefix: true,
            ..Default::default()
        },
        on_error: |error| Box::pin(on_error(error)),
        pre_command: |ctx| {
            Box::pin(async move {
                debug!(
                    command = %ctx.command().qualified_name,
                    user = %ctx.author().id,
                    guild = ?ctx.guild_id().map(|id| id.get()),
                    "Executing command"
                );
            })
        },
        ..Default::default()
    }
}

/// Creates a new Poise framework.
pub fn create_framework(prefix: impl Into<String>) -> poise::FrameworkBuilder<Data, Error> {
    poise::Framework::builder().options(framework_options(prefix))
}

async fn send_panel(ctx: Context<'_>, reply: Reply) {
    if let Err(e) = ctx.send(reply.create_reply()).await {
        warn!("Failed to send error reply: {e}");
    }
}

/// Turns command failures into reply panels.
///
/// Argument and cooldown failures are shown as they are. Anything else is
/// logged and answered with a generic panel so internals never leak into
/// the channel.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            if let Some(argument) = error.downcast_ref::<ArgumentError>() {
                send_panel(ctx, Reply::new("Invalid argument", argument.to_string())).await;
                return;
            }

            error!(
                command = %ctx.command().qualified_name,
                "Command failed: {error}"
            );
            send_panel(
                ctx,
                Reply::new("Error", "Something went wrong while running this command."),
            )
            .await;
        }
        poise::FrameworkError::CommandCheckFailed {
            error: Some(error),
            ctx,
            ..
        } => {
            send_panel(ctx, Reply::new("Slow down", error.to_string())).await;
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}
