//! `steal` command: copies an emoji from another server into this one.

use crate::args;
use crate::cooldown::guild_cooldown;
use crate::framework::{Context, Error};
use crate::guild::SerenityGuild;
use crate::reply::{self, Reply};
use emojibot_common::{
    emoji_asset_url, is_valid_emoji_name, resolve_reference, AssetFetcher, EmojiClass,
    EmojiError, EmojiGuild, EmojiReference, EmojiSource, GuildEmoji, Result,
};
use tracing::{info, warn};

/// Fails when `existing` already holds `limit` emoji of `class`.
fn ensure_capacity(existing: &[GuildEmoji], limit: usize, class: EmojiClass) -> Result<()> {
    let count = existing.iter().filter(|emoji| emoji.class() == class).count();
    if count >= limit {
        return Err(EmojiError::LimitReached { limit, class });
    }
    Ok(())
}

/// Downloads the image of `reference` and reports whether it is animated.
///
/// Unknown animated-ness is probed through the GIF path first; a failed
/// probe means the emoji is a still image.
async fn fetch_image<F>(assets: &F, cdn_url: &str, reference: &EmojiReference) -> Result<(Vec<u8>, bool)>
where
    F: AssetFetcher + ?Sized,
{
    if reference.animated.is_none() {
        let probe_url = emoji_asset_url(cdn_url, reference.id, true);
        match assets.read_bytes(probe_url).await {
            Ok(bytes) if !bytes.is_empty() => return Ok((bytes, true)),
            Ok(_) => warn!(id = %reference.id, "Empty GIF probe, assuming a still emoji"),
            Err(e) => warn!(id = %reference.id, "GIF probe failed, assuming a still emoji: {e}"),
        }
    }

    let animated = reference.animated.unwrap_or(false);
    let url = emoji_asset_url(cdn_url, reference.id, animated);
    Ok((assets.read_bytes(url).await?, animated))
}

/// Copies the emoji named by `source` into `guild`, optionally renamed.
pub async fn steal_emoji<G, F>(
    guild: &G,
    assets: &F,
    cdn_url: &str,
    source: EmojiSource,
    name: Option<&str>,
) -> Result<Reply>
where
    G: EmojiGuild + ?Sized,
    F: AssetFetcher + ?Sized,
{
    let reference = resolve_reference(source)?;
    let existing = guild.emojis().await?;
    let limit = guild.emoji_limit();

    if let Some(class) = reference.class() {
        ensure_capacity(&existing, limit, class)?;
    }

    if let Some(name) = name {
        if !is_valid_emoji_name(name) {
            return Err(EmojiError::InvalidName);
        }
    }

    let (image, animated) = fetch_image(assets, cdn_url, &reference).await?;
    if reference.animated.is_none() {
        ensure_capacity(&existing, limit, EmojiClass::from_animated(animated))?;
    }

    let name = name.map_or_else(|| reference.name.clone(), str::to_string);
    let created = guild.create_emoji(name, image).await?;
    info!(
        guild = %guild.id(),
        source = %reference.id,
        emoji = %created.id,
        "Stole emoji {}",
        created.name
    );

    Ok(Reply::new(
        "Emoji stolen",
        format!("Successfully added emoji {created}."),
    ))
}

/// Steals an emoji from another server.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    required_permissions = "MANAGE_GUILD_EXPRESSIONS",
    required_bot_permissions = "MANAGE_GUILD_EXPRESSIONS",
    check = "guild_cooldown"
)]
pub async fn steal(
    ctx: Context<'_>,
    #[description = "Emoji, or a message containing one"] emoji_or_message: String,
    #[description = "Name for the new emoji"]
    #[rest]
    name: Option<String>,
) -> std::result::Result<(), Error> {
    let source = args::steal_source(ctx, &emoji_or_message).await?;
    let guild = SerenityGuild::from_context(ctx).await?;
    let cdn_url = ctx.data().config.get().discord.cdn_url.clone();

    let outcome = steal_emoji(
        &guild,
        &ctx.data().assets,
        &cdn_url,
        source,
        name.as_deref().map(str::trim).filter(|n| !n.is_empty()),
    )
    .await;

    reply::respond(ctx, outcome).await
}
