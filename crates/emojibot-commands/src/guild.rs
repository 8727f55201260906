//! [`EmojiGuild`] backed by the Discord HTTP API.

use crate::args::ArgumentError;
use crate::framework::{Context, Error};
use async_trait::async_trait;
use emojibot_common::{
    emoji_limit, image_data_uri, EmojiError, EmojiGuild, EmojiId, GuildEmoji, GuildId, Result,
    RoleId,
};
use poise::serenity_prelude as serenity;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Guild feature that raises the emoji limit to at least 200.
const MORE_EMOJI_FEATURE: &str = "MORE_EMOJI";

/// Converts a serenity emoji owned by `guild_id`.
pub fn to_guild_emoji(emoji: &serenity::Emoji, guild_id: GuildId) -> GuildEmoji {
    GuildEmoji {
        id: EmojiId(emoji.id.get()),
        name: emoji.name.clone(),
        animated: emoji.animated,
        managed: emoji.managed,
        roles: emoji.roles.iter().map(|role| RoleId(role.get())).collect(),
        guild_id,
    }
}

const fn premium_tier_level(tier: serenity::PremiumTier) -> u8 {
    match tier {
        serenity::PremiumTier::Tier1 => 1,
        serenity::PremiumTier::Tier2 => 2,
        serenity::PremiumTier::Tier3 => 3,
        _ => 0,
    }
}

fn discord_error(error: &serenity::Error) -> EmojiError {
    EmojiError::Discord(error.to_string())
}

/// The invoking guild, reached through serenity's HTTP client.
pub struct SerenityGuild {
    http: Arc<serenity::Http>,
    guild_id: serenity::GuildId,
    emoji_limit: usize,
}

impl SerenityGuild {
    /// Creates an adapter for `guild_id` with a known per-class limit.
    pub const fn new(http: Arc<serenity::Http>, guild_id: serenity::GuildId, emoji_limit: usize) -> Self {
        Self {
            http,
            guild_id,
            emoji_limit,
        }
    }

    /// Builds the adapter for the invoking guild. The boost tier comes from
    /// the cache, or from the API when the guild is not cached.
    pub async fn from_context(ctx: Context<'_>) -> std::result::Result<Self, Error> {
        let guild_id = ctx.guild_id().ok_or(ArgumentError::GuildOnly)?;
        let cached = ctx
            .guild()
            .map(|guild| guild_emoji_limit(guild.premium_tier, &guild.features));

        let limit = resolve_limit(cached, || async {
            let guild = ctx.http().get_guild(guild_id).await?;
            Ok(guild_emoji_limit(guild.premium_tier, &guild.features))
        })
        .await?;
        debug!(%guild_id, limit, cached = cached.is_some(), "Resolved guild emoji limit");

        Ok(Self::new(ctx.serenity_context().http.clone(), guild_id, limit))
    }
}

/// Per-class emoji limit of a guild with the given boost tier and features.
pub fn guild_emoji_limit(tier: serenity::PremiumTier, features: &[String]) -> usize {
    emoji_limit(
        premium_tier_level(tier),
        features.iter().any(|f| f == MORE_EMOJI_FEATURE),
    )
}

/// Uses the cached limit when there is one and calls `fetch` otherwise.
async fn resolve_limit<F, Fut>(cached: Option<usize>, fetch: F) -> std::result::Result<usize, Error>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = std::result::Result<usize, Error>>,
{
    match cached {
        Some(limit) => Ok(limit),
        None => fetch().await,
    }
}

#[async_trait]
impl EmojiGuild for SerenityGuild {
    fn id(&self) -> GuildId {
        GuildId(self.guild_id.get())
    }

    fn emoji_limit(&self) -> usize {
        self.emoji_limit
    }

    async fn emojis(&self) -> Result<Vec<GuildEmoji>> {
        let emojis = self
            .http
            .get_emojis(self.guild_id)
            .await
            .map_err(|e| discord_error(&e))?;

        Ok(emojis
            .iter()
            .map(|emoji| to_guild_emoji(emoji, self.id()))
            .collect())
    }

    async fn create_emoji(&self, name: String, image: Vec<u8>) -> Result<GuildEmoji> {
        let map = json!({
            "name": name,
            "image": image_data_uri(&image),
        });

        let emoji = self
            .http
            .create_emoji(self.guild_id, &map, None)
            .await
            .map_err(|e| discord_error(&e))?;

        Ok(to_guild_emoji(&emoji, self.id()))
    }

    async fn edit_emoji_roles(&self, emoji: EmojiId, roles: Vec<RoleId>) -> Result<GuildEmoji> {
        let roles: Vec<String> = roles.iter().map(ToString::to_string).collect();
        let map = json!({ "roles": roles });

        let emoji = self
            .http
            .edit_emoji(self.guild_id, serenity::EmojiId::new(emoji.0), &map, None)
            .await
            .map_err(|e| discord_error(&e))?;

        Ok(to_guild_emoji(&emoji, self.id()))
    }
}
