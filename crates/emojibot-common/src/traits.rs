//! Collaborator traits the emoji workflows are written against.

use crate::error::Result;
use crate::types::{EmojiId, GuildEmoji, GuildId, RoleId};
use async_trait::async_trait;

/// The guild a command was invoked in.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait EmojiGuild: Send + Sync {
    /// The guild's ID.
    fn id(&self) -> GuildId;

    /// How many emoji of one class the guild may hold.
    fn emoji_limit(&self) -> usize;

    /// All custom emoji of the guild.
    async fn emojis(&self) -> Result<Vec<GuildEmoji>>;

    /// Uploads a new custom emoji.
    async fn create_emoji(&self, name: String, image: Vec<u8>) -> Result<GuildEmoji>;

    /// Replaces the roles allowed to use an emoji. An empty list allows everyone.
    async fn edit_emoji_roles(&self, emoji: EmojiId, roles: Vec<RoleId>) -> Result<GuildEmoji>;
}

/// Fetches emoji images.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    /// Reads the bytes behind `url`; 4xx and 5xx answers are transport errors.
    async fn read_bytes(&self, url: String) -> Result<Vec<u8>>;
}
