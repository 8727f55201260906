//! Turns raw command arguments into emoji references, guild emoji and
//! emoji-or-message sources.

use crate::framework::{Context, Error};
use crate::guild::to_guild_emoji;
use emojibot_common::{
    parse_emoji_id, parse_emoji_markdown, EmojiId, EmojiReference, EmojiSource, GuildEmoji,
    GuildId, RoleId,
};
use poise::serenity_prelude::{self as serenity, ArgumentConvert};
use thiserror::Error;
use tracing::debug;

/// An argument that could not be turned into what the command needs.
#[derive(Error, Debug)]
pub enum ArgumentError {
    /// No emoji matches the argument.
    #[error("Emoji `{0}` not found.")]
    EmojiNotFound(String),

    /// The argument is neither an emoji nor a message.
    #[error("`{0}` is neither an emoji nor a message.")]
    EmojiOrMessageNotFound(String),

    /// No role of the guild matches the argument.
    #[error("Role `{0}` not found.")]
    RoleNotFound(String),

    /// The command needs a guild.
    #[error("This command can only be used in a server.")]
    GuildOnly,
}

/// A cached emoji and the guild that owns it.
fn find_cached_emoji(
    cache: &serenity::Cache,
    prefer: Option<serenity::GuildId>,
    id: EmojiId,
) -> Option<GuildEmoji> {
    let emoji_id = serenity::EmojiId::new(id.0);
    let lookup = |guild_id: serenity::GuildId| {
        cache.guild(guild_id).and_then(|guild| {
            guild
                .emojis
                .get(&emoji_id)
                .map(|emoji| to_guild_emoji(emoji, GuildId(guild_id.get())))
        })
    };

    prefer
        .and_then(lookup)
        .or_else(|| cache.guilds().into_iter().find_map(lookup))
}

/// A cached emoji of `guild_id` named `name`.
fn find_cached_emoji_by_name(
    cache: &serenity::Cache,
    guild_id: serenity::GuildId,
    name: &str,
) -> Option<GuildEmoji> {
    let guild = cache.guild(guild_id)?;
    let emoji = guild.emojis.values().find(|emoji| emoji.name == name)?;
    Some(to_guild_emoji(emoji, GuildId(guild_id.get())))
}

/// Resolves an explicit emoji argument: markdown, a cached ID, or the name of
/// an emoji of the current guild. Unknown bare IDs resolve with unknown
/// animated-ness.
pub fn emoji_reference(ctx: Context<'_>, input: &str) -> Result<EmojiReference, ArgumentError> {
    let input = input.trim();
    if let Some(reference) = parse_emoji_markdown(input) {
        return Ok(reference);
    }

    let cache = ctx.cache();
    if let Some(id) = parse_emoji_id(input) {
        return Ok(find_cached_emoji(cache, ctx.guild_id(), id)
            .map_or_else(|| EmojiReference::unresolved(id), |emoji| emoji.reference()));
    }

    ctx.guild_id()
        .and_then(|guild_id| find_cached_emoji_by_name(cache, guild_id, input.trim_matches(':')))
        .map(|emoji| emoji.reference())
        .ok_or_else(|| ArgumentError::EmojiNotFound(input.to_string()))
}

/// Resolves an argument naming an emoji owned by some guild.
///
/// Emoji of the current guild come back with its ID; emoji the bot only knows
/// from other guilds keep their owner so callers can refuse them.
pub async fn guild_emoji(ctx: Context<'_>, input: &str) -> Result<GuildEmoji, Error> {
    let guild_id = ctx.guild_id().ok_or(ArgumentError::GuildOnly)?;
    let input = input.trim();

    let id = parse_emoji_markdown(input)
        .map(|reference| reference.id)
        .or_else(|| parse_emoji_id(input));

    let Some(id) = id else {
        return find_cached_emoji_by_name(ctx.cache(), guild_id, input.trim_matches(':'))
            .ok_or_else(|| ArgumentError::EmojiNotFound(input.to_string()).into());
    };

    if let Some(emoji) = find_cached_emoji(ctx.cache(), Some(guild_id), id) {
        return Ok(emoji);
    }

    // Cold cache: ask the API before giving up.
    match ctx
        .http()
        .get_emoji(guild_id, serenity::EmojiId::new(id.0))
        .await
    {
        Ok(emoji) => Ok(to_guild_emoji(&emoji, GuildId(guild_id.get()))),
        Err(e) => {
            debug!("Emoji {id} not found in guild {guild_id}: {e}");
            Err(ArgumentError::EmojiNotFound(input.to_string()).into())
        }
    }
}

/// Resolves a `steal` argument: an emoji, or a message to scan for one.
///
/// Markdown and cached IDs are emoji. Anything else is tried as a message
/// link or ID; a bare ID that is not a message is taken as an emoji whose
/// animated-ness has to be probed.
pub async fn steal_source(ctx: Context<'_>, input: &str) -> Result<EmojiSource, ArgumentError> {
    let input = input.trim();
    if let Some(reference) = parse_emoji_markdown(input) {
        return Ok(EmojiSource::Emoji(reference));
    }

    let bare_id = parse_emoji_id(input);
    if let Some(emoji) = bare_id.and_then(|id| find_cached_emoji(ctx.cache(), ctx.guild_id(), id)) {
        return Ok(EmojiSource::Emoji(emoji.reference()));
    }

    match serenity::Message::convert(
        ctx.serenity_context(),
        ctx.guild_id(),
        Some(ctx.channel_id()),
        input,
    )
    .await
    {
        Ok(message) => Ok(EmojiSource::Message(message.content)),
        Err(e) => {
            debug!("`{input}` is not a message: {e}");
            bare_id
                .map(|id| EmojiSource::Emoji(EmojiReference::unresolved(id)))
                .ok_or_else(|| ArgumentError::EmojiOrMessageNotFound(input.to_string()))
        }
    }
}

fn parse_role_mention(input: &str) -> Option<RoleId> {
    let id = input.strip_prefix("<@&")?.strip_suffix('>')?;
    id.parse().ok().filter(|&id| id != 0).map(RoleId)
}

/// Picks the role named by `input` out of `(id, name)` pairs: a mention, an
/// ID, an exact name, then a case-insensitive name. Names may contain spaces.
pub fn find_role(roles: &[(RoleId, String)], input: &str) -> Option<RoleId> {
    let input = input.trim();
    let by_id = parse_role_mention(input)
        .or_else(|| input.parse().ok().filter(|&id| id != 0).map(RoleId))
        .filter(|id| roles.iter().any(|(role, _)| role == id));

    by_id
        .or_else(|| {
            roles
                .iter()
                .find(|(_, name)| name == input)
                .map(|(id, _)| *id)
        })
        .or_else(|| {
            roles
                .iter()
                .find(|(_, name)| name.eq_ignore_ascii_case(input))
                .map(|(id, _)| *id)
        })
}

fn role_names<'a>(roles: impl Iterator<Item = &'a serenity::Role>) -> Vec<(RoleId, String)> {
    roles
        .map(|role| (RoleId(role.id.get()), role.name.clone()))
        .collect()
}

/// Resolves the rest of the input to a role of the current guild.
pub async fn guild_role(ctx: Context<'_>, input: &str) -> Result<RoleId, Error> {
    let guild_id = ctx.guild_id().ok_or(ArgumentError::GuildOnly)?;
    let cached = ctx.guild().map(|guild| role_names(guild.roles.values()));

    let roles = match cached {
        Some(roles) => roles,
        None => role_names(ctx.http().get_guild_roles(guild_id).await?.iter()),
    };

    find_role(&roles, input).ok_or_else(|| ArgumentError::RoleNotFound(input.trim().to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles() -> Vec<(RoleId, String)> {
        vec![
            (RoleId(10), "Server".to_string()),
            (RoleId(11), "Server Booster".to_string()),
            (RoleId(12), "Moderators".to_string()),
        ]
    }

    #[test]
    fn test_multi_word_role_name() {
        assert_eq!(find_role(&roles(), "Server Booster"), Some(RoleId(11)));
        assert_eq!(find_role(&roles(), "  Server Booster "), Some(RoleId(11)));
        assert_eq!(find_role(&roles(), "Server"), Some(RoleId(10)));
    }

    #[test]
    fn test_role_name_case_insensitive_fallback() {
        assert_eq!(find_role(&roles(), "server booster"), Some(RoleId(11)));
        assert_eq!(find_role(&roles(), "moderators"), Some(RoleId(12)));
    }

    #[test]
    fn test_role_mention_and_id() {
        assert_eq!(find_role(&roles(), "<@&12>"), Some(RoleId(12)));
        assert_eq!(find_role(&roles(), "11"), Some(RoleId(11)));
    }

    #[test]
    fn test_unknown_role() {
        assert_eq!(find_role(&roles(), "Server Boosters"), None);
        assert_eq!(find_role(&roles(), "<@&99>"), None);
        assert_eq!(find_role(&roles(), "<@&0>"), None);
        assert_eq!(find_role(&roles(), ""), None);
    }
}
