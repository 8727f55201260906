//! `emojilock` commands: restrict which roles may use an emoji.

use crate::args;
use crate::cooldown::guild_cooldown;
use crate::framework::{Context, Error};
use crate::guild::SerenityGuild;
use crate::help;
use crate::reply::{self, Reply};
use emojibot_common::{EmojiError, EmojiGuild, GuildEmoji, GuildId, Result, RoleId};
use tracing::info;

const TITLE: &str = "Emoji role";

fn ensure_modifiable(guild_id: GuildId, emoji: &GuildEmoji) -> Result<()> {
    if emoji.guild_id != guild_id || emoji.managed {
        return Err(EmojiError::WrongGuildOrManaged);
    }
    Ok(())
}

/// Lists the roles that may use `emoji`.
pub fn list_roles(guild_id: GuildId, emoji: &GuildEmoji) -> Result<Reply> {
    if emoji.guild_id != guild_id {
        return Err(EmojiError::ForeignEmoji);
    }

    if emoji.roles.is_empty() {
        return Ok(Reply::new(TITLE, format!("{emoji} can be used by everyone.")));
    }

    let mentions: Vec<String> = emoji.roles.iter().map(|role| role.mention()).collect();
    Ok(Reply::new(
        TITLE,
        format!("{emoji} can only be used by:\n{}.", mentions.join(", ")),
    ))
}

/// Allows `role` to use `emoji`.
pub async fn add_role<G>(guild: &G, emoji: &GuildEmoji, role: RoleId) -> Result<Reply>
where
    G: EmojiGuild + ?Sized,
{
    ensure_modifiable(guild.id(), emoji)?;

    if emoji.roles.contains(&role) {
        return Err(EmojiError::RoleAlreadyPresent {
            role: role.mention(),
            emoji: emoji.to_string(),
        });
    }

    let mut roles = emoji.roles.clone();
    roles.push(role);
    guild.edit_emoji_roles(emoji.id, roles).await?;
    info!(guild = %guild.id(), emoji = %emoji.id, %role, "Role allowed to use emoji");

    Ok(Reply::new(
        TITLE,
        format!("{} can now use {emoji}.", role.mention()),
    ))
}

/// Stops `role` from using `emoji`.
pub async fn remove_role<G>(guild: &G, emoji: &GuildEmoji, role: RoleId) -> Result<Reply>
where
    G: EmojiGuild + ?Sized,
{
    ensure_modifiable(guild.id(), emoji)?;

    if !emoji.roles.contains(&role) {
        return Err(EmojiError::RoleAlreadyAbsent {
            role: role.mention(),
            emoji: emoji.to_string(),
        });
    }

    let roles = emoji.roles.iter().copied().filter(|r| *r != role).collect();
    guild.edit_emoji_roles(emoji.id, roles).await?;
    info!(guild = %guild.id(), emoji = %emoji.id, %role, "Role no longer allowed to use emoji");

    Ok(Reply::new(
        TITLE,
        format!("{} can no longer use {emoji}.", role.mention()),
    ))
}

/// Lets everyone use `emoji` again.
pub async fn clear_roles<G>(guild: &G, emoji: &GuildEmoji) -> Result<Reply>
where
    G: EmojiGuild + ?Sized,
{
    ensure_modifiable(guild.id(), emoji)?;

    guild.edit_emoji_roles(emoji.id, Vec::new()).await?;
    info!(guild = %guild.id(), emoji = %emoji.id, "Cleared emoji role list");

    Ok(Reply::new(TITLE, format!("Cleared role list for {emoji}.")))
}

/// Locks certain emoji to given roles only.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    subcommands(
        "emojilock_list",
        "emojilock_add",
        "emojilock_remove",
        "emojilock_clear"
    ),
    required_permissions = "MANAGE_GUILD_EXPRESSIONS",
    required_bot_permissions = "MANAGE_GUILD_EXPRESSIONS"
)]
pub async fn emojilock(ctx: Context<'_>) -> std::result::Result<(), Error> {
    help::send_command_help(ctx, "emojilock").await
}

/// Lists which roles have access to an emoji.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "list",
    required_permissions = "MANAGE_GUILD_EXPRESSIONS",
    required_bot_permissions = "MANAGE_GUILD_EXPRESSIONS",
    check = "guild_cooldown"
)]
pub async fn emojilock_list(
    ctx: Context<'_>,
    #[description = "Emoji of this server"]
    #[rest]
    emoji: String,
) -> std::result::Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or(args::ArgumentError::GuildOnly)?;
    let emoji = args::guild_emoji(ctx, &emoji).await?;

    reply::respond(ctx, list_roles(GuildId(guild_id.get()), &emoji)).await
}

/// Adds a role to be able to use an emoji.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "add",
    required_permissions = "MANAGE_GUILD_EXPRESSIONS",
    required_bot_permissions = "MANAGE_GUILD_EXPRESSIONS",
    check = "guild_cooldown"
)]
pub async fn emojilock_add(
    ctx: Context<'_>,
    #[description = "Emoji of this server"] emoji: String,
    #[description = "Role that may use the emoji"]
    #[rest]
    role: String,
) -> std::result::Result<(), Error> {
    let emoji = args::guild_emoji(ctx, &emoji).await?;
    let role = args::guild_role(ctx, &role).await?;
    let guild = SerenityGuild::from_context(ctx).await?;

    let outcome = add_role(&guild, &emoji, role).await;
    reply::respond(ctx, outcome).await
}

/// Removes a role from being able to use an emoji.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "remove",
    required_permissions = "MANAGE_GUILD_EXPRESSIONS",
    required_bot_permissions = "MANAGE_GUILD_EXPRESSIONS",
    check = "guild_cooldown"
)]
pub async fn emojilock_remove(
    ctx: Context<'_>,
    #[description = "Emoji of this server"] emoji: String,
    #[description = "Role that may no longer use the emoji"]
    #[rest]
    role: String,
) -> std::result::Result<(), Error> {
    let emoji = args::guild_emoji(ctx, &emoji).await?;
    let role = args::guild_role(ctx, &role).await?;
    let guild = SerenityGuild::from_context(ctx).await?;

    let outcome = remove_role(&guild, &emoji, role).await;
    reply::respond(ctx, outcome).await
}

/// Gives everyone access to use an emoji.
#[poise::command(
    prefix_command,
    slash_command,
    guild_only,
    rename = "clear",
    required_permissions = "MANAGE_GUILD_EXPRESSIONS",
    required_bot_permissions = "MANAGE_GUILD_EXPRESSIONS",
    check = "guild_cooldown"
)]
pub async fn emojilock_clear(
    ctx: Context<'_>,
    #[description = "Emoji of this server"]
    #[rest]
    emoji: String,
) -> std::result::Result<(), Error> {
    let emoji = args::guild_emoji(ctx, &emoji).await?;
    let guild = SerenityGuild::from_context(ctx).await?;

    let outcome = clear_roles(&guild, &emoji).await;
    reply::respond(ctx, outcome).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use emojibot_common::test_utils::discord_fixtures::{
        guild_emoji, other_guild_id, test_guild_id, test_role_id,
    };
    use emojibot_common::{EmojiId, MockEmojiGuild};
    use mockall::predicate::eq;

    fn guild() -> MockEmojiGuild {
        let mut guild = MockEmojiGuild::new();
        guild.expect_id().return_const(test_guild_id());
        guild
    }

    fn locked_emoji(roles: Vec<RoleId>) -> GuildEmoji {
        GuildEmoji {
            roles,
            ..guild_emoji(42, "blob", false)
        }
    }

    #[test]
    fn test_list_everyone() {
        let reply = list_roles(test_guild_id(), &locked_emoji(Vec::new())).unwrap();
        assert_eq!(reply.title, "Emoji role");
        assert_eq!(reply.description, "<:blob:42> can be used by everyone.");
    }

    #[test]
    fn test_list_roles() {
        let reply = list_roles(test_guild_id(), &locked_emoji(vec![RoleId(1), RoleId(2)])).unwrap();
        assert_eq!(
            reply.description,
            "<:blob:42> can only be used by:\n<@&1>, <@&2>."
        );
    }

    #[test]
    fn test_list_foreign_emoji() {
        let emoji = GuildEmoji {
            guild_id: other_guild_id(),
            ..locked_emoji(Vec::new())
        };
        let result = list_roles(test_guild_id(), &emoji);
        assert!(matches!(result, Err(EmojiError::ForeignEmoji)));
    }

    #[tokio::test]
    async fn test_add_appends_role() {
        let mut guild = guild();
        guild
            .expect_edit_emoji_roles()
            .with(eq(EmojiId(42)), eq(vec![RoleId(1), test_role_id()]))
            .times(1)
            .returning(|_, roles| Ok(locked_emoji(roles)));

        let reply = add_role(&guild, &locked_emoji(vec![RoleId(1)]), test_role_id())
            .await
            .unwrap();
        assert_eq!(
            reply.description,
            format!("{} can now use <:blob:42>.", test_role_id().mention())
        );
    }

    #[tokio::test]
    async fn test_add_present_role_is_noop() {
        let mut guild = guild();
        guild.expect_edit_emoji_roles().never();

        let emoji = locked_emoji(vec![test_role_id()]);
        let result = add_role(&guild, &emoji, test_role_id()).await;

        match result {
            Err(err @ EmojiError::RoleAlreadyPresent { .. }) => {
                assert_eq!(
                    err.to_string(),
                    format!("{} already was able to use <:blob:42>.", test_role_id().mention())
                );
            }
            other => panic!("expected no-op, got {other:?}"),
        }
        assert_eq!(emoji.roles, vec![test_role_id()]);
    }

    #[tokio::test]
    async fn test_remove_drops_role() {
        let mut guild = guild();
        guild
            .expect_edit_emoji_roles()
            .with(eq(EmojiId(42)), eq(vec![RoleId(1)]))
            .times(1)
            .returning(|_, roles| Ok(locked_emoji(roles)));

        let reply = remove_role(&guild, &locked_emoji(vec![RoleId(1), test_role_id()]), test_role_id())
            .await
            .unwrap();
        assert!(reply.description.ends_with("can no longer use <:blob:42>."));
    }

    #[tokio::test]
    async fn test_remove_absent_role_is_noop() {
        let mut guild = guild();
        guild.expect_edit_emoji_roles().never();

        let emoji = locked_emoji(vec![RoleId(1)]);
        let result = remove_role(&guild, &emoji, test_role_id()).await;

        assert!(matches!(result, Err(EmojiError::RoleAlreadyAbsent { .. })));
        assert_eq!(emoji.roles, vec![RoleId(1)]);
    }

    #[tokio::test]
    async fn test_clear_always_empties() {
        for roles in [Vec::new(), vec![RoleId(1)], vec![RoleId(1), RoleId(2)]] {
            let mut guild = guild();
            guild
                .expect_edit_emoji_roles()
                .with(eq(EmojiId(42)), eq(Vec::<RoleId>::new()))
                .times(1)
                .returning(|_, roles| Ok(locked_emoji(roles)));

            let reply = clear_roles(&guild, &locked_emoji(roles)).await.unwrap();
            assert_eq!(reply.description, "Cleared role list for <:blob:42>.");
        }
    }

    #[tokio::test]
    async fn test_foreign_or_managed_emoji_never_edited() {
        let foreign = GuildEmoji {
            guild_id: other_guild_id(),
            ..locked_emoji(vec![RoleId(1)])
        };
        let managed = GuildEmoji {
            managed: true,
            ..locked_emoji(vec![RoleId(1)])
        };

        for emoji in [foreign, managed] {
            let mut guild = guild();
            guild.expect_edit_emoji_roles().never();

            assert!(matches!(
                add_role(&guild, &emoji, test_role_id()).await,
                Err(EmojiError::WrongGuildOrManaged)
            ));
            assert!(matches!(
                remove_role(&guild, &emoji, RoleId(1)).await,
                Err(EmojiError::WrongGuildOrManaged)
            ));
            assert!(matches!(
                clear_roles(&guild, &emoji).await,
                Err(EmojiError::WrongGuildOrManaged)
            ));
        }
    }
}
