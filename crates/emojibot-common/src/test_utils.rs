//! Test utilities and shared test helpers for Emojibot.
//!
//! Fixtures, logging setup and proptest strategies shared by the unit and
//! integration tests of every crate in the workspace. The `MockEmojiGuild`
//! and `MockAssetFetcher` doubles are generated next to their traits.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call from every test.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// Discord-shaped fixtures.
pub mod discord_fixtures {
    use crate::{EmojiId, GuildEmoji, GuildId, RoleId};

    /// The guild commands are invoked in.
    pub fn test_guild_id() -> GuildId {
        GuildId(123_456_789_012_345_678)
    }

    /// Some other guild the bot shares.
    pub fn other_guild_id() -> GuildId {
        GuildId(876_543_210_987_654_321)
    }

    /// A role of the test guild.
    pub fn test_role_id() -> RoleId {
        RoleId(555_555_555_555_555_555)
    }

    /// An unmanaged emoji of the test guild usable by everyone.
    pub fn guild_emoji(id: u64, name: &str, animated: bool) -> GuildEmoji {
        GuildEmoji {
            id: EmojiId(id),
            name: name.to_string(),
            animated,
            managed: false,
            roles: Vec::new(),
            guild_id: test_guild_id(),
        }
    }

    /// `count` emoji of one class, as returned by a full or filling guild.
    pub fn emoji_set(count: usize, animated: bool) -> Vec<GuildEmoji> {
        (0..count)
            .map(|i| guild_emoji(1_000 + i as u64, &format!("emoji_{i}"), animated))
            .collect()
    }
}

/// Property-based testing utilities using proptest.
pub mod property_testing {
    use proptest::prelude::*;

    /// Names accepted by Discord for custom emoji.
    pub fn emoji_name_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9_]{2,32}"
    }

    /// Names containing at least one character outside `\w`.
    pub fn invalid_emoji_name_strategy() -> impl Strategy<Value = String> {
        (r"[a-z]{1,10}", r"[-. !?:]", r"[a-z]{0,10}").prop_map(|(a, bad, b)| format!("{a}{bad}{b}"))
    }

    /// Emoji IDs in the snowflake range.
    pub fn emoji_id_strategy() -> impl Strategy<Value = u64> {
        100_000_000_000_000_000u64..=999_999_999_999_999_999u64
    }

    /// Free text that cannot contain emoji markdown.
    pub fn filler_text_strategy() -> impl Strategy<Value = String> {
        r"[a-zA-Z0-9 .,!?]{0,40}"
    }
}
