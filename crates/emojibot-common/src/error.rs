//! Error taxonomy of the emoji workflows.

use crate::types::EmojiClass;
use thiserror::Error;

/// Result type alias for emoji workflows.
pub type Result<T> = std::result::Result<T, EmojiError>;

/// Everything an emoji workflow can fail with.
///
/// Variants for which [`EmojiError::is_user_facing`] holds are answered in the
/// invoking channel; the rest propagate to the framework error handler.
#[derive(Error, Debug)]
pub enum EmojiError {
    /// The message contained more than one distinct emoji.
    #[error("The message contained more than one emoji.")]
    Ambiguous,

    /// The message contained no emoji.
    #[error("The given message did not contain an emoji.")]
    NotFound,

    /// The guild is full for the emoji's class.
    #[error("You can't add more than {limit} {}.", .class.plural())]
    LimitReached {
        /// Per-class emoji limit of the guild.
        limit: usize,
        /// Class that is full.
        class: EmojiClass,
    },

    /// The requested emoji name does not match `\w{2,32}`.
    #[error("The emoji name can only include `a-z`, `A-Z`, `0-9`, and `_`.")]
    InvalidName,

    /// The emoji is from another guild and cannot be inspected here.
    #[error("This emoji is from another server.")]
    ForeignEmoji,

    /// The emoji is managed or from another guild and cannot be modified.
    #[error("This emoji cannot be modified or is from another server.")]
    WrongGuildOrManaged,

    /// The role was already allowed to use the emoji.
    #[error("{role} already was able to use {emoji}.")]
    RoleAlreadyPresent {
        /// Role mention.
        role: String,
        /// Emoji markdown.
        emoji: String,
    },

    /// The role was already not allowed to use the emoji.
    #[error("{role} already was unable to use {emoji}.")]
    RoleAlreadyAbsent {
        /// Role mention.
        role: String,
        /// Emoji markdown.
        emoji: String,
    },

    /// Fetching an emoji image failed.
    #[error("Failed to fetch emoji asset {url}: {message}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Underlying failure.
        message: String,
        /// HTTP status, when the server answered.
        status: Option<u16>,
    },

    /// The platform rejected a guild operation.
    #[error("Discord API error: {0}")]
    Discord(String),
}

impl EmojiError {
    /// Whether the condition is answered with a reply panel instead of failing the command.
    pub const fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Transport { .. } | Self::Discord(_))
    }

    /// Title of the reply panel for this condition.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Ambiguous => "Ambiguous",
            Self::NotFound => "Not found",
            Self::LimitReached { .. } => "Emoji limit reached",
            Self::InvalidName => "Emoji name invalid",
            Self::ForeignEmoji
            | Self::WrongGuildOrManaged
            | Self::RoleAlreadyPresent { .. }
            | Self::RoleAlreadyAbsent { .. } => "Emoji role",
            Self::Transport { .. } | Self::Discord(_) => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_message_names_class() {
        let err = EmojiError::LimitReached {
            limit: 50,
            class: EmojiClass::Animated,
        };
        assert_eq!(err.to_string(), "You can't add more than 50 animated emojis.");

        let err = EmojiError::LimitReached {
            limit: 100,
            class: EmojiClass::Static,
        };
        assert_eq!(err.to_string(), "You can't add more than 100 emojis.");
    }

    #[test]
    fn test_user_facing_split() {
        assert!(EmojiError::Ambiguous.is_user_facing());
        assert!(EmojiError::WrongGuildOrManaged.is_user_facing());
        assert!(!EmojiError::Discord("boom".into()).is_user_facing());
        assert!(!EmojiError::Transport {
            url: "https://cdn.discordapp.com/emojis/1.png".into(),
            message: "404".into(),
            status: Some(404),
        }
        .is_user_facing());
    }
}
