//! Common type definitions and newtype wrappers for domain modeling.

use crate::utils::emoji_asset_url;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A Discord guild ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(pub u64);

impl fmt::Display for GuildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Discord custom emoji ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiId(pub u64);

impl fmt::Display for EmojiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Discord role ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(pub u64);

impl RoleId {
    /// Returns the `<@&id>` mention for this role.
    pub fn mention(self) -> String {
        format!("<@&{}>", self.0)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an emoji counts towards the static or the animated limit of a guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmojiClass {
    /// Still image emoji.
    Static,
    /// GIF emoji.
    Animated,
}

impl EmojiClass {
    /// Maps an animated flag onto its class.
    pub const fn from_animated(animated: bool) -> Self {
        if animated {
            Self::Animated
        } else {
            Self::Static
        }
    }

    /// Plural noun used in limit messages.
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Static => "emojis",
            Self::Animated => "animated emojis",
        }
    }
}

/// A custom emoji reference that lives for one command invocation.
///
/// `animated` is `None` when the reference was built from a bare ID the
/// platform could not resolve; the steal workflow probes the CDN in that case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmojiReference {
    /// Emoji name, without colons.
    pub name: String,
    /// Emoji ID.
    pub id: EmojiId,
    /// Whether the emoji is animated, if known.
    pub animated: Option<bool>,
}

impl EmojiReference {
    /// Creates a reference whose animated flag is known.
    pub fn new(name: impl Into<String>, id: EmojiId, animated: bool) -> Self {
        Self {
            name: name.into(),
            id,
            animated: Some(animated),
        }
    }

    /// Creates a reference from a bare ID; name and animated flag are unknown.
    pub fn unresolved(id: EmojiId) -> Self {
        Self {
            name: format!("emoji_{id}"),
            id,
            animated: None,
        }
    }

    /// The limit class, if the animated flag is known.
    pub fn class(&self) -> Option<EmojiClass> {
        self.animated.map(EmojiClass::from_animated)
    }

    /// Discord markdown, e.g. `<a:party:123>`.
    pub fn markdown(&self) -> String {
        let flag = if self.animated == Some(true) { "a" } else { "" };
        format!("<{flag}:{}:{}>", self.name, self.id)
    }

    /// CDN URL of the image; unknown animated-ness resolves to the still image.
    pub fn url(&self, cdn_url: &str) -> String {
        emoji_asset_url(cdn_url, self.id, self.animated.unwrap_or(false))
    }
}

impl fmt::Display for EmojiReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.markdown())
    }
}

/// A custom emoji owned by a guild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildEmoji {
    /// Emoji ID.
    pub id: EmojiId,
    /// Emoji name.
    pub name: String,
    /// Whether the emoji is animated.
    pub animated: bool,
    /// Whether an integration controls the emoji.
    pub managed: bool,
    /// Roles allowed to use the emoji; empty means everyone.
    pub roles: Vec<RoleId>,
    /// Guild owning the emoji.
    pub guild_id: GuildId,
}

impl GuildEmoji {
    /// The limit class of this emoji.
    pub const fn class(&self) -> EmojiClass {
        EmojiClass::from_animated(self.animated)
    }

    /// Converts into an invocation-scoped reference.
    pub fn reference(&self) -> EmojiReference {
        EmojiReference::new(self.name.clone(), self.id, self.animated)
    }
}

impl fmt::Display for GuildEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.reference(), f)
    }
}

/// A `steal` argument after the parser decided what it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiSource {
    /// An explicit emoji argument.
    Emoji(EmojiReference),
    /// The content of a referenced message, to be scanned for emoji markdown.
    Message(String),
}
