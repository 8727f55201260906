//! Reply panels: a title, a description and an optional image.

use crate::framework::{Context, Error};
use emojibot_common::EmojiError;
use poise::serenity_prelude as serenity;
use tracing::debug;

/// What a command answers with, independent of how it is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Embed title.
    pub title: String,
    /// Embed description.
    pub description: String,
    /// Image shown below the description.
    pub image: Option<String>,
}

impl Reply {
    /// Creates a panel without an image.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: None,
        }
    }

    /// Attaches an image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Renders the panel as an embed.
    pub fn embed(&self) -> serenity::CreateEmbed {
        let embed = serenity::CreateEmbed::new()
            .title(&self.title)
            .description(&self.description);

        match &self.image {
            Some(url) => embed.image(url),
            None => embed,
        }
    }

    /// Renders the panel as a reply to the invoking message.
    pub fn create_reply(&self) -> poise::CreateReply {
        poise::CreateReply::default().embed(self.embed()).reply(true)
    }
}

impl From<&EmojiError> for Reply {
    fn from(error: &EmojiError) -> Self {
        Self::new(error.title(), error.to_string())
    }
}

/// Sends a panel to the invoking channel.
pub async fn send(ctx: Context<'_>, reply: Reply) -> Result<(), Error> {
    ctx.send(reply.create_reply()).await?;
    Ok(())
}

/// Sends the outcome of a workflow.
///
/// User-facing conditions become panels; transport and platform errors are
/// returned so the framework error handler deals with them.
pub async fn respond(ctx: Context<'_>, outcome: emojibot_common::Result<Reply>) -> Result<(), Error> {
    match outcome {
        Ok(reply) => send(ctx, reply).await,
        Err(error) if error.is_user_facing() => {
            debug!(command = %ctx.command().qualified_name, "Rejected: {error}");
            send(ctx, Reply::from(&error)).await
        }
        Err(error) => Err(error.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_panels_carry_title_and_message() {
        let reply = Reply::from(&EmojiError::Ambiguous);
        assert_eq!(reply.title, "Ambiguous");
        assert_eq!(reply.description, "The message contained more than one emoji.");
        assert_eq!(reply.image, None);

        let reply = Reply::from(&EmojiError::NotFound);
        assert_eq!(reply.title, "Not found");
    }

    #[test]
    fn test_with_image() {
        let reply = Reply::new("Emoji info", "desc").with_image("https://cdn/x.png");
        assert_eq!(reply.image.as_deref(), Some("https://cdn/x.png"));
    }
}
