//! `emoji` command: shows what an emoji is made of.

use crate::args;
use crate::cooldown::channel_cooldown;
use crate::framework::{Context, Error};
use crate::reply::{self, Reply};
use emojibot_common::EmojiReference;

/// Builds the info panel of an emoji.
pub fn emoji_info(reference: &EmojiReference, cdn_url: &str) -> Reply {
    let url = reference.url(cdn_url);
    let animated = match reference.animated {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };
    let markdown = reference.markdown();

    Reply::new(
        "Emoji info",
        format!(
            "Name: `{}`\nID: `{}`\nAnimated: {animated}\nMarkdown: `{}`\nImage: {url}",
            reference.name,
            reference.id,
            markdown.trim_matches(|c| c == '<' || c == '>'),
        ),
    )
    .with_image(url)
}

/// Shows info about an emoji.
#[poise::command(prefix_command, slash_command, aliases("emote"), check = "channel_cooldown")]
pub async fn emoji(
    ctx: Context<'_>,
    #[description = "Emoji, emoji ID or emoji name"]
    #[rest]
    emoji: String,
) -> Result<(), Error> {
    let reference = args::emoji_reference(ctx, &emoji)?;
    let cdn_url = ctx.data().config.get().discord.cdn_url.clone();

    reply::send(ctx, emoji_info(&reference, &cdn_url)).await
}
