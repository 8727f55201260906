//! Emoji parsing, validation and asset helpers.

use crate::types::{EmojiId, EmojiReference};
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;

/// Default Discord CDN base URL.
pub const DEFAULT_CDN_URL: &str = "https://cdn.discordapp.com";

/// Emoji markdown anywhere in a piece of text.
static EMOJI_MARKDOWN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(a?):(\w{2,32}):(\d+)>").expect("valid emoji markdown regex"));

/// An argument that is exactly one piece of emoji markdown.
static EMOJI_ARGUMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(a?):(\w{2,32}):(\d+)>$").expect("valid emoji argument regex"));

static EMOJI_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w{2,32}$").expect("valid emoji name regex"));

fn reference_from_captures(caps: &Captures<'_>) -> Option<EmojiReference> {
    let id = caps[3].parse::<u64>().ok().filter(|&id| id != 0)?;
    Some(EmojiReference::new(&caps[2], EmojiId(id), !caps[1].is_empty()))
}

/// Extracts every distinct emoji referenced by markdown in `content`.
///
/// IDs that are zero or do not fit in 64 bits are skipped.
pub fn extract_emoji_references(content: &str) -> HashSet<EmojiReference> {
    EMOJI_MARKDOWN_RE
        .captures_iter(content)
        .filter_map(|caps| reference_from_captures(&caps))
        .collect()
}

/// Parses an argument that is exactly one emoji markdown, e.g. `<a:party:123>`.
pub fn parse_emoji_markdown(input: &str) -> Option<EmojiReference> {
    EMOJI_ARGUMENT_RE
        .captures(input.trim())
        .and_then(|caps| reference_from_captures(&caps))
}

/// Parses a bare numeric emoji ID. Zero is never a valid snowflake.
pub fn parse_emoji_id(input: &str) -> Option<EmojiId> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok().filter(|&id| id != 0).map(EmojiId)
}

/// Whether `name` is usable as a custom emoji name.
pub fn is_valid_emoji_name(name: &str) -> bool {
    EMOJI_NAME_RE.is_match(name)
}

/// CDN URL of an emoji image.
pub fn emoji_asset_url(cdn_url: &str, id: EmojiId, animated: bool) -> String {
    let ext = if animated { "gif" } else { "png" };
    format!("{}/emojis/{id}.{ext}", cdn_url.trim_end_matches('/'))
}

/// Per-class emoji limit of a guild with the given boost tier.
pub const fn emoji_limit(premium_tier: u8, more_emoji: bool) -> usize {
    let limit = match premium_tier {
        0 => 50,
        1 => 100,
        2 => 150,
        _ => 250,
    };
    if more_emoji && limit < 200 {
        200
    } else {
        limit
    }
}

/// Sniffs the MIME type of an emoji image, defaulting to PNG.
pub fn image_mime_type(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

/// Encodes image bytes as the data URI the emoji endpoints expect.
pub fn image_data_uri(bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        image_mime_type(bytes),
        BASE64_ENGINE.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dedups_repeated_emoji() {
        let found = extract_emoji_references("<:blob:42> and again <:blob:42>");
        assert_eq!(found.len(), 1);
        assert!(found.contains(&EmojiReference::new("blob", EmojiId(42), false)));
    }

    #[test]
    fn test_extract_distinguishes_animated_flag() {
        let found = extract_emoji_references("<:blob:42> <a:blob:42>");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_extract_skips_overflowing_ids() {
        let found = extract_emoji_references("<:big:99999999999999999999999>");
        assert!(found.is_empty());
    }

    #[test]
    fn test_parse_emoji_markdown() {
        let parsed = parse_emoji_markdown(" <a:party_parrot:1234> ").unwrap();
        assert_eq!(parsed.name, "party_parrot");
        assert_eq!(parsed.id, EmojiId(1234));
        assert_eq!(parsed.animated, Some(true));

        assert!(parse_emoji_markdown("text <:x1:1>").is_none());
        assert!(parse_emoji_markdown("<:x:1>").is_none());
    }

    #[test]
    fn test_parse_emoji_id() {
        assert_eq!(parse_emoji_id("123"), Some(EmojiId(123)));
        assert_eq!(parse_emoji_id("+123"), None);
        assert_eq!(parse_emoji_id(""), None);
        assert_eq!(parse_emoji_id("12a"), None);
        assert_eq!(parse_emoji_id("0"), None);
    }

    #[test]
    fn test_emoji_name_validation() {
        assert!(is_valid_emoji_name("my_emoji1"));
        assert!(is_valid_emoji_name("ab"));
        assert!(is_valid_emoji_name(&"x".repeat(32)));
        assert!(!is_valid_emoji_name("a"));
        assert!(!is_valid_emoji_name(&"x".repeat(33)));
        assert!(!is_valid_emoji_name("name-with-dash"));
        assert!(!is_valid_emoji_name("two words"));
    }

    #[test]
    fn test_emoji_asset_url() {
        assert_eq!(
            emoji_asset_url("https://cdn.discordapp.com/", EmojiId(7), true),
            "https://cdn.discordapp.com/emojis/7.gif"
        );
        assert_eq!(
            emoji_asset_url(DEFAULT_CDN_URL, EmojiId(7), false),
            "https://cdn.discordapp.com/emojis/7.png"
        );
    }

    #[test]
    fn test_emoji_limit_by_tier() {
        assert_eq!(emoji_limit(0, false), 50);
        assert_eq!(emoji_limit(1, false), 100);
        assert_eq!(emoji_limit(2, false), 150);
        assert_eq!(emoji_limit(3, false), 250);
        assert_eq!(emoji_limit(0, true), 200);
        assert_eq!(emoji_limit(3, true), 250);
    }

    #[test]
    fn test_image_data_uri_sniffs_gif() {
        assert_eq!(image_data_uri(b"GIF89a"), "data:image/gif;base64,R0lGODlh");
        assert!(image_data_uri(b"\x89PNG").starts_with("data:image/png;base64,"));
        assert_eq!(image_mime_type(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
    }
}
