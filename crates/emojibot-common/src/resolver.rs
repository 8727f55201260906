//! Turns a `steal` argument into exactly one emoji reference.

use crate::error::{EmojiError, Result};
use crate::types::{EmojiReference, EmojiSource};
use crate::utils::extract_emoji_references;
use tracing::debug;

/// Resolves an emoji-or-message argument into a single [`EmojiReference`].
///
/// Explicit emoji pass through untouched. Message content is scanned for
/// emoji markdown; repeats of the same emoji count once.
pub fn resolve_reference(source: EmojiSource) -> Result<EmojiReference> {
    let content = match source {
        EmojiSource::Emoji(reference) => return Ok(reference),
        EmojiSource::Message(content) => content,
    };

    let mut matches = extract_emoji_references(&content);
    debug!(matches = matches.len(), "Scanned message for emoji markdown");

    match matches.len() {
        0 => Err(EmojiError::NotFound),
        1 => matches.drain().next().ok_or(EmojiError::NotFound),
        _ => Err(EmojiError::Ambiguous),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmojiId;

    #[test]
    fn test_explicit_emoji_passes_through() {
        let reference = EmojiReference::unresolved(EmojiId(5));
        let resolved = resolve_reference(EmojiSource::Emoji(reference.clone())).unwrap();
        assert_eq!(resolved, reference);
        assert_eq!(resolved.animated, None);
    }

    #[test]
    fn test_single_emoji_in_message() {
        let source = EmojiSource::Message("look at this <a:dance:998877> wow".into());
        let resolved = resolve_reference(source).unwrap();
        assert_eq!(resolved, EmojiReference::new("dance", EmojiId(998_877), true));
    }

    #[test]
    fn test_repeated_emoji_is_not_ambiguous() {
        let source = EmojiSource::Message("<:ok:1><:ok:1><:ok:1>".into());
        assert!(resolve_reference(source).is_ok());
    }

    #[test]
    fn test_no_emoji_is_not_found() {
        let source = EmojiSource::Message("just text :smile:".into());
        assert!(matches!(resolve_reference(source), Err(EmojiError::NotFound)));
    }

    #[test]
    fn test_two_emoji_are_ambiguous() {
        let source = EmojiSource::Message("<:one:1> <:two:2>".into());
        assert!(matches!(resolve_reference(source), Err(EmojiError::Ambiguous)));
    }
}
