//! # Emojibot Commands
//!
//! Discord emoji commands implemented with the Poise framework.
//!
//! Each command module pairs a platform-independent workflow, written
//! against the [`emojibot_common::EmojiGuild`] and
//! [`emojibot_common::AssetFetcher`] traits, with the `#[poise::command]`
//! that parses arguments and sends the resulting reply panel.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod args;
pub mod assets;
pub mod cooldown;
pub mod emoji_info;
pub mod emojilock;
pub mod framework;
pub mod guild;
pub mod help;
pub mod reply;
pub mod steal;

pub use framework::*;
pub use reply::Reply;
