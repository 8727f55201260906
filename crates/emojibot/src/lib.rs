//! # Emojibot
//!
//! Discord bot for inspecting, stealing and role-locking custom emoji.
//!
//! This is the main binary crate that wires configuration, logging and the
//! Poise framework together and runs the gateway client.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod logging;

pub use bot::*;
pub use error::*;
pub use logging::*;
