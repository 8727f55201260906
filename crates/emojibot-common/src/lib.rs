//! # Emojibot Common
//!
//! Shared types, utilities, and collaborator traits for Emojibot.
//!
//! This crate holds the platform-independent half of the emoji commands:
//! emoji references and how they are parsed out of text, the error taxonomy
//! of the workflows, and the traits through which guilds and asset fetches
//! are reached.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod resolver;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::*;
pub use resolver::*;
pub use traits::*;
pub use types::*;
pub use utils::*;
