//! # Emojibot Config
//!
//! Type-safe configuration management for Emojibot.
//!
//! This crate provides configuration loading from TOML or YAML files,
//! environment overrides, validation and a lock-free cache for the active
//! configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validator;

pub use cache::*;
pub use defaults::*;
pub use error::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
