//! Lock-free access to the active configuration with arc-swap.

use crate::error::ConfigError;
use crate::loader::ConfigLoader;
use crate::schema::Config;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

/// Holds the active configuration; readers never block writers.
pub struct ConfigCache {
    config: ArcSwap<Config>,
}

impl ConfigCache {
    /// Creates a cache around an already validated configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Loads, validates and caches the configuration behind `loader`.
    pub fn load(loader: &ConfigLoader) -> Result<Self, ConfigError> {
        let config = loader.load()?;
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Gets the current configuration.
    pub fn get(&self) -> Arc<Config> {
        self.config.load_full()
    }

    /// Swaps in a new configuration if it validates; the old one stays otherwise.
    pub fn update(&self, config: Config) -> Result<(), ConfigError> {
        config.validate()?;
        self.config.store(Arc::new(config));
        Ok(())
    }

    /// Re-reads the file behind `loader` and swaps it in.
    pub fn reload(&self, loader: &ConfigLoader) -> Result<Arc<Config>, ConfigError> {
        self.update(loader.load()?)?;
        info!("Configuration reloaded from {}", loader.path().display());
        Ok(self.get())
    }
}
