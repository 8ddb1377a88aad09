//! Bot configuration.

use crate::config::Config;

/// Bot configuration options.
pub struct BotConfig {
    /// Application configuration.
    pub app_config: Config,
    /// Seed from the command line; wins over `simulation.seed`.
    pub seed_override: Option<u64>,
    /// Application version.
    pub version: String,
}

impl BotConfig {
    pub fn new(app_config: Config) -> Self {
        Self {
            app_config,
            seed_override: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed_override = seed;
        }
        self
    }

    /// Seed the engine RNG will use, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed_override.or(self.app_config.simulation.seed)
    }
}
