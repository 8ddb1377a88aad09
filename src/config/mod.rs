//! Configuration loading and validation for the trading simulator.
//!
//! Uses serde_yaml to load YAML configuration files. Every section except
//! `app` may be omitted and falls back to the demo's built-in values.

mod app;
mod duration;
mod error;
mod notification;
mod scheduler;
mod simulation;
mod trading;

pub use app::AppConfig;
pub use error::ConfigError;
pub use notification::{ConsoleConfig, ConsoleFormat, NotificationConfig};
pub use scheduler::SchedulerConfig;
pub use simulation::SimulationConfig;
pub use trading::TradingConfig;

use serde::Deserialize;
use std::{env, fs, path::Path};
use tracing::warn;

/// Environment variable that overrides `simulation.seed`.
const SEED_ENV_VAR: &str = "SIM_SEED";

/// Root configuration structure for the simulator.
///
/// Required sections: app.
/// Optional sections: simulation, trading, scheduler, notification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// Random-walk price model.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Trade outcome model and allowed pairs.
    #[serde(default)]
    pub trading: TradingConfig,
    /// Price and automated-trade timer periods.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// View-layer outputs (optional).
    pub notification: Option<NotificationConfig>,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Loads `.env` first (if present) so `SIM_SEED` can pin the RNG seed.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.load_overrides_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Like [`Config::load`], but falls back to defaults when the file does not exist.
    pub fn load_or_default(path: &str) -> Result<Self, ConfigError> {
        if Path::new(path).exists() {
            return Self::load(path);
        }

        warn!(path = %path, "Config file not found, using built-in defaults");
        dotenvy::dotenv().ok();

        let mut config = Config::default();
        config.load_overrides_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment overrides.
    fn load_overrides_from_env(&mut self) {
        if let Ok(raw) = env::var(SEED_ENV_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.simulation.seed = Some(seed),
                Err(_) => warn!(value = %raw, "Ignoring non-numeric {}", SEED_ENV_VAR),
            }
        }
    }

    /// Returns the console notifier settings if console output is enabled.
    ///
    /// Without a `notification` section the console is on with default settings.
    pub fn console(&self) -> Option<ConsoleConfig> {
        match self.notification.as_ref() {
            None => Some(ConsoleConfig::default()),
            Some(n) => n.console.clone().filter(|c| c.enabled),
        }
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        let sim = &self.simulation;
        if !(sim.floor_price.is_finite() && sim.floor_price > 0.0) {
            return Err(ConfigError::Validation(
                "simulation.floor_price must be positive".into(),
            ));
        }
        if !sim.initial_price.is_finite()
            || !sim.initial_spread.is_finite()
            || sim.initial_spread < 0.0
        {
            return Err(ConfigError::Validation(
                "simulation.initial_price and initial_spread must be finite, spread non-negative"
                    .into(),
            ));
        }
        if !(sim.volatility.is_finite() && sim.volatility >= 0.0) || !sim.drift.is_finite() {
            return Err(ConfigError::Validation(
                "simulation.volatility must be non-negative and drift finite".into(),
            ));
        }
        if let Some(ceiling) = sim.ceiling_price {
            if !ceiling.is_finite() || ceiling <= sim.floor_price {
                return Err(ConfigError::Validation(format!(
                    "simulation.ceiling_price ({}) must be above floor_price ({})",
                    ceiling, sim.floor_price
                )));
            }
        }

        let trading = &self.trading;
        if trading.pairs.is_empty() {
            return Err(ConfigError::Validation(
                "at least one trading pair is required".into(),
            ));
        }
        if trading.pairs.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "trading.pairs must not contain empty symbols".into(),
            ));
        }
        if !(trading.default_amount.is_finite() && trading.default_amount > 0.0) {
            return Err(ConfigError::Validation(
                "trading.default_amount must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&trading.loss_probability) {
            return Err(ConfigError::Validation(
                "trading.loss_probability must be within [0, 1]".into(),
            ));
        }
        for (name, rate) in [
            ("buy_profit_rate", trading.buy_profit_rate),
            ("sell_profit_rate", trading.sell_profit_rate),
            ("loss_rate", trading.loss_rate),
        ] {
            if !(rate.is_finite() && rate >= 0.0) {
                return Err(ConfigError::Validation(format!(
                    "trading.{} must be non-negative",
                    name
                )));
            }
        }
        if trading.history_limit == 0 {
            return Err(ConfigError::Validation(
                "trading.history_limit must be positive".into(),
            ));
        }

        if self.scheduler.price_interval.is_zero() || self.scheduler.trade_interval.is_zero() {
            return Err(ConfigError::Validation(
                "scheduler intervals must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
