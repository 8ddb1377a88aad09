//! Timer configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Periods of the two simulation timers.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Interval between price ticks (default: 1s).
    #[serde(default = "default_price_interval", with = "duration")]
    pub price_interval: Duration,
    /// Interval between automated trades while the bot runs (default: 5s).
    #[serde(default = "default_trade_interval", with = "duration")]
    pub trade_interval: Duration,
}

fn default_price_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_trade_interval() -> Duration {
    Duration::from_secs(5)
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            price_interval: default_price_interval(),
            trade_interval: default_trade_interval(),
        }
    }
}
