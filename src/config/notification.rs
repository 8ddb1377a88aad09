//! Notification configuration.

use serde::Deserialize;

/// Notification settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    /// Console rendering of simulation events.
    pub console: Option<ConsoleConfig>,
}

/// Output format of the console notifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Console notifier settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    /// Whether console output is active.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Output format.
    #[serde(default)]
    pub format: ConsoleFormat,
    /// Print every price tick.
    #[serde(default)]
    pub notify_prices: bool,
    /// Print executed trades.
    #[serde(default = "enabled_by_default")]
    pub notify_trades: bool,
    /// Print rejected trades and other errors.
    #[serde(default = "enabled_by_default")]
    pub notify_errors: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            format: ConsoleFormat::Text,
            notify_prices: false,
            notify_trades: true,
            notify_errors: true,
        }
    }
}
