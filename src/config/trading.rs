//! Simulated trade outcome configuration.

use serde::Deserialize;

/// Trade outcome model and ticket defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
    /// Pairs the operator may select (e.g., "BTCUSD"). The first one is preselected.
    pub pairs: Vec<String>,
    /// Notional used when the entered amount is missing or unparsable.
    pub default_amount: f64,
    /// Probability that a trade ends in a loss (e.g., 0.4 for 40%).
    pub loss_probability: f64,
    /// Profit rate applied to winning buys (e.g., 0.02 for 2%).
    pub buy_profit_rate: f64,
    /// Profit rate applied to winning sells.
    pub sell_profit_rate: f64,
    /// Loss rate applied to losing trades of either kind.
    pub loss_rate: f64,
    /// Maximum number of trades kept in history.
    pub history_limit: usize,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            pairs: ["BTCUSD", "ETHUSD", "SOLUSD", "ADAUSD"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            default_amount: 100.0,
            loss_probability: 0.4,
            buy_profit_rate: 0.02,
            sell_profit_rate: 0.015,
            loss_rate: 0.01,
            history_limit: 50,
        }
    }
}
