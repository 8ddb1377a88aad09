//! Running trade statistics.

use serde::Serialize;

use super::TradeRecord;

/// Accumulated results of all simulated trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TradingStats {
    pub profit_loss: f64,
    pub total_trades: u64,
    pub successful_trades: u64,
}

impl TradingStats {
    /// Share of profitable trades in [0, 1]. Zero before the first trade.
    pub fn win_rate(&self) -> f64 {
        if self.total_trades == 0 {
            0.0
        } else {
            self.successful_trades as f64 / self.total_trades as f64
        }
    }

    /// Folds a completed trade into the totals.
    pub(crate) fn record(&mut self, trade: &TradeRecord) {
        self.total_trades += 1;
        if trade.is_profit() {
            self.successful_trades += 1;
        }
        self.profit_loss += trade.pnl;
    }
}
