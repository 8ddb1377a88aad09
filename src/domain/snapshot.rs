//! Read-only view of engine state handed to the view layer.

use serde::Serialize;

use super::{TradeRecord, TradingStats};

/// Owned copy of the engine state at one instant.
///
/// Mutating a snapshot never affects the engine it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub current_price: f64,
    pub profit_loss: f64,
    pub total_trades: u64,
    pub successful_trades: u64,
    /// Successful / total, 0 when no trades have run.
    pub win_rate: f64,
    pub is_running: bool,
    /// Most recent trade first.
    pub trade_history: Vec<TradeRecord>,
}

impl Snapshot {
    pub(crate) fn new(
        current_price: f64,
        stats: &TradingStats,
        is_running: bool,
        trade_history: Vec<TradeRecord>,
    ) -> Self {
        Self {
            current_price,
            profit_loss: stats.profit_loss,
            total_trades: stats.total_trades,
            successful_trades: stats.successful_trades,
            win_rate: stats.win_rate(),
            is_running,
            trade_history,
        }
    }

    pub fn failed_trades(&self) -> u64 {
        self.total_trades - self.successful_trades
    }

    /// Returns the most recent trade, if any.
    #[cfg(test)]
    pub fn last_trade(&self) -> Option<&TradeRecord> {
        self.trade_history.first()
    }
}
