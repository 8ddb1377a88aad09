//! Simulated trades and their classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// TradeKind represents the direction of a simulated trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    /// Buy the pair.
    Buy,
    /// Sell the pair.
    Sell,
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeKind::Buy => write!(f, "buy"),
            TradeKind::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for TradeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "b" => Ok(TradeKind::Buy),
            "sell" | "s" => Ok(TradeKind::Sell),
            _ => Err(format!("Unknown trade kind: {}", s)),
        }
    }
}

/// TradeOutcome classifies a completed simulated trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOutcome {
    Profit,
    Loss,
}

impl fmt::Display for TradeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeOutcome::Profit => write!(f, "profit"),
            TradeOutcome::Loss => write!(f, "loss"),
        }
    }
}

/// TradeOrigin records which path produced a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeOrigin {
    /// Generated by the periodic trade timer.
    Automated,
    /// Requested by the operator.
    Manual,
}

/// TradeRecord is an executed simulated trade. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Buy or sell.
    pub kind: TradeKind,
    /// Symbol the trade was placed on (e.g., "BTCUSD").
    pub pair: String,
    /// Notional amount in quote currency.
    pub amount: f64,
    /// Simulated price at execution time.
    pub price: f64,
    /// When the trade was executed.
    pub timestamp: DateTime<Utc>,
    /// Profit or loss classification.
    pub outcome: TradeOutcome,
    /// Signed change applied to the running P&L.
    pub pnl: f64,
    /// Automated or manual.
    pub origin: TradeOrigin,
}

impl TradeRecord {
    /// Returns true if the trade was classified as a profit.
    pub fn is_profit(&self) -> bool {
        self.outcome == TradeOutcome::Profit
    }
}
