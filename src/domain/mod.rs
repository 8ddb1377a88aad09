//! Domain models for the simulated trading desk.

mod snapshot;
mod stats;
mod trade;

pub use snapshot::Snapshot;
pub use stats::TradingStats;
pub use trade::{TradeKind, TradeOrigin, TradeOutcome, TradeRecord};
