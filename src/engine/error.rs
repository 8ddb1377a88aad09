//! Engine error types.

/// Reasons a simulated trade is rejected. A rejected trade mutates nothing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("trading bot is not running")]
    NotRunning,
    #[error("invalid trade amount: {0}")]
    InvalidAmount(f64),
}
