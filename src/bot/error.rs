//! Bot error types.

use crate::config::ConfigError;
use crate::engine::EngineError;

/// Bot error type.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("bot is already started")]
    AlreadyStarted,
    #[error("unknown trading pair: {0}")]
    UnknownPair(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
