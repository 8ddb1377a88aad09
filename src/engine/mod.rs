//! Simulation engine: price random walk, simulated trade outcomes and
//! trade-history bookkeeping.
//!
//! The engine is plain synchronous state. Timers and the view layer live in
//! [`crate::bot`]; anything that shares an engine must serialize access to it.

mod error;
mod history;
mod random;

pub use error::EngineError;
pub use history::TradeHistory;
#[cfg(test)]
pub use random::ScriptedRandom;
pub use random::{RandomSource, StdRandom};

use chrono::Utc;
use tracing::debug;

use crate::config::{SimulationConfig, TradingConfig};
use crate::domain::{Snapshot, TradeKind, TradeOrigin, TradeOutcome, TradeRecord, TradingStats};

/// Owns price, statistics and trade history of one simulated desk.
pub struct SimulationEngine {
    simulation: SimulationConfig,
    trading: TradingConfig,
    rng: Box<dyn RandomSource>,

    current_price: f64,
    stats: TradingStats,
    history: TradeHistory,
    running: bool,
}

impl SimulationEngine {
    /// Creates a stopped engine with a randomized starting price.
    pub fn new(
        simulation: SimulationConfig,
        trading: TradingConfig,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let jitter = (rng.uniform() - 0.5) * simulation.initial_spread;
        let current_price = (simulation.initial_price + jitter).max(simulation.floor_price);
        let history = TradeHistory::new(trading.history_limit);

        debug!(price = current_price, "Simulation engine created");

        Self {
            simulation,
            trading,
            rng,
            current_price,
            stats: TradingStats::default(),
            history,
            running: false,
        }
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn stats(&self) -> &TradingStats {
        &self.stats
    }

    #[cfg(test)]
    pub fn history(&self) -> &TradeHistory {
        &self.history
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances the price by one random-walk step and returns the new price.
    ///
    /// The result is never below `floor_price`, nor above `ceiling_price` when one is set.
    pub fn tick(&mut self) -> f64 {
        let delta = (self.rng.uniform() - 0.5) * self.simulation.volatility + self.simulation.drift;
        let mut next = (self.current_price + delta).max(self.simulation.floor_price);
        if let Some(ceiling) = self.simulation.ceiling_price {
            next = next.min(ceiling);
        }
        self.current_price = next;
        next
    }

    /// Sets the run flag. Returns true if the state changed.
    pub fn set_running(&mut self, running: bool) -> bool {
        let changed = self.running != running;
        self.running = running;
        changed
    }

    /// Flips the run flag and returns the new state.
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Executes an operator trade through the gated path.
    ///
    /// Fails with [`EngineError::NotRunning`] while stopped.
    pub fn execute_trade(
        &mut self,
        kind: TradeKind,
        amount: f64,
        pair: &str,
    ) -> Result<TradeRecord, EngineError> {
        self.ensure_running()?;
        validate_amount(amount)?;
        Ok(self.fill(kind, amount, pair, TradeOrigin::Manual))
    }

    /// Executes an operator trade regardless of the run flag.
    pub fn execute_manual_trade(
        &mut self,
        kind: TradeKind,
        amount: f64,
        pair: &str,
    ) -> Result<TradeRecord, EngineError> {
        validate_amount(amount)?;
        Ok(self.fill(kind, amount, pair, TradeOrigin::Manual))
    }

    /// Picks buy or sell with equal odds and executes it through the gated path.
    pub fn execute_automated_trade(
        &mut self,
        amount: f64,
        pair: &str,
    ) -> Result<TradeRecord, EngineError> {
        self.ensure_running()?;
        validate_amount(amount)?;
        let kind = if self.rng.uniform() > 0.5 {
            TradeKind::Buy
        } else {
            TradeKind::Sell
        };
        Ok(self.fill(kind, amount, pair, TradeOrigin::Automated))
    }

    /// Returns an owned copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.current_price,
            &self.stats,
            self.running,
            self.history.to_vec(),
        )
    }

    fn ensure_running(&self) -> Result<(), EngineError> {
        if self.running {
            Ok(())
        } else {
            Err(EngineError::NotRunning)
        }
    }

    fn fill(&mut self, kind: TradeKind, amount: f64, pair: &str, origin: TradeOrigin) -> TradeRecord {
        let success = self.rng.uniform() > self.trading.loss_probability;

        let (outcome, pnl) = if success {
            let rate = match kind {
                TradeKind::Buy => self.trading.buy_profit_rate,
                TradeKind::Sell => self.trading.sell_profit_rate,
            };
            (TradeOutcome::Profit, amount * rate)
        } else {
            (TradeOutcome::Loss, -(amount * self.trading.loss_rate))
        };

        let record = TradeRecord {
            kind,
            pair: pair.to_string(),
            amount,
            price: self.current_price,
            timestamp: Utc::now(),
            outcome,
            pnl,
            origin,
        };

        self.stats.record(&record);
        self.history.push(record.clone());

        debug!(
            kind = %kind,
            pair = %pair,
            amount,
            price = record.price,
            outcome = %outcome,
            pnl,
            "Simulated trade filled"
        );

        record
    }
}

fn validate_amount(amount: f64) -> Result<(), EngineError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidAmount(amount))
    }
}
