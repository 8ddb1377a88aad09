//! Simulated trading bot runtime.
//!
//! Owns the engine behind a single lock and drives it from two periodic
//! tasks (price ticks and automated trades) plus operator requests.

mod config;
mod error;
mod ticket;

pub use config::BotConfig;
pub use error::BotError;
pub use ticket::{Ticket, parse_amount};

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{Snapshot, TradeKind, TradeRecord};
use crate::engine::{EngineError, RandomSource, SimulationEngine, StdRandom};
use crate::notification::{
    ConsoleNotifier, ErrorData, Event, MultiNotifier, NoopNotifier, Notifier, PriceData, ShutdownData,
    StartupData, StatusData, TradeData,
};
use crate::scheduler::PeriodicTask;

const NOT_RUNNING_MESSAGE: &str = "Trading bot is not running. Please start the bot first.";

/// Coordinates the simulation engine, its timers and the view layer.
pub struct Bot {
    cfg: Config,
    version: String,
    seed: Option<u64>,

    engine: Arc<Mutex<SimulationEngine>>,
    notifier: Arc<dyn Notifier>,
    ticket: Arc<Mutex<Ticket>>,

    price_task: PeriodicTask,
    trade_task: PeriodicTask,

    started_at: Mutex<Option<Instant>>,
}

impl Bot {
    /// Creates a new Bot with the RNG and notifier described by the config.
    pub fn new(cfg: BotConfig) -> Result<Self, BotError> {
        let rng = StdRandom::from_seed_option(cfg.seed());

        let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::new();
        if let Some(console) = cfg.app_config.console() {
            info!(format = ?console.format, "Console notifier created");
            notifiers.push(Arc::new(ConsoleNotifier::stdout(console)));
        }

        let notifier: Arc<dyn Notifier> = if notifiers.is_empty() {
            Arc::new(NoopNotifier::new())
        } else {
            Arc::new(MultiNotifier::new(notifiers))
        };

        Self::with_parts(cfg, Box::new(rng), notifier)
    }

    /// Creates a new Bot with an explicit RNG and notifier.
    pub fn with_parts(
        cfg: BotConfig,
        rng: Box<dyn RandomSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, BotError> {
        cfg.app_config.validate()?;

        let seed = cfg.seed();
        let app_config = cfg.app_config;

        let engine = SimulationEngine::new(
            app_config.simulation.clone(),
            app_config.trading.clone(),
            rng,
        );

        let ticket = Ticket {
            amount: app_config.trading.default_amount,
            pair: app_config.trading.pairs[0].clone(),
        };

        let price_task = PeriodicTask::new("price", app_config.scheduler.price_interval);
        let trade_task = PeriodicTask::new("auto-trade", app_config.scheduler.trade_interval);

        Ok(Bot {
            cfg: app_config,
            version: cfg.version,
            seed,
            engine: Arc::new(Mutex::new(engine)),
            notifier,
            ticket: Arc::new(Mutex::new(ticket)),
            price_task,
            trade_task,
            started_at: Mutex::new(None),
        })
    }

    /// Starts price simulation. Automated trading stays off until [`Bot::set_running`].
    pub async fn start(&self) -> Result<(), BotError> {
        {
            let mut started_at = self.started_at.lock().await;
            if started_at.is_some() {
                return Err(BotError::AlreadyStarted);
            }
            *started_at = Some(Instant::now());
        }

        let price = price_tick(&self.engine, self.notifier.as_ref()).await;

        info!(
            version = %self.version,
            seed = ?self.seed,
            pairs = ?self.cfg.trading.pairs,
            price,
            "Starting trading simulator"
        );

        send_notification(
            self.notifier.as_ref(),
            Event::startup(StartupData {
                name: self.cfg.app.name.clone(),
                version: self.version.clone(),
                pairs: self.cfg.trading.pairs.clone(),
                price,
                seed: self.seed,
            }),
        )
        .await;

        let engine = Arc::clone(&self.engine);
        let notifier = Arc::clone(&self.notifier);
        self.price_task
            .start(move || {
                let engine = Arc::clone(&engine);
                let notifier = Arc::clone(&notifier);
                async move {
                    price_tick(&engine, notifier.as_ref()).await;
                }
            })
            .await;

        Ok(())
    }

    /// Switches automated trading on or off. Returns true if the state changed.
    pub async fn set_running(&self, running: bool) -> bool {
        let changed = self.engine.lock().await.set_running(running);
        self.apply_run_state(running, changed).await;
        changed
    }

    /// Flips automated trading and returns the new state.
    pub async fn toggle(&self) -> bool {
        let running = self.engine.lock().await.toggle_running();
        self.apply_run_state(running, true).await;
        running
    }

    /// Executes an operator trade. Rejected while automated trading is off.
    pub async fn trade(&self, kind: TradeKind) -> Result<TradeRecord, BotError> {
        let ticket = self.ticket().await;
        execute(&self.engine, self.notifier.as_ref(), |engine| {
            engine.execute_trade(kind, ticket.amount, &ticket.pair)
        })
        .await
        .map_err(BotError::from)
    }

    /// Executes an operator trade regardless of the run state.
    pub async fn manual_trade(&self, kind: TradeKind) -> Result<TradeRecord, BotError> {
        let ticket = self.ticket().await;
        execute(&self.engine, self.notifier.as_ref(), |engine| {
            engine.execute_manual_trade(kind, ticket.amount, &ticket.pair)
        })
        .await
        .map_err(BotError::from)
    }

    /// Sets the ticket amount from operator input and returns the value used.
    pub async fn set_amount(&self, input: Option<&str>) -> f64 {
        let amount = parse_amount(input, self.cfg.trading.default_amount);
        self.ticket.lock().await.amount = amount;
        debug!(amount, "Ticket amount set");
        amount
    }

    /// Selects the pair for subsequent trades. Only configured pairs are accepted.
    pub async fn set_pair(&self, pair: &str) -> Result<(), BotError> {
        let pair = pair.trim();
        let Some(known) = self
            .cfg
            .trading
            .pairs
            .iter()
            .find(|p| p.eq_ignore_ascii_case(pair))
        else {
            return Err(BotError::UnknownPair(pair.to_string()));
        };
        debug!(pair = %known, "Ticket pair set");
        self.ticket.lock().await.pair = known.clone();
        Ok(())
    }

    /// Returns a copy of the current ticket.
    pub async fn ticket(&self) -> Ticket {
        self.ticket.lock().await.clone()
    }

    /// Returns the pairs the operator may select.
    pub fn pairs(&self) -> &[String] {
        &self.cfg.trading.pairs
    }

    /// Returns a read-only copy of the engine state.
    pub async fn snapshot(&self) -> Snapshot {
        self.engine.lock().await.snapshot()
    }

    /// Returns true if automated trading is on.
    pub async fn is_running(&self) -> bool {
        self.engine.lock().await.is_running()
    }

    /// Returns how long the simulator has been running.
    pub async fn uptime(&self) -> Duration {
        self.started_at
            .lock()
            .await
            .map(|s| s.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Stops both timers and reports final statistics.
    pub async fn shutdown(&self, reason: &str) -> Result<(), BotError> {
        info!(reason = %reason, "Stopping simulator...");

        self.trade_task.stop().await;
        self.price_task.stop().await;

        let snapshot = {
            let mut engine = self.engine.lock().await;
            engine.set_running(false);
            engine.snapshot()
        };
        let uptime = self.uptime().await;

        send_notification(
            self.notifier.as_ref(),
            Event::shutdown(ShutdownData {
                reason: reason.to_string(),
                uptime,
                graceful: true,
                total_trades: snapshot.total_trades,
                profit_loss: snapshot.profit_loss,
                win_rate: snapshot.win_rate,
            }),
        )
        .await;

        if let Err(e) = self.notifier.close().await {
            warn!(error = %e, "Failed to close notifier");
        }

        info!(
            uptime = ?uptime,
            trades = snapshot.total_trades,
            profit_loss = snapshot.profit_loss,
            "Simulator stopped"
        );

        Ok(())
    }

    /// Brings the trade task in line with the run flag and announces changes.
    async fn apply_run_state(&self, running: bool, changed: bool) {
        if running {
            self.start_trade_task().await;
        } else {
            self.trade_task.stop().await;
        }

        if changed {
            if running {
                info!(
                    task = self.trade_task.name(),
                    interval = ?self.trade_task.period(),
                    "Automated trading started"
                );
            } else {
                info!(task = self.trade_task.name(), "Automated trading stopped");
            }
            send_notification(self.notifier.as_ref(), Event::status(StatusData { running })).await;
        }
    }

    async fn start_trade_task(&self) {
        let engine = Arc::clone(&self.engine);
        let notifier = Arc::clone(&self.notifier);
        let ticket = Arc::clone(&self.ticket);
        self.trade_task
            .start(move || {
                let engine = Arc::clone(&engine);
                let notifier = Arc::clone(&notifier);
                let ticket = Arc::clone(&ticket);
                async move {
                    automated_trade(&engine, notifier.as_ref(), &ticket).await;
                }
            })
            .await;
    }
}

/// Advances the price once and reports the move.
async fn price_tick(engine: &Mutex<SimulationEngine>, notifier: &dyn Notifier) -> f64 {
    let (previous, price) = {
        let mut engine = engine.lock().await;
        let previous = engine.current_price();
        (previous, engine.tick())
    };

    send_notification(notifier, Event::price(PriceData { price, previous })).await;
    price
}

/// One run of the automated-trade timer.
async fn automated_trade(
    engine: &Mutex<SimulationEngine>,
    notifier: &dyn Notifier,
    ticket: &Mutex<Ticket>,
) {
    let ticket = ticket.lock().await.clone();

    // Run flag and fill share one guard; a stop in between is a skip.
    let outcome = {
        let mut engine = engine.lock().await;
        if !engine.is_running() {
            debug!("Automated trade skipped, bot stopped");
            return;
        }
        fill_locked(&mut *engine, |engine| {
            engine.execute_automated_trade(ticket.amount, &ticket.pair)
        })
    };

    if let Err(e) = report(notifier, outcome).await {
        debug!(error = %e, "Automated trade rejected");
    }
}

/// Runs `op` under the engine lock, then reports the trade or the rejection.
async fn execute<F>(
    engine: &Mutex<SimulationEngine>,
    notifier: &dyn Notifier,
    op: F,
) -> Result<TradeRecord, EngineError>
where
    F: FnOnce(&mut SimulationEngine) -> Result<TradeRecord, EngineError>,
{
    let outcome = {
        let mut engine = engine.lock().await;
        fill_locked(&mut *engine, op)
    };
    report(notifier, outcome).await
}

/// Applies `op` to an already locked engine and captures the running totals.
fn fill_locked<F>(engine: &mut SimulationEngine, op: F) -> Result<TradeData, EngineError>
where
    F: FnOnce(&mut SimulationEngine) -> Result<TradeRecord, EngineError>,
{
    op(engine).map(|trade| {
        let stats = engine.stats();
        TradeData {
            trade,
            profit_loss: stats.profit_loss,
            total_trades: stats.total_trades,
            win_rate: stats.win_rate(),
        }
    })
}

/// Logs and announces a filled trade or a rejection.
async fn report(
    notifier: &dyn Notifier,
    outcome: Result<TradeData, EngineError>,
) -> Result<TradeRecord, EngineError> {
    match outcome {
        Ok(data) => {
            info!(
                kind = %data.trade.kind,
                pair = %data.trade.pair,
                amount = data.trade.amount,
                price = data.trade.price,
                outcome = %data.trade.outcome,
                pnl = data.trade.pnl,
                profit_loss = data.profit_loss,
                "Trade executed"
            );
            let trade = data.trade.clone();
            send_notification(notifier, Event::trade(data)).await;
            Ok(trade)
        }
        Err(e) => {
            let message = match &e {
                EngineError::NotRunning => NOT_RUNNING_MESSAGE.to_string(),
                EngineError::InvalidAmount(amount) => {
                    format!("Trade amount must be a positive number, got {}", amount)
                }
            };
            warn!(error = %e, "Trade rejected");
            send_notification(
                notifier,
                Event::error(ErrorData {
                    component: "engine".to_string(),
                    message,
                    error: Some(e.to_string()),
                }),
            )
            .await;
            Err(e)
        }
    }
}

/// Sends a notification event, logging delivery failures.
async fn send_notification(notifier: &dyn Notifier, event: Event) {
    if let Err(e) = notifier.send(&event).await {
        debug!(
            event_type = %event.event_type,
            error = %e,
            "Failed to send notification"
        );
    }
}

#[cfg(test)]
mod tests;
