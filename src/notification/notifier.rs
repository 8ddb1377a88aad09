use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{Snapshot, TradeOrigin, TradeOutcome, TradeRecord};

/// Kind of simulation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Price moved on a tick
    Price,
    /// A simulated trade was executed
    Trade,
    /// A trade was rejected or another error occurred
    Error,
    /// Automated trading was switched on or off
    Status,
    /// Simulator started
    Startup,
    /// Simulator shut down
    Shutdown,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Price => write!(f, "price"),
            EventType::Trade => write!(f, "trade"),
            EventType::Error => write!(f, "error"),
            EventType::Status => write!(f, "status"),
            EventType::Startup => write!(f, "startup"),
            EventType::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// A price tick
#[derive(Debug, Clone, Serialize)]
pub struct PriceData {
    pub price: f64,
    pub previous: f64,
}

/// An executed trade and the totals right after it
#[derive(Debug, Clone, Serialize)]
pub struct TradeData {
    pub trade: TradeRecord,
    pub profit_loss: f64,
    pub total_trades: u64,
    pub win_rate: f64,
}

/// An error surfaced to the operator
#[derive(Debug, Clone, Serialize)]
pub struct ErrorData {
    pub component: String,
    pub message: String,
    pub error: Option<String>,
}

/// Automated trading switched on or off
#[derive(Debug, Clone, Serialize)]
pub struct StatusData {
    pub running: bool,
}

/// Simulator start
#[derive(Debug, Clone, Serialize)]
pub struct StartupData {
    pub name: String,
    pub version: String,
    pub pairs: Vec<String>,
    pub price: f64,
    pub seed: Option<u64>,
}

/// Simulator shutdown
#[derive(Debug, Clone, Serialize)]
pub struct ShutdownData {
    pub reason: String,
    pub uptime: Duration,
    pub graceful: bool,
    pub total_trades: u64,
    pub profit_loss: f64,
    pub win_rate: f64,
}

/// Event payload
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EventData {
    Price(PriceData),
    Trade(TradeData),
    Error(ErrorData),
    Status(StatusData),
    Startup(StartupData),
    Shutdown(ShutdownData),
}

/// Simulation event delivered to the view layer
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub data: EventData,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            timestamp: Utc::now(),
            data,
        }
    }

    pub fn price(data: PriceData) -> Self {
        Self::new(EventType::Price, EventData::Price(data))
    }

    pub fn trade(data: TradeData) -> Self {
        Self::new(EventType::Trade, EventData::Trade(data))
    }

    pub fn error(data: ErrorData) -> Self {
        Self::new(EventType::Error, EventData::Error(data))
    }

    pub fn status(data: StatusData) -> Self {
        Self::new(EventType::Status, EventData::Status(data))
    }

    pub fn startup(data: StartupData) -> Self {
        Self::new(EventType::Startup, EventData::Startup(data))
    }

    pub fn shutdown(data: ShutdownData) -> Self {
        Self::new(EventType::Shutdown, EventData::Shutdown(data))
    }
}

/// Receives simulation events and renders them somewhere
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an event and wait for completion
    async fn send(&self, event: &Event) -> Result<(), NotificationError>;

    /// Whether events of this type are rendered
    fn is_enabled(&self, event_type: EventType) -> bool;

    /// Flush and release resources
    async fn close(&self) -> Result<(), NotificationError>;
}

/// Notification error
#[derive(Debug, Clone)]
pub struct NotificationError {
    pub message: String,
}

impl fmt::Display for NotificationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NotificationError: {}", self.message)
    }
}

impl std::error::Error for NotificationError {}

impl NotificationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Fans events out to several notifiers
pub struct MultiNotifier {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl MultiNotifier {
    pub fn new(notifiers: Vec<Arc<dyn Notifier>>) -> Self {
        Self { notifiers }
    }
}

#[async_trait::async_trait]
impl Notifier for MultiNotifier {
    async fn send(&self, event: &Event) -> Result<(), NotificationError> {
        let mut errors = Vec::new();
        for notifier in &self.notifiers {
            if notifier.is_enabled(event.event_type) {
                if let Err(e) = notifier.send(event).await {
                    errors.push(e.message);
                }
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(NotificationError::new(errors.join("; ")))
        }
    }

    fn is_enabled(&self, event_type: EventType) -> bool {
        self.notifiers.iter().any(|n| n.is_enabled(event_type))
    }

    async fn close(&self) -> Result<(), NotificationError> {
        let mut errors = Vec::new();
        for notifier in &self.notifiers {
            if let Err(e) = notifier.close().await {
                errors.push(e.message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(NotificationError::new(errors.join("; ")))
        }
    }
}

/// Drops every event
pub struct NoopNotifier;

impl NoopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, _event: &Event) -> Result<(), NotificationError> {
        Ok(())
    }

    fn is_enabled(&self, _event_type: EventType) -> bool {
        false
    }

    async fn close(&self) -> Result<(), NotificationError> {
        Ok(())
    }
}

/// Keeps every event in memory for assertions
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    events: std::sync::Mutex<Vec<Event>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, event_type: EventType) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, event: &Event) -> Result<(), NotificationError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn is_enabled(&self, _event_type: EventType) -> bool {
        true
    }

    async fn close(&self) -> Result<(), NotificationError> {
        Ok(())
    }
}

// === Formatting ===

/// Formats a price tick
pub fn format_price(data: &PriceData) -> String {
    let change = data.price - data.previous;
    let sign = if change >= 0.0 { "+" } else { "-" };
    format!(
        "Price: {} ({}{:.2})",
        format_usd(data.price),
        sign,
        change.abs()
    )
}

/// Formats an executed trade, e.g.
/// `BUY trade executed: 100 USD of BTCUSD at $50,000.00 - Profit: $2.00`
pub fn format_trade(data: &TradeData) -> String {
    let trade = &data.trade;
    let result = match trade.outcome {
        TradeOutcome::Profit => format!("Profit: {}", format_usd(trade.pnl)),
        TradeOutcome::Loss => format!("Loss: {}", format_usd(trade.pnl.abs())),
    };
    let origin = match trade.origin {
        TradeOrigin::Automated => " [auto]",
        TradeOrigin::Manual => "",
    };

    format!(
        "{} trade executed: {} USD of {} at {} - {}{}\n\
         P&L: {} | Trades: {} | Win rate: {}",
        trade.kind.to_string().to_uppercase(),
        trade.amount,
        trade.pair,
        format_usd(trade.price),
        result,
        origin,
        format_usd(data.profit_loss),
        data.total_trades,
        format_percent(data.win_rate)
    )
}

/// Formats an error
pub fn format_error(data: &ErrorData) -> String {
    let error_str = data
        .error
        .as_ref()
        .map(|e| format!(" ({})", e))
        .unwrap_or_default();

    format!("[{}] {}{}", data.component, data.message, error_str)
}

/// Formats a run-state change
pub fn format_status(data: &StatusData) -> String {
    if data.running {
        "Algorithmic trading bot STARTED - Automated trading enabled".to_string()
    } else {
        "Algorithmic trading bot STOPPED".to_string()
    }
}

/// Formats simulator start
pub fn format_startup(data: &StartupData) -> String {
    let seed = data
        .seed
        .map(|s| s.to_string())
        .unwrap_or_else(|| "random".to_string());

    format!(
        "{} {} initialized\n\
         Pairs: {}\n\
         Price: {}\n\
         Seed: {}",
        data.name,
        data.version,
        data.pairs.join(", "),
        format_usd(data.price),
        seed
    )
}

/// Formats simulator shutdown
pub fn format_shutdown(data: &ShutdownData) -> String {
    let status = if data.graceful { "graceful" } else { "forced" };

    format!(
        "Simulator stopped ({}, {})\n\
         Uptime: {}\n\
         Trades: {} | P&L: {} | Win rate: {}",
        data.reason,
        status,
        format_duration(data.uptime),
        add_thousand_separators(data.total_trades),
        format_usd(data.profit_loss),
        format_percent(data.win_rate)
    )
}

/// Formats an event into a display line
pub fn format_event(event: &Event) -> String {
    match &event.data {
        EventData::Price(data) => format_price(data),
        EventData::Trade(data) => format_trade(data),
        EventData::Error(data) => format_error(data),
        EventData::Status(data) => format_status(data),
        EventData::Startup(data) => format_startup(data),
        EventData::Shutdown(data) => format_shutdown(data),
    }
}

/// Formats the dashboard summary of a snapshot
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    let state = if snapshot.is_running { "RUNNING" } else { "STOPPED" };
    format!(
        "Bot: {}\n\
         Price: {}\n\
         P&L: {}\n\
         Trades: {} ({} won, {} lost)\n\
         Win rate: {}",
        state,
        format_usd(snapshot.current_price),
        format_usd(snapshot.profit_loss),
        add_thousand_separators(snapshot.total_trades),
        add_thousand_separators(snapshot.successful_trades),
        add_thousand_separators(snapshot.failed_trades()),
        format_percent(snapshot.win_rate)
    )
}

/// Formats up to `limit` trades, most recent first
pub fn format_history(trades: &[TradeRecord], limit: usize) -> String {
    if trades.is_empty() {
        return "No trades yet".to_string();
    }

    trades
        .iter()
        .take(limit)
        .map(|t| {
            format!(
                "{} {:<4} {:<8} {:>10} @ {} {}",
                t.timestamp.format("%H:%M:%S"),
                t.kind.to_string().to_uppercase(),
                t.pair,
                t.amount,
                format_usd(t.price),
                t.outcome
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// === Helpers ===

/// Formats a dollar amount with two decimals and thousand separators ("-$1,234.50")
fn format_usd(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        add_thousand_separators(cents / 100),
        cents % 100
    )
}

/// Formats a ratio in [0, 1] as a percentage with one decimal
fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Formats a duration
fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

/// Adds thousand separators
fn add_thousand_separators(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
