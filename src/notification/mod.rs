//! View-layer seam: simulation events, the notifier trait and console rendering.

mod console;
mod notifier;

pub use console::ConsoleNotifier;
#[cfg(test)]
pub use notifier::{EventData, RecordingNotifier};
pub use notifier::{
    ErrorData, Event, EventType, MultiNotifier, NoopNotifier, NotificationError,
    Notifier, PriceData, ShutdownData, StartupData, StatusData, TradeData, format_event,
    format_history, format_snapshot,
};
