//! Console notifier that prints events to stdout.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::config::{ConsoleConfig, ConsoleFormat};
use crate::notification::{Event, EventType, NotificationError, Notifier, format_event};

/// Renders events as text or JSON lines on a writer (stdout by default).
pub struct ConsoleNotifier<W: Write + Send = io::Stdout> {
    config: ConsoleConfig,
    writer: Mutex<W>,
}

impl ConsoleNotifier<io::Stdout> {
    pub fn stdout(config: ConsoleConfig) -> Self {
        Self::with_writer(config, io::stdout())
    }
}

impl<W: Write + Send> ConsoleNotifier<W> {
    pub fn with_writer(config: ConsoleConfig, writer: W) -> Self {
        Self {
            config,
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the notifier and returns the writer.
    #[cfg(test)]
    pub fn into_writer(self) -> Result<W, NotificationError> {
        self.writer
            .into_inner()
            .map_err(|_| NotificationError::new("console writer poisoned"))
    }

    fn render(&self, event: &Event) -> Result<String, NotificationError> {
        match self.config.format {
            ConsoleFormat::Text => Ok(format!(
                "[{}] {}",
                event.timestamp.format("%H:%M:%S"),
                format_event(event)
            )),
            ConsoleFormat::Json => serde_json::to_string(event)
                .map_err(|e| NotificationError::new(format!("failed to encode event: {}", e))),
        }
    }

    fn write_event(&self, event: &Event) -> Result<(), NotificationError> {
        let line = self.render(event)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| NotificationError::new("console writer poisoned"))?;
        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| NotificationError::new(format!("console write failed: {}", e)))
    }
}

#[async_trait::async_trait]
impl<W: Write + Send + 'static> Notifier for ConsoleNotifier<W> {
    async fn send(&self, event: &Event) -> Result<(), NotificationError> {
        if !self.is_enabled(event.event_type) {
            return Ok(());
        }
        self.write_event(event)
    }

    fn is_enabled(&self, event_type: EventType) -> bool {
        if !self.config.enabled {
            return false;
        }
        match event_type {
            EventType::Startup | EventType::Shutdown | EventType::Status => true,
            EventType::Price => self.config.notify_prices,
            EventType::Trade => self.config.notify_trades,
            EventType::Error => self.config.notify_errors,
        }
    }

    async fn close(&self) -> Result<(), NotificationError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| NotificationError::new("console writer poisoned"))?;
        writer
            .flush()
            .map_err(|e| NotificationError::new(format!("console flush failed: {}", e)))
    }
}
