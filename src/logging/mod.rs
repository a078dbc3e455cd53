// Logging module - in-memory log capture for the TUI
//
// A tracing layer that records events into a bounded ring buffer instead of
// writing to the terminal, which would garble the alternate screen. The log
// strip at the bottom of the viewer reads from the same buffer.

use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

/// Maximum number of log entries to keep in memory
const MAX_LOG_ENTRIES: usize = 500;

/// A single log entry captured from tracing
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    /// Message followed by any structured fields as `key=value`
    pub message: String,
}

impl LogEntry {
    /// Last segment of the module path, e.g. `clipboard`
    pub fn short_target(&self) -> &str {
        self.target.rsplit("::").next().unwrap_or(&self.target)
    }

    /// One-line rendering used by the log strip
    pub fn format_line(&self) -> String {
        format!(
            "[{}] {:5} {}: {}",
            self.timestamp.format("%H:%M:%S"),
            self.level.as_str(),
            self.short_target(),
            self.message
        )
    }
}

/// In-memory log buffer with bounded size (ring buffer)
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Add a log entry, evicting the oldest when full
    pub fn add(&self, entry: LogEntry) {
        // A poisoned lock only means a panic mid-push; the deque is still usable
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// The newest `n` entries, oldest first
    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let skip = entries.len().saturating_sub(n);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Tracing layer that captures events into a `LogBuffer`
pub struct TuiLogLayer {
    buffer: LogBuffer,
}

impl TuiLogLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.add(LogEntry {
            timestamp: Local::now(),
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message: visitor.finish(),
        });
    }
}

/// Collects the message and structured fields of an event
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let buffer = LogBuffer::with_capacity(2);
        buffer.add(entry("one"));
        buffer.add(entry("two"));
        buffer.add(entry("three"));

        let messages: Vec<_> = buffer.recent(10).into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_recent_returns_newest_in_order() {
        let buffer = LogBuffer::new();
        for i in 0..5 {
            buffer.add(entry(&i.to_string()));
        }
        let messages: Vec<_> = buffer.recent(2).into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["3", "4"]);
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let buffer = LogBuffer::new();
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(buffer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(code_id = "c1", "Clipboard write failed: {}", "no display");
        });

        let entries = buffer.recent(1);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, Level::WARN);
        assert_eq!(
            entries[0].message,
            "Clipboard write failed: no display code_id=c1"
        );
        assert!(entries[0].format_line().contains("WARN"));
        assert_eq!(entries[0].short_target(), "tests");
        assert!(entries[0]
            .format_line()
            .ends_with("tests: Clipboard write failed: no display code_id=c1"));
    }
}
