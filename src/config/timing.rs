//! Timing configuration for the viewer's timed transitions

use crate::viewer::Timing;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// Simulated load delay after startup
    pub load_delay_ms: u64,
    /// How long "copied" stays on a code block
    pub ack_window_ms: u64,
    /// Redraw / animation tick
    pub tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: 1000,
            ack_window_ms: 2000,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileTiming {
    pub load_delay_ms: Option<u64>,
    pub ack_window_ms: Option<u64>,
    pub tick_ms: Option<u64>,
}

impl TimingConfig {
    pub fn from_file(file: Option<FileTiming>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            load_delay_ms: file.load_delay_ms.unwrap_or(defaults.load_delay_ms),
            ack_window_ms: file.ack_window_ms.unwrap_or(defaults.ack_window_ms),
            // Zero would spin the event loop
            tick_ms: file.tick_ms.unwrap_or(defaults.tick_ms).max(10),
        }
    }

    /// Durations handed to the viewer
    pub fn viewer_timing(&self) -> Timing {
        Timing {
            load_delay: Duration::from_millis(self.load_delay_ms),
            ack_window: Duration::from_millis(self.ack_window_ms),
        }
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
