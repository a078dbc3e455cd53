// Input handling with per-key repeat behavior
//
// Terminals without key-release reporting send a stream of presses while a
// key is held. Navigation keys repeat after a delay; action keys (copy,
// toggle, quit) fire once per press so a held `y` doesn't queue a burst of
// clipboard writes. Text typed into the search box bypasses this entirely.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Debounce window for action keys on terminals without release events
const ACTION_DEBOUNCE: Duration = Duration::from_millis(150);

/// Defines how a key should behave when pressed/held
#[derive(Debug, Clone, Copy)]
pub enum KeyBehavior {
    /// Trigger once per press
    StateChange,

    /// Trigger on press, then repeat after an initial delay
    Repeatable {
        initial_delay: Duration,
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    /// Arrow keys and j/k
    pub fn navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(400),
            repeat_interval: Duration::from_millis(40),
        }
    }

    /// PageUp/PageDown
    pub fn fast_navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(300),
            repeat_interval: Duration::from_millis(30),
        }
    }
}

/// Tracks a key from its first press until release
#[derive(Debug, Default)]
struct KeyState {
    press_started: Option<Instant>,
    last_triggered: Option<Instant>,
}

/// Input handler that manages key behaviors
#[derive(Debug, Default)]
pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    key_behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure_keys(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.key_behaviors.insert(*key, behavior);
        }
    }

    /// Handle a key press event. Returns true if the action should fire.
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.handle_key_press_at(key, Instant::now())
    }

    fn handle_key_press_at(&mut self, key: KeyCode, now: Instant) -> bool {
        let behavior = self
            .key_behaviors
            .get(&key)
            .copied()
            .unwrap_or(KeyBehavior::StateChange);
        let state = self.key_states.entry(key).or_default();

        let (Some(press_start), Some(last)) = (state.press_started, state.last_triggered) else {
            state.press_started = Some(now);
            state.last_triggered = Some(now);
            return true;
        };

        let fire = match behavior {
            // Without release events a new press looks like a held key;
            // treat anything past the debounce window as a fresh press
            KeyBehavior::StateChange => now.duration_since(last) >= ACTION_DEBOUNCE,
            KeyBehavior::Repeatable {
                initial_delay,
                repeat_interval,
            } => {
                now.duration_since(press_start) >= initial_delay
                    && now.duration_since(last) >= repeat_interval
            }
        };
        if fire {
            state.last_triggered = Some(now);
        }
        fire
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.key_states.remove(&key);
    }

    /// Default bindings for the viewer
    pub fn with_default_config() -> Self {
        let mut handler = Self::new();

        handler.configure_keys(
            &[
                KeyCode::Up,
                KeyCode::Down,
                KeyCode::Char('j'),
                KeyCode::Char('k'),
            ],
            KeyBehavior::navigation(),
        );
        handler.configure_keys(
            &[
                KeyCode::PageUp,
                KeyCode::PageDown,
                KeyCode::Char(' '),
            ],
            KeyBehavior::fast_navigation(),
        );
        // Everything else (Enter, Esc, Tab, y, m, r, q, ...) is StateChange

        handler
    }
}
