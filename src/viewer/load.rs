//! Load phase controller
//!
//! `Loading -> Ready` when the load timer fires, or `Loading -> Error` via
//! `fail`, then back to `Loading` via `retry`. Nothing leaves `Ready` short of
//! a remount.

use super::state::LoadPhase;
use super::timers::{TimerKind, Timeout};
use super::Viewer;

impl Viewer {
    pub(super) fn start_load_timer(&mut self) {
        self.timers
            .schedule(Timeout::LoadReady, self.timing.load_delay);
    }

    /// Move a loading viewer into the error phase
    ///
    /// Reserved for a real content fetch; the simulated load never calls it.
    /// Returns false if the viewer was not loading.
    #[allow(dead_code)]
    pub fn fail(&mut self, message: impl Into<String>) -> bool {
        if !self.state.is_loading() {
            return false;
        }
        self.timers.cancel(TimerKind::Load);
        let message = message.into();
        tracing::warn!("Content failed to load: {}", message);
        self.state.load = LoadPhase::Error(message);
        true
    }

    /// Restart the load phase after an error
    ///
    /// Returns false (and does nothing) unless the viewer is in the error phase.
    pub fn retry(&mut self) -> bool {
        if self.state.loading_error().is_none() {
            return false;
        }
        tracing::info!("Retrying content load");
        self.state.load = LoadPhase::Loading;
        self.start_load_timer();
        true
    }

    pub(super) fn on_load_timeout(&mut self) {
        if self.state.is_loading() {
            self.state.load = LoadPhase::Ready;
            tracing::info!("Content ready");
        }
    }
}
