// Viewer module - the documentation viewer core
//
// `Viewer` is the sole owner of the UI state. Everything that mutates it goes
// through a named operation here or in one of the controller submodules:
// - load:       loading -> ready / error -> retry
// - search:     section filtering and title highlighting (pure)
// - navigation: active section and the compact-layout drawer
// - clipboard:  copy acknowledgment with a single live timer
//
// Timers and clipboard writes run as spawned tasks and report back as
// `ViewerEvent`s on a channel the viewer owns. The event loop feeds those
// events into `handle_event`, so all mutation stays on one task.

pub mod clipboard;
pub mod load;
pub mod navigation;
pub mod search;
pub mod state;
pub mod timers;

pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use navigation::ScrollTarget;
pub use search::{filter_sections, highlight_matches, Segment};
pub use state::{LoadPhase, UiState};

use crate::content::{DocumentContent, Section};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use timers::{TimerId, TimerSet, Timeout};

/// Durations for the timed transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Simulated load delay after mount
    pub load_delay: Duration,
    /// How long the copy acknowledgment stays visible
    pub ack_window: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            load_delay: Duration::from_millis(1000),
            ack_window: Duration::from_millis(2000),
        }
    }
}

/// Completions delivered back to the viewer from its spawned tasks
#[derive(Debug)]
pub enum ViewerEvent {
    Timer { id: TimerId, timeout: Timeout },
    CopyFinished {
        code_id: String,
        result: anyhow::Result<()>,
    },
}

/// The documentation viewer
pub struct Viewer {
    state: UiState,
    sections: &'static [Section],
    content: DocumentContent,
    timing: Timing,
    timers: TimerSet,
    /// In-flight clipboard writes
    copies: Vec<JoinHandle<()>>,
    clipboard: Arc<dyn ClipboardWriter>,
    events_tx: mpsc::UnboundedSender<ViewerEvent>,
    events_rx: mpsc::UnboundedReceiver<ViewerEvent>,
}

impl Viewer {
    /// Create the state and start the load phase
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(
        sections: &'static [Section],
        content: DocumentContent,
        clipboard: Arc<dyn ClipboardWriter>,
        timing: Timing,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let mut viewer = Self {
            state: UiState::default(),
            sections,
            content,
            timing,
            timers: TimerSet::new(events_tx.clone()),
            copies: Vec::new(),
            clipboard,
            events_tx,
            events_rx,
        };
        tracing::info!(sections = sections.len(), "Viewer mounted");
        viewer.start_load_timer();
        viewer
    }

    /// Tear down: abort every timer and in-flight copy, return the final state
    ///
    /// Taking `self` by value means no operation can run after teardown.
    pub fn unmount(mut self) -> UiState {
        self.timers.cancel_all();
        for handle in self.copies.drain(..) {
            handle.abort();
        }
        self.events_rx.close();
        tracing::info!("Viewer unmounted");
        std::mem::take(&mut self.state)
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn sections(&self) -> &'static [Section] {
        self.sections
    }

    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    // ─────────────────────────────────────────────────────────────
    // Search term
    // ─────────────────────────────────────────────────────────────

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.state.search_term.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.state.search_term.pop();
    }

    pub fn clear_search(&mut self) {
        self.state.search_term.clear();
    }

    /// Sections matching the current search term, in registry order
    pub fn filtered_sections(&self) -> Vec<&'static Section> {
        filter_sections(self.sections, &self.state.search_term)
    }

    /// Title segments for a section under the current search term
    pub fn highlighted_title<'a>(&self, section: &'a Section) -> Vec<Segment<'a>> {
        highlight_matches(section.title, &self.state.search_term)
    }

    // ─────────────────────────────────────────────────────────────
    // Event delivery
    // ─────────────────────────────────────────────────────────────

    /// Wait for the next completion from a timer or clipboard task
    pub async fn next_event(&mut self) -> Option<ViewerEvent> {
        self.events_rx.recv().await
    }

    /// Apply every completion that has already arrived. Returns how many.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    pub fn handle_event(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::Timer { id, timeout } => {
                if !self.timers.complete(timeout.kind(), id) {
                    tracing::trace!(?id, "Ignoring stale timer");
                    return;
                }
                match timeout {
                    Timeout::LoadReady => self.on_load_timeout(),
                    Timeout::ClearCopied { code_id } => self.on_ack_expired(code_id),
                }
            }
            ViewerEvent::CopyFinished { code_id, result } => {
                self.on_copy_finished(code_id, result);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::content::SECTIONS;
    use anyhow::bail;
    use futures::future::BoxFuture;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    /// In-memory clipboard that records writes and can be told to fail
    #[derive(Clone, Default)]
    pub(crate) struct FakeClipboard {
        writes: Arc<Mutex<Vec<String>>>,
        failing: Arc<AtomicBool>,
    }

    impl FakeClipboard {
        pub(crate) fn failing() -> Self {
            let clipboard = Self::default();
            clipboard.set_failing(true);
            clipboard
        }

        pub(crate) fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub(crate) fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    impl ClipboardWriter for FakeClipboard {
        fn write_text(&self, text: String) -> BoxFuture<'static, anyhow::Result<()>> {
            let failing = self.failing.load(Ordering::SeqCst);
            let writes = self.writes.clone();
            async move {
                if failing {
                    bail!("no display server");
                }
                writes.lock().unwrap().push(text);
                Ok(())
            }
            .boxed()
        }
    }

    pub(crate) fn mount_with(clipboard: FakeClipboard) -> (Viewer, FakeClipboard) {
        let viewer = Viewer::mount(
            SECTIONS,
            DocumentContent::load(),
            Arc::new(clipboard.clone()),
            Timing::default(),
        );
        (viewer, clipboard)
    }

    pub(crate) fn mount_fake() -> (Viewer, FakeClipboard) {
        mount_with(FakeClipboard::default())
    }

    /// Let spawned tasks run, then apply whatever they delivered
    pub(crate) async fn settle(viewer: &mut Viewer) {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
        viewer.pump();
    }

    const TWO_SECTIONS: &[Section] = &[
        Section {
            id: "overview",
            title: "Project Overview",
            icon: "📘",
        },
        Section {
            id: "k8s-basics",
            title: "Kubernetes Basics",
            icon: "☸",
        },
    ];

    #[tokio::test]
    async fn test_search_term_drives_filtered_list() {
        let mut viewer = Viewer::mount(
            TWO_SECTIONS,
            DocumentContent::default(),
            Arc::new(FakeClipboard::default()),
            Timing::default(),
        );
        assert_eq!(viewer.filtered_sections().len(), 2);

        viewer.set_search_term("over");
        let ids: Vec<_> = viewer.filtered_sections().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["overview"]);

        let segments = viewer.highlighted_title(&TWO_SECTIONS[0]);
        let pairs: Vec<_> = segments.iter().map(|s| (s.content, s.is_match)).collect();
        assert_eq!(
            pairs,
            vec![("Project ", false), ("Over", true), ("view", false)]
        );

        viewer.pop_search_char();
        viewer.push_search_char('r');
        assert_eq!(viewer.state().search_term(), "over");

        viewer.clear_search();
        assert_eq!(viewer.filtered_sections().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_at_200ms_mutates_nothing() {
        let (mut viewer, _) = mount_fake();
        tokio::time::sleep(Duration::from_millis(200)).await;
        settle(&mut viewer).await;
        let before = viewer.state().clone();

        let after = viewer.unmount();
        assert_eq!(before, after);
        tokio::time::sleep(Duration::from_millis(3000)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_aborts_in_flight_copy() {
        let (mut viewer, _) = mount_fake();
        viewer.copy("kubectl get pods", "c1");
        assert_eq!(viewer.copies.len(), 1);

        let state = viewer.unmount();
        assert_eq!(state.copied_code_id(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_timer_event_is_ignored() {
        let (mut viewer, _) = mount_fake();
        viewer.copy("t1", "c1");
        settle(&mut viewer).await;

        // A message from a timer that is no longer live
        viewer.handle_event(ViewerEvent::Timer {
            id: TimerId::stale_for_tests(),
            timeout: Timeout::ClearCopied {
                code_id: "c1".to_string(),
            },
        });
        assert_eq!(viewer.state().copied_code_id(), Some("c1"));
    }
}
