// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - The event loop (input, ticks, viewer completions)
// - Rendering through `App::draw`

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod traits;

use crate::config::Config;
use crate::content::{DocumentContent, SECTIONS};
use crate::logging::LogBuffer;
use crate::viewer::{SystemClipboard, Viewer};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste,
        EnableMouseCapture, Event,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Run the viewer TUI
///
/// Sets up the terminal, mounts the viewer, runs the event loop and restores
/// the terminal. The viewer is unmounted on every exit path, so no timer
/// outlives the UI.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let mut terminal = setup_terminal()?;

    let viewer = Viewer::mount(
        SECTIONS,
        DocumentContent::load(),
        Arc::new(SystemClipboard),
        config.timing.viewer_timing(),
    );
    let mut app = App::new(viewer, &config, log_buffer);

    let result = run_event_loop(&mut terminal, &mut app, config.timing.tick()).await;

    let final_state = app.shutdown();
    tracing::debug!(?final_state, "Viewer state at exit");

    // Restore even if the loop failed; report the loop error first
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Best-effort terminal restore for the panic hook, where no handle exists
pub fn restore_terminal_raw() {
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
}

/// Main event loop
///
/// Waits on three sources with `tokio::select!`:
/// 1. Terminal input (keys, mouse and bracketed paste)
/// 2. Ticks (spinner, smooth scrolling, start section)
/// 3. Completions from the viewer's timers and clipboard writes
///
/// Input is read in its own future and handled in the branch body, so only
/// the viewer branch borrows `app` while waiting.
async fn run_event_loop(terminal: &mut Term, app: &mut App, tick: Duration) -> Result<()> {
    let mut tick_interval = tokio::time::interval(tick);

    loop {
        terminal
            .draw(|f| app.draw(f))
            .context("Failed to draw terminal")?;

        tokio::select! {
            input = poll_input() => {
                match input? {
                    Some(Event::Key(key)) => app.handle_key(key),
                    Some(Event::Mouse(mouse)) => app.handle_mouse(mouse),
                    Some(Event::Paste(text)) => app.handle_paste(&text),
                    _ => {}
                }
            }

            _ = tick_interval.tick() => app.on_tick(),

            Some(event) = app.viewer.next_event() => app.viewer.handle_event(event),
        }

        // Anything else that completed in the meantime
        app.viewer.pump();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Read one terminal event if one arrives within a short poll window
async fn poll_input() -> Result<Option<Event>> {
    if event::poll(Duration::from_millis(10)).context("Failed to poll terminal")? {
        return event::read()
            .map(Some)
            .context("Failed to read terminal event");
    }
    Ok(None)
}
