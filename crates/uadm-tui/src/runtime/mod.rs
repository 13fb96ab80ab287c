//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the Elm runtime boundary. The reducer stays pure and produces
//! effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Spawned handlers send `UiEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` each frame
//!
//! Structure:
//! - `mod.rs`: core runtime (TuiRuntime, event loop, effect dispatch)
//! - `inbox.rs`: inbox channel types
//! - `handlers.rs`: the requests behind each effect

mod handlers;
mod inbox;

use std::io::Stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
pub use handlers::run_effect;
use inbox::{UiEventReceiver, UiEventSender};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use uadm_core::ApiClient;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Tick interval while a request is in flight (spinner animation).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop or panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    /// Shared with every spawned handler; holds the same session as `state`.
    api: ApiClient,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime. The app starts on the login view.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(api: ApiClient) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let state = AppState::new(api.session().clone(), api.base_url());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            api,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the app quits.
    ///
    /// # Errors
    /// Returns an error if polling or drawing the terminal fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let events = self.collect_events()?;

            for event in events {
                dirty = true;
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from the inbox and the terminal, plus a Tick when due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.state.tui.tasks.is_any_running() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Don't block when there is already work to process.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Executes a single effect. Everything except `Quit` is a request and
    /// runs on a spawned task that reports back through the inbox.
    fn execute_effect(&mut self, effect: UiEffect) {
        if matches!(effect, UiEffect::Quit) {
            self.state.tui.should_quit = true;
            return;
        }

        let api = self.api.clone();
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            if let Some(event) = run_effect(&api, effect).await {
                let _ = tx.send(event);
            }
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
