//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! - Spawned handlers send `UiEvent`s to `inbox_tx`
//! - The runtime drains `inbox_rx` each loop turn
//!
//! Structure:
//! - `mod.rs`: Core runtime (`TuiRuntime`, event loop, effect dispatch)
//! - `inbox.rs`: Inbox channel types
//! - `handlers/`: Effect handler implementations

mod handlers;
mod inbox;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use newsdesk_core::config::Config;
use newsdesk_core::services::Services;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::common::{TaskCompleted, TaskId, TaskKind};
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame cadence while something is in flight (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Runs the event loop and executes effects.
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application state (split: tui + overlay).
    pub state: AppState,
    services: Services,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: &Config, services: Services) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(config),
            services,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Mounts the shell and runs the main event loop until quit.
    ///
    /// # Errors
    /// Returns an error if drawing or reading terminal input fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        self.mount()?;
        let result = self.event_loop();

        let _ = terminal::disable_input_features();
        result
    }

    fn mount(&mut self) -> Result<()> {
        let size = self.terminal.size()?;
        self.dispatch_event(UiEvent::Frame {
            width: size.width,
            height: size.height,
        });
        let stored_token = match self.services.tokens.get() {
            Ok(token) => token,
            Err(err) => {
                warn!("failed to read stored session token: {err:#}");
                None
            }
        };
        self.dispatch_event(UiEvent::Mounted { stored_token });
        Ok(())
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.tui.should_quit {
            let mut events = self.collect_events()?;

            // Layout size goes first so hit tests see the current viewport.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Renders are batched to the tick cadence.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
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

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.tui.tasks.is_any_running()
            || self.state.tui.search.is_loading()
            || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
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

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        let effects = update::update(&mut self.state, event);
        if !effects.is_empty() {
            self.execute_effects(effects);
        }
    }

    /// Spawns a handler whose result goes straight to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Spawns a handler whose result is wrapped in `TaskCompleted` so the
    /// reducer can drop it if the task is no longer active.
    fn spawn_task<F, Fut>(&self, kind: TaskKind, id: TaskId, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let inner = f().await;
            let completed = TaskCompleted {
                id,
                result: Box::new(inner),
            };
            let _ = tx.send(UiEvent::TaskCompleted { kind, completed });
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.tui.should_quit = true;
            }
            UiEffect::OpenBrowser { url } => {
                if let Err(err) = open::that(&url) {
                    warn!("failed to open {url}: {err}");
                }
            }

            // Session effects
            UiEffect::ValidateToken { task, token } => {
                let auth = Arc::clone(&self.services.auth);
                self.spawn_task(TaskKind::SessionRestore, task, move || {
                    handlers::validate_token(auth, token)
                });
            }
            UiEffect::Authenticate { task, request } => {
                let auth = Arc::clone(&self.services.auth);
                let tokens = Arc::clone(&self.services.tokens);
                self.spawn_task(TaskKind::Auth, task, move || {
                    handlers::authenticate(auth, tokens, request)
                });
            }
            UiEffect::ClearToken => {
                handlers::clear_token(self.services.tokens.as_ref());
            }

            // News effects
            UiEffect::Search { request, keyword } => {
                debug!(keyword, "spawning search");
                let news = Arc::clone(&self.services.news);
                self.spawn_effect(move || handlers::search(news, request, keyword));
            }

            // Saved-article effects
            UiEffect::LoadSaved { task, token } => {
                let saved = Arc::clone(&self.services.saved);
                self.spawn_task(TaskKind::SavedLoad, task, move || {
                    handlers::load_saved(saved, token)
                });
            }
            UiEffect::SaveArticle {
                task,
                token,
                article,
            } => {
                let saved = Arc::clone(&self.services.saved);
                self.spawn_task(TaskKind::Bookmark, task, move || {
                    handlers::save_article(saved, token, article)
                });
            }
            UiEffect::RemoveArticle { task, token, id } => {
                let saved = Arc::clone(&self.services.saved);
                self.spawn_task(TaskKind::Bookmark, task, move || {
                    handlers::remove_article(saved, token, id)
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
