//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: Session          (anonymous / authenticated)
//! │   ├── location, view            (routed screen)
//! │   ├── search: SearchState       (input, results, request tracker)
//! │   ├── saved: SavedState         (bookmarked articles)
//! │   ├── status: StatusLine        (transient notices)
//! │   ├── task_seq, tasks           (async task bookkeeping)
//! │   └── dismiss: DismissListeners (Esc / backdrop listeners)
//! └── overlay: Option<Overlay>      (login / register modal)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can borrow the modal mutably while reading `TuiState`.

use newsdesk_core::config::Config;
use newsdesk_core::routes::{Location, View};
use newsdesk_core::session::Session;
use ratatui::layout::Rect;

use crate::common::{TaskKind, TaskSeq, Tasks};
use crate::overlays::{DismissListeners, Modal, Overlay, OverlayRequest};
use crate::saved::SavedState;
use crate::search::SearchState;
use crate::statusline::StatusLine;

/// Combined application state for the TUI.
#[derive(Debug)]
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }

    /// Opens `request`, replacing any open modal.
    pub fn open_overlay(&mut self, request: OverlayRequest) {
        self.overlay = Some(Overlay::open(
            Modal::from_request(request),
            &self.tui.dismiss,
        ));
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }
}

/// Non-overlay UI state.
#[derive(Debug)]
pub struct TuiState {
    pub should_quit: bool,
    pub session: Session,
    pub location: Location,
    pub view: View,
    pub search: SearchState,
    pub saved: SavedState,
    pub status: StatusLine,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub dismiss: DismissListeners,
    /// Last terminal size reported by a `Frame` event.
    pub viewport: Rect,
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            session: Session::Anonymous,
            location: Location::default(),
            view: View::Home,
            search: SearchState::new(config.search.ordering),
            saved: SavedState::default(),
            status: StatusLine::default(),
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            dismiss: DismissListeners::default(),
            viewport: Rect::default(),
            spinner_frame: 0,
        }
    }

    /// A login or registration is in flight.
    pub fn is_busy(&self) -> bool {
        self.tasks.state(TaskKind::Auth).is_running()
    }
}
