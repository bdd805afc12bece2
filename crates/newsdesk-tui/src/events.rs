//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! the frame/tick clock, and results of spawned tasks sent through the inbox.

use crossterm::event::Event;
use newsdesk_core::models::Article;
use newsdesk_core::session::Session;

use crate::common::{RequestId, TaskCompleted, TaskKind};

#[derive(Debug)]
pub enum UiEvent {
    /// Render cadence; also expires status notices.
    Tick,

    /// Current terminal size, sent before other events each loop.
    Frame { width: u16, height: u16 },

    /// Raw terminal input.
    Terminal(Event),

    /// The shell mounted. Carries the token read from the store.
    Mounted { stored_token: Option<String> },

    /// A spawned task finished; `completed.result` is dispatched only if the
    /// task is still the active one for `kind`.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    SessionRestored { result: Result<Session, String> },

    AuthResult { result: Result<Session, String> },

    /// `Ok(None)` means the API returned no articles field.
    SearchResult {
        request: RequestId,
        keyword: String,
        result: Result<Option<Vec<Article>>, String>,
    },

    SavedLoaded { result: Result<Vec<Article>, String> },

    BookmarkSaved { result: Result<Article, String> },

    BookmarkRemoved {
        id: String,
        result: Result<(), String>,
    },
}
