//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only (no direct UI mutations).
//!
//! Task ids are allocated by the reducer before the effect is returned, so
//! the matching `TaskState` is already active when the runtime spawns.

use newsdesk_core::models::Article;

use crate::common::{RequestId, TaskId};
use crate::session::AuthRequest;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Validate the stored token at startup.
    ValidateToken { task: TaskId, token: String },

    /// Sign in or create an account.
    Authenticate { task: TaskId, request: AuthRequest },

    /// Remove the stored token.
    ClearToken,

    /// Query the news API.
    Search { request: RequestId, keyword: String },

    /// Fetch saved articles (the token is optional).
    LoadSaved {
        task: TaskId,
        token: Option<String>,
    },

    /// Bookmark an article.
    SaveArticle {
        task: TaskId,
        token: String,
        article: Article,
    },

    /// Delete a bookmark.
    RemoveArticle {
        task: TaskId,
        token: String,
        id: String,
    },

    /// Open a URL in the system browser.
    OpenBrowser { url: String },
}
