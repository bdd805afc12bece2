//! Saved-article reducer helpers.

use newsdesk_core::models::Article;
use newsdesk_core::session::Session;
use tracing::{info, warn};

use super::state::SavedState;

/// What a bookmark toggle on `article` should do.
#[derive(Debug, PartialEq, Eq)]
pub enum Toggle {
    /// Bookmarks require an account.
    SignInRequired,
    Save { token: String, article: Article },
    Remove { token: String, id: String },
    /// Saved locally without a server id; nothing to delete.
    MissingId,
}

pub fn plan_toggle(saved: &SavedState, session: &Session, article: &Article) -> Toggle {
    let Some(token) = session.token() else {
        return Toggle::SignInRequired;
    };
    match saved.find_by_url(&article.url) {
        Some(existing) => match existing.id.clone() {
            Some(id) => Toggle::Remove {
                token: token.to_string(),
                id,
            },
            None => Toggle::MissingId,
        },
        None => Toggle::Save {
            token: token.to_string(),
            article: article.clone(),
        },
    }
}

/// Applies the saved-items load. Failures are logged and leave the set as is.
pub fn handle_loaded(saved: &mut SavedState, result: Result<Vec<Article>, String>) {
    saved.loaded = true;
    match result {
        Ok(items) => {
            info!(count = items.len(), "loaded saved articles");
            saved.replace(items);
        }
        Err(message) => warn!("failed to load saved articles: {message}"),
    }
}

/// Applies a completed save. Returns the status line text.
pub fn handle_saved(saved: &mut SavedState, result: Result<Article, String>) -> Result<String, String> {
    match result {
        Ok(article) => {
            let title = article.title.clone();
            if !saved.contains_url(&article.url) {
                saved.push(article);
            }
            Ok(format!("Saved \"{title}\""))
        }
        Err(message) => {
            warn!("failed to save article: {message}");
            Err(format!("Could not save article: {message}"))
        }
    }
}

/// Applies a completed removal. Returns the status line text.
pub fn handle_removed(
    saved: &mut SavedState,
    id: &str,
    result: Result<(), String>,
) -> Result<String, String> {
    match result {
        Ok(()) => {
            saved.remove_id(id);
            Ok("Removed from saved articles".to_string())
        }
        Err(message) => {
            warn!("failed to remove saved article: {message}");
            Err(format!("Could not remove article: {message}"))
        }
    }
}
