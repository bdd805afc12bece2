//! Session reducer helpers: restore at mount, login/register, logout.

use newsdesk_core::models::{Credentials, Registration};
use newsdesk_core::session::Session;
use tracing::{debug, info, warn};

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// A form submission from one of the modals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRequest {
    Login(Credentials),
    Register(Registration),
}

/// Startup: validate the stored token (if any) and load saved articles.
pub fn handle_mounted(tui: &mut TuiState, stored_token: Option<String>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if let Some(token) = stored_token.clone() {
        let task = tui.task_seq.next_id();
        tui.tasks.state_mut(TaskKind::SessionRestore).begin(task);
        effects.push(UiEffect::ValidateToken { task, token });
    } else {
        debug!("no stored token, starting anonymous");
    }
    effects.push(load_saved(tui, stored_token));
    effects
}

/// Applies the startup token validation.
///
/// A failure is logged only. A login that completed while validation was
/// in flight wins.
pub fn handle_restored(tui: &mut TuiState, result: Result<Session, String>) {
    match result {
        Ok(session) if !tui.session.is_logged_in() => {
            info!("session restored");
            tui.session = session;
        }
        Ok(_) => debug!("ignoring restored session, already signed in"),
        Err(message) => warn!("stored token rejected: {message}"),
    }
}

/// Starts a login or registration unless one is already running.
pub fn begin_auth(tui: &mut TuiState, request: AuthRequest) -> Vec<UiEffect> {
    if tui.is_busy() {
        return vec![];
    }
    let task = tui.task_seq.next_id();
    tui.tasks.state_mut(TaskKind::Auth).begin(task);
    vec![UiEffect::Authenticate { task, request }]
}

/// Outcome of a login or registration for the reducer to act on.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    SignedIn,
    Failed(String),
}

/// Applies a finished login/registration to the session.
pub fn handle_auth_result(tui: &mut TuiState, result: Result<Session, String>) -> AuthOutcome {
    match result {
        Ok(session) => {
            if let Some(user) = session.user() {
                tui.status.info(format!("Signed in as {}", user.display_name()));
            }
            tui.session = session;
            AuthOutcome::SignedIn
        }
        Err(message) => {
            warn!("sign-in failed: {message}");
            AuthOutcome::Failed(message)
        }
    }
}

/// Signs out: session reset now, token cleared by the runtime right after.
///
/// Saved articles belong to the account, so they are dropped too. Pending
/// restore, saved-load and bookmark results are abandoned: they were issued
/// with the old token.
pub fn logout(tui: &mut TuiState) -> Vec<UiEffect> {
    let was_logged_in = tui.session.is_logged_in();
    tui.session = Session::Anonymous;
    tui.saved.clear();
    for kind in [
        TaskKind::SessionRestore,
        TaskKind::SavedLoad,
        TaskKind::Bookmark,
    ] {
        tui.tasks.state_mut(kind).abandon();
    }
    if was_logged_in {
        tui.status.info("Signed out");
    }
    vec![UiEffect::ClearToken]
}

/// Reloads saved articles with the given token.
pub fn load_saved(tui: &mut TuiState, token: Option<String>) -> UiEffect {
    let task = tui.task_seq.next_id();
    tui.tasks.state_mut(TaskKind::SavedLoad).begin(task);
    UiEffect::LoadSaved { task, token }
}
