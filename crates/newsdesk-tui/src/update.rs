//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use newsdesk_core::models::Article;
use newsdesk_core::routes::{self, HOME_PATH, Location, SAVED_NEWS_PATH, View};
use newsdesk_core::session::Session;
use ratatui::layout::Rect;
use tracing::debug;

use crate::common::TaskKind;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::overlays::{
    OverlayExt, OverlayRequest, OverlayTransition, OverlayUpdate, dismiss_trigger, modal_area,
};
use crate::saved::{self, Toggle};
use crate::search::{self, SearchFocus, SearchOutcome};
use crate::session::{self, AuthOutcome};
use crate::state::{AppState, TuiState};

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            app.tui.status.on_tick(Instant::now());
            vec![]
        }
        UiEvent::Frame { width, height } => {
            app.tui.viewport = Rect::new(0, 0, width, height);
            vec![]
        }
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
        UiEvent::Mounted { stored_token } => session::handle_mounted(&mut app.tui, stored_token),
        UiEvent::TaskCompleted { kind, completed } => {
            if app.tui.tasks.state_mut(kind).finish_if_active(completed.id) {
                update(app, *completed.result)
            } else {
                debug!(?kind, id = ?completed.id, "dropping result of inactive task");
                vec![]
            }
        }
        UiEvent::SessionRestored { result } => {
            session::handle_restored(&mut app.tui, result);
            vec![]
        }
        UiEvent::AuthResult { result } => handle_auth_result(app, result),
        UiEvent::SearchResult {
            request,
            keyword,
            result,
        } => {
            let outcome = search::handle_result(&mut app.tui.search, request, &keyword, result);
            if let SearchOutcome::Failed(message) = outcome {
                app.tui.status.error(format!("Search failed: {message}"));
            }
            vec![]
        }
        UiEvent::SavedLoaded { result } => {
            saved::handle_loaded(&mut app.tui.saved, result);
            vec![]
        }
        UiEvent::BookmarkSaved { result } => {
            let message = saved::handle_saved(&mut app.tui.saved, result);
            show_result(&mut app.tui, message);
            vec![]
        }
        UiEvent::BookmarkRemoved { id, result } => {
            let message = saved::handle_removed(&mut app.tui.saved, &id, result);
            show_result(&mut app.tui, message);
            vec![]
        }
    }
}

fn show_result(tui: &mut TuiState, message: Result<String, String>) {
    match message {
        Ok(text) => tui.status.info(text),
        Err(text) => tui.status.error(text),
    }
}

fn handle_auth_result(app: &mut AppState, result: Result<Session, String>) -> Vec<UiEffect> {
    match session::handle_auth_result(&mut app.tui, result) {
        AuthOutcome::SignedIn => {
            app.close_overlay();
            let token = app.tui.session.token().map(str::to_string);
            let effects = vec![session::load_saved(&mut app.tui, token)];
            let target = app
                .tui
                .location
                .return_target()
                .unwrap_or_else(|| Location::new(app.tui.location.path.clone()));
            navigate(&mut app.tui, target);
            effects
        }
        AuthOutcome::Failed(message) => {
            match app.overlay.as_mut() {
                Some(overlay) => overlay.modal.set_error(message),
                None => app.tui.status.error(message),
            }
            vec![]
        }
    }
}

/// Resolves `target` through the route table and guards.
fn navigate(tui: &mut TuiState, target: Location) {
    let requested = target.path.clone();
    let resolved = routes::resolve(target, tui.session.is_logged_in());
    if resolved.location.path != requested {
        debug!(from = %requested, to = %resolved.location.path, "navigation redirected");
        if !tui.session.is_logged_in() && requested == SAVED_NEWS_PATH {
            tui.status.info("Sign in to see your saved articles (Ctrl+L)");
        }
    }
    tui.location = resolved.location;
    tui.view = resolved.view;
}

// ============================================================================
// Terminal Event Handlers
// ============================================================================

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    if let Some(overlay) = &app.overlay
        && app.tui.dismiss.active() > 0
        && let Some(trigger) =
            dismiss_trigger(&event, modal_area(app.tui.viewport, &overlay.modal))
    {
        debug!(?trigger, "modal dismissed");
        app.close_overlay();
        return vec![];
    }

    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => {
            handle_mouse(app, mouse);
            vec![]
        }
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    if let Some(overlay) = app.overlay.as_mut() {
        overlay.modal.paste(text);
    } else if app.tui.view == View::Home {
        app.tui.search.focus = SearchFocus::Input;
        app.tui.search.input.insert_str(text);
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if app.overlay.is_some() {
        return;
    }
    let down = match mouse.kind {
        MouseEventKind::ScrollDown => true,
        MouseEventKind::ScrollUp => false,
        _ => return,
    };
    match (app.tui.view, down) {
        (View::Home, true) => app.tui.search.select_next(),
        (View::Home, false) => app.tui.search.select_prev(),
        (View::SavedNews, true) => app.tui.saved.select_next(),
        (View::SavedNews, false) => app.tui.saved.select_prev(),
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.modal.handle_key(app.tui.is_busy(), key);
        return apply_overlay_update(app, update);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return handle_global_key(app, key);
    }

    match app.tui.view {
        View::Home => handle_home_key(app, key),
        View::SavedNews => handle_saved_key(app, key),
    }
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    if let Some(request) = update.submit {
        effects.extend(session::begin_auth(&mut app.tui, request));
    }
    match update.transition {
        OverlayTransition::Stay => {}
        OverlayTransition::Close => app.close_overlay(),
        OverlayTransition::Open(request) => {
            if app.overlay.kind() != Some(request) {
                app.open_overlay(request);
            }
        }
    }
    effects
}

fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('c' | 'q') => vec![UiEffect::Quit],
        KeyCode::Char('l') => open_auth_modal(app, OverlayRequest::Login),
        KeyCode::Char('r') => open_auth_modal(app, OverlayRequest::Register),
        KeyCode::Char('o') => {
            let effects = session::logout(&mut app.tui);
            let here = Location::new(app.tui.location.path.clone());
            navigate(&mut app.tui, here);
            effects
        }
        KeyCode::Char('s') => {
            navigate(&mut app.tui, Location::new(SAVED_NEWS_PATH));
            vec![]
        }
        KeyCode::Char('n') => {
            navigate(&mut app.tui, Location::new(HOME_PATH));
            vec![]
        }
        _ => {
            if app.tui.view == View::Home && app.tui.search.focus == SearchFocus::Input {
                app.tui.search.input.handle_key(key);
            }
            vec![]
        }
    }
}

fn open_auth_modal(app: &mut AppState, request: OverlayRequest) -> Vec<UiEffect> {
    if let Some(user) = app.tui.session.user() {
        let message = format!("Already signed in as {}", user.display_name());
        app.tui.status.info(message);
    } else {
        app.open_overlay(request);
    }
    vec![]
}

fn handle_home_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let search = &mut app.tui.search;
    match search.focus {
        SearchFocus::Input => match key.code {
            KeyCode::Enter => search::submit(search).into_iter().collect(),
            KeyCode::Tab | KeyCode::Down if !search.results.is_empty() => {
                search.focus = SearchFocus::Results;
                vec![]
            }
            _ => {
                search.input.handle_key(key);
                vec![]
            }
        },
        SearchFocus::Results => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                search.select_prev();
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                search.select_next();
                vec![]
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc | KeyCode::Char('/') => {
                search.focus = SearchFocus::Input;
                vec![]
            }
            KeyCode::Enter | KeyCode::Char('o') => open_article(search.selected_article()),
            KeyCode::Char('b') => match search.selected_article().cloned() {
                Some(article) => toggle_bookmark(app, &article),
                None => vec![],
            },
            _ => vec![],
        },
    }
}

fn handle_saved_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let saved = &mut app.tui.saved;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            saved.select_prev();
            vec![]
        }
        KeyCode::Down | KeyCode::Char('j') => {
            saved.select_next();
            vec![]
        }
        KeyCode::Enter | KeyCode::Char('o') => open_article(saved.selected_article()),
        KeyCode::Char('d' | 'b') | KeyCode::Delete => match saved.selected_article().cloned() {
            Some(article) => toggle_bookmark(app, &article),
            None => vec![],
        },
        KeyCode::Esc => {
            navigate(&mut app.tui, Location::new(HOME_PATH));
            vec![]
        }
        _ => vec![],
    }
}

fn open_article(article: Option<&Article>) -> Vec<UiEffect> {
    match article {
        Some(article) if !article.url.is_empty() => vec![UiEffect::OpenBrowser {
            url: article.url.clone(),
        }],
        _ => vec![],
    }
}

/// Saves or removes `article`. Anonymous visitors get the login modal.
fn toggle_bookmark(app: &mut AppState, article: &Article) -> Vec<UiEffect> {
    if app.tui.tasks.state(TaskKind::Bookmark).is_running() {
        return vec![];
    }
    match saved::plan_toggle(&app.tui.saved, &app.tui.session, article) {
        Toggle::SignInRequired => {
            app.tui.status.info("Sign in to save articles");
            app.open_overlay(OverlayRequest::Login);
            vec![]
        }
        Toggle::Save { token, article } => {
            let task = app.tui.task_seq.next_id();
            app.tui.tasks.state_mut(TaskKind::Bookmark).begin(task);
            vec![UiEffect::SaveArticle {
                task,
                token,
                article,
            }]
        }
        Toggle::Remove { token, id } => {
            let task = app.tui.task_seq.next_id();
            app.tui.tasks.state_mut(TaskKind::Bookmark).begin(task);
            vec![UiEffect::RemoveArticle { task, token, id }]
        }
        Toggle::MissingId => {
            app.tui.status.error("Article has no server id yet, reload to remove it");
            vec![]
        }
    }
}
