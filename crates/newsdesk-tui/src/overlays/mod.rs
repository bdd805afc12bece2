//! Modal overlays for the TUI.
//!
//! Overlays temporarily take over keyboard input. Each modal owns its form
//! state, key handler and render function. At most one modal is open; opening
//! another replaces it.
//!
//! ## Module Structure
//!
//! - `dismiss.rs`: Esc / backdrop-click listeners tied to the open modal
//! - `form.rs`: Field list shared by both modals
//! - `login.rs`: Sign-in modal
//! - `register.rs`: Sign-up modal
//! - `render_utils.rs`: Shared rendering utilities for overlays

pub mod dismiss;
pub mod form;
pub mod login;
pub mod register;
pub mod render_utils;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
pub use dismiss::{DismissGuard, DismissListeners, DismissTrigger, dismiss_trigger};
pub use login::LoginState;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
pub use register::RegisterState;

use crate::session::AuthRequest;

// ============================================================================
// OverlayRequest / OverlayTransition / OverlayUpdate
// ============================================================================

/// Requests to open a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayRequest {
    Login,
    Register,
}

/// Transition returned by overlay key handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
    Open(OverlayRequest),
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub submit: Option<AuthRequest>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            submit: None,
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    pub fn open(request: OverlayRequest) -> Self {
        Self::new(OverlayTransition::Open(request))
    }

    #[must_use]
    pub fn with_submit(mut self, request: AuthRequest) -> Self {
        self.submit = Some(request);
        self
    }
}

/// Keys every modal handles the same way.
fn handle_modal_shortcut(key: KeyEvent) -> Option<OverlayUpdate> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') => Some(OverlayUpdate::close()),
        KeyCode::Char('l') => Some(OverlayUpdate::open(OverlayRequest::Login)),
        KeyCode::Char('r') => Some(OverlayUpdate::open(OverlayRequest::Register)),
        _ => None,
    }
}

/// Bottom line of a modal body: busy text, or a pointer to the other modal.
fn render_switch_line(frame: &mut Frame, body: Rect, busy: Option<String>, other: OverlayRequest) {
    if body.height == 0 {
        return;
    }
    let area = Rect::new(body.x, body.y + body.height - 1, body.width, 1);
    let line = match busy {
        Some(text) => Line::from(Span::styled(text, Style::default().fg(Color::Yellow))),
        None => {
            let (key, label) = match other {
                OverlayRequest::Login => ("Ctrl+L", "Already have an account? Sign in"),
                OverlayRequest::Register => ("Ctrl+R", "New here? Sign up"),
            };
            Line::from(vec![
                Span::styled(label, Style::default().fg(Color::Gray)),
                Span::styled(format!(" ({key})"), Style::default().fg(Color::DarkGray)),
            ])
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ============================================================================
// Modal / Overlay
// ============================================================================

#[derive(Debug, Clone)]
pub enum Modal {
    Login(LoginState),
    Register(RegisterState),
}

impl Modal {
    pub fn from_request(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::Login => Modal::Login(LoginState::open()),
            OverlayRequest::Register => Modal::Register(RegisterState::open()),
        }
    }

    pub fn kind(&self) -> OverlayRequest {
        match self {
            Modal::Login(_) => OverlayRequest::Login,
            Modal::Register(_) => OverlayRequest::Register,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        match self {
            Modal::Login(l) => l.size(),
            Modal::Register(r) => r.size(),
        }
    }

    pub fn handle_key(&mut self, busy: bool, key: KeyEvent) -> OverlayUpdate {
        match self {
            Modal::Login(l) => l.handle_key(busy, key),
            Modal::Register(r) => r.handle_key(busy, key),
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.form_mut().paste(text);
    }

    /// Shows a server-side failure under the fields.
    pub fn set_error(&mut self, message: String) {
        self.form_mut().error = Some(message);
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Modal::Login(l) => l.form.error.as_deref(),
            Modal::Register(r) => r.form.error.as_deref(),
        }
    }

    fn form_mut(&mut self) -> &mut form::Form {
        match self {
            Modal::Login(l) => &mut l.form,
            Modal::Register(r) => &mut r.form,
        }
    }

    pub fn render(&self, frame: &mut Frame, popup: Rect, busy: bool, spinner: &str) {
        match self {
            Modal::Login(l) => l.render(frame, popup, busy, spinner),
            Modal::Register(r) => r.render(frame, popup, busy, spinner),
        }
    }
}

/// The open modal together with its dismissal registration.
#[derive(Debug)]
pub struct Overlay {
    pub modal: Modal,
    _listeners: DismissGuard,
}

impl Overlay {
    pub fn open(modal: Modal, listeners: &DismissListeners) -> Self {
        Self {
            modal,
            _listeners: listeners.acquire(),
        }
    }
}

/// Rectangle of `modal` within the terminal viewport.
///
/// Used both to draw the modal and to tell backdrop clicks apart from
/// clicks inside it.
pub fn modal_area(viewport: Rect, modal: &Modal) -> Rect {
    let (width, height) = modal.size();
    render_utils::calculate_overlay_area(viewport, width, height)
}

// ============================================================================
// OverlayExt - Extension trait for Option<Overlay>
// ============================================================================

/// Extension trait for `Option<Overlay>` providing convenience helpers.
pub trait OverlayExt {
    /// Renders the backdrop and modal if one is open.
    fn render(&self, frame: &mut Frame, viewport: Rect, busy: bool, spinner: &str);

    /// Which modal is open, if any.
    fn kind(&self) -> Option<OverlayRequest>;
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, viewport: Rect, busy: bool, spinner: &str) {
        if let Some(overlay) = self {
            render_utils::render_backdrop(frame, viewport);
            let popup = modal_area(viewport, &overlay.modal);
            overlay.modal.render(frame, popup, busy, spinner);
        }
    }

    fn kind(&self) -> Option<OverlayRequest> {
        self.as_ref().map(|overlay| overlay.modal.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_holds_listener_until_dropped() {
        let listeners = DismissListeners::default();
        let mut overlay = Some(Overlay::open(
            Modal::from_request(OverlayRequest::Login),
            &listeners,
        ));
        assert_eq!(listeners.active(), 1);
        assert_eq!(overlay.kind(), Some(OverlayRequest::Login));

        overlay = Some(Overlay::open(
            Modal::from_request(OverlayRequest::Register),
            &listeners,
        ));
        assert_eq!(listeners.active(), 1);
        assert_eq!(overlay.kind(), Some(OverlayRequest::Register));

        overlay = None;
        assert_eq!(listeners.active(), 0);
        assert!(overlay.kind().is_none());
    }

    #[test]
    fn test_modal_area_matches_form_height() {
        let viewport = Rect::new(0, 0, 120, 40);
        let login = Modal::from_request(OverlayRequest::Login);
        let register = Modal::from_request(OverlayRequest::Register);

        assert_eq!(modal_area(viewport, &login).height, 9);
        assert_eq!(modal_area(viewport, &register).height, 11);
        assert_eq!(modal_area(viewport, &login).width, 56);
    }
}
