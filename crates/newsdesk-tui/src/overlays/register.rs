use crossterm::event::KeyEvent;
use newsdesk_core::models::Registration;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Color;

use super::form::{Form, FormAction, FormField, MIN_PASSWORD_LEN, validate_email};
use super::render_utils::{InputHint, OverlayConfig, render_overlay};
use super::{OverlayRequest, OverlayUpdate, handle_modal_shortcut, render_switch_line};
use crate::session::AuthRequest;

const EMAIL: usize = 0;
const PASSWORD: usize = 1;
const NAME: usize = 2;

#[derive(Debug, Clone)]
pub struct RegisterState {
    pub form: Form,
}

impl RegisterState {
    pub fn open() -> Self {
        Self {
            form: Form::new(vec![
                FormField::text("Email", "Enter email"),
                FormField::secret("Password", "Enter password"),
                FormField::text("Username", "Enter your username"),
            ]),
        }
    }

    pub fn registration(&self) -> Result<Registration, String> {
        let email = self.form.value(EMAIL);
        let password = self.form.value(PASSWORD);
        let name = self.form.value(NAME);
        validate_email(&email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ));
        }
        if name.is_empty() {
            return Err("Username is required".to_string());
        }
        Ok(Registration {
            name,
            email,
            password,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (56, self.form.height() + 4)
    }

    pub fn handle_key(&mut self, busy: bool, key: KeyEvent) -> OverlayUpdate {
        if let Some(update) = handle_modal_shortcut(key) {
            return update;
        }
        if self.form.handle_key(key) == FormAction::Submit && !busy {
            match self.registration() {
                Ok(registration) => {
                    return OverlayUpdate::stay()
                        .with_submit(AuthRequest::Register(registration));
                }
                Err(error) => self.form.error = Some(error),
            }
        }
        OverlayUpdate::stay()
    }

    pub fn render(&self, frame: &mut Frame, popup: Rect, busy: bool, spinner: &str) {
        let hints = [
            InputHint::new("Enter", "sign up"),
            InputHint::new("Tab", "next"),
            InputHint::new("Esc", "close"),
        ];
        let layout = render_overlay(
            frame,
            popup,
            &OverlayConfig {
                title: "Sign up",
                border_color: Color::Magenta,
                hints: &hints,
            },
        );
        let form_area = Rect::new(
            layout.body.x,
            layout.body.y,
            layout.body.width,
            self.form.height().min(layout.body.height),
        );
        self.form.render(frame, form_area);
        render_switch_line(
            frame,
            layout.body,
            busy.then(|| format!("{spinner} Creating your account...")),
            OverlayRequest::Login,
        );
    }
}
