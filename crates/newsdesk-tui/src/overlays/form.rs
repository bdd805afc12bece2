//! Field list shared by the login and register modals.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::text::mask;
use crate::common::truncate_start_with_ellipsis;
use crate::input::LineInput;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub input: LineInput,
    pub secret: bool,
}

impl FormField {
    pub fn text(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            label,
            placeholder,
            input: LineInput::default(),
            secret: false,
        }
    }

    pub fn secret(label: &'static str, placeholder: &'static str) -> Self {
        Self {
            secret: true,
            ..Self::text(label, placeholder)
        }
    }
}

/// What a key did to the form.
#[derive(Debug, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
}

#[derive(Debug, Clone)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focus: usize,
    /// Validation or server error shown under the fields.
    pub error: Option<String>,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            focus: 0,
            error: None,
        }
    }

    /// Trimmed value of field `index` (passwords are not trimmed).
    pub fn value(&self, index: usize) -> String {
        self.fields.get(index).map_or_else(String::new, |field| {
            let text = field.input.text();
            if field.secret {
                text.to_string()
            } else {
                text.trim().to_string()
            }
        })
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len().max(1);
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields.len().max(1);
        self.focus = (self.focus + len - 1) % len;
    }

    /// Moves focus or edits the focused field. Enter on the last field
    /// submits; on earlier fields it advances.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_prev(),
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return FormAction::Submit;
            }
            KeyCode::Enter => {
                if self.focus + 1 >= self.fields.len() {
                    return FormAction::Submit;
                }
                self.focus_next();
            }
            _ => {
                if let Some(field) = self.fields.get_mut(self.focus)
                    && field.input.handle_key(key)
                {
                    self.error = None;
                }
            }
        }
        FormAction::None
    }

    pub fn paste(&mut self, text: &str) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.input.insert_str(text);
        }
    }

    /// Rows needed to draw the fields and the error line.
    pub fn height(&self) -> u16 {
        self.fields.len() as u16 * 2 + 1
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::with_capacity(self.fields.len() * 2 + 1);
        let max = area.width.saturating_sub(3) as usize;
        for (index, field) in self.fields.iter().enumerate() {
            let focused = index == self.focus;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(field.label, label_style)));

            let mut spans = vec![Span::styled("> ", label_style)];
            if field.input.is_empty() {
                if focused {
                    spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
                }
                spans.push(Span::styled(
                    field.placeholder,
                    Style::default().fg(Color::DarkGray),
                ));
            } else {
                let shown = if field.secret {
                    mask(field.input.text())
                } else {
                    field.input.text().to_string()
                };
                spans.push(Span::raw(truncate_start_with_ellipsis(&shown, max)));
                if focused {
                    spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
                }
            }
            lines.push(Line::from(spans));
        }
        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Rejects blank fields and malformed email addresses.
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    let valid = email
        .split_once('@')
        .is_some_and(|(user, domain)| !user.is_empty() && !domain.is_empty());
    if valid {
        Ok(())
    } else {
        Err("Invalid email address".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form() -> Form {
        Form::new(vec![
            FormField::text("Email", "Enter email"),
            FormField::secret("Password", "Enter password"),
        ])
    }

    #[test]
    fn test_enter_advances_then_submits() {
        let mut form = form();
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::None);
        assert_eq!(form.focus, 1);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit);
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = form();
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus, 1);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus, 0);
    }

    #[test]
    fn test_typing_clears_error() {
        let mut form = form();
        form.error = Some("Email is required".into());
        form.handle_key(key(KeyCode::Char('a')));
        assert!(form.error.is_none());
        assert_eq!(form.value(0), "a");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("ada").is_err());
        assert!(validate_email("@example.com").is_err());
    }
}
