use newsdesk_core::routes::View;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::state::NoticeLevel;
use crate::render::spinner;
use crate::search::SearchFocus;
use crate::state::TuiState;

fn hints(tui: &TuiState, modal_open: bool) -> &'static str {
    if modal_open {
        return "Tab next field • Enter submit • Esc close";
    }
    match (tui.view, tui.search.focus) {
        (View::SavedNews, _) => "↑↓ select • Enter open • d remove • Ctrl+N home • Ctrl+O sign out",
        (View::Home, SearchFocus::Results) => "↑↓ select • Enter open • b bookmark • Tab search",
        (View::Home, SearchFocus::Input) if tui.session.is_logged_in() => {
            "Enter search • Tab results • Ctrl+S saved • Ctrl+O sign out • Ctrl+Q quit"
        }
        (View::Home, SearchFocus::Input) => {
            "Enter search • Tab results • Ctrl+L sign in • Ctrl+R sign up • Ctrl+Q quit"
        }
    }
}

pub fn render_status_line(frame: &mut Frame, area: Rect, tui: &TuiState, modal_open: bool) {
    let busy = tui.is_busy() || tui.search.is_loading() || tui.tasks.is_any_running();

    let mut spans = Vec::new();
    if busy {
        spans.push(Span::styled(
            format!("{} ", spinner(tui.spinner_frame)),
            Style::default().fg(Color::Cyan),
        ));
    }
    match tui.status.notice() {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Info => Color::Green,
                NoticeLevel::Error => Color::Red,
            };
            spans.push(Span::styled(notice.text.clone(), Style::default().fg(color)));
        }
        None => spans.push(Span::styled(
            hints(tui, modal_open),
            Style::default().fg(Color::DarkGray),
        )),
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Left),
        area,
    );
}
