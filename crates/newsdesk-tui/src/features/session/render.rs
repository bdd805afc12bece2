use newsdesk_core::routes::View;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::state::TuiState;

/// Title, navigation tabs and the signed-in user.
pub fn render_header(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(32)]).areas(area);

    let tab = |label: &'static str, active: bool| {
        let style = if active {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(label, style)
    };

    let mut spans = vec![
        Span::styled(
            " NewsDesk ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        tab("Home", tui.view == View::Home),
    ];
    if tui.session.is_logged_in() {
        spans.push(Span::raw("  "));
        spans.push(tab("Saved articles", tui.view == View::SavedNews));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), left);

    let who = match tui.session.user() {
        Some(user) => Span::styled(
            format!("{} ", user.display_name()),
            Style::default().fg(Color::Green),
        ),
        None => Span::styled("Not signed in ", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(
        Paragraph::new(Line::from(who)).alignment(Alignment::Right),
        right,
    );
}
