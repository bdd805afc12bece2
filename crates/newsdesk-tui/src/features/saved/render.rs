use newsdesk_core::models::keywords_summary;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::render::render_article_list;
use crate::state::TuiState;

/// Saved articles screen: summary header above the list.
pub fn render_saved_view(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let [summary_area, body] =
        Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).areas(area);

    let name = tui
        .session
        .user()
        .map_or("You", |user| user.display_name());
    let count = tui.saved.items.len();
    let noun = if count == 1 { "article" } else { "articles" };
    let keywords = keywords_summary(&tui.saved.keywords());

    let mut lines = vec![
        Line::from(Span::styled(
            "Saved articles",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            format!("{name}, you have {count} saved {noun}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    if !keywords.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("By keywords: "),
            Span::styled(keywords, Style::default().add_modifier(Modifier::BOLD)),
        ]));
    }
    let summary = Rect::new(
        summary_area.x + 1,
        summary_area.y,
        summary_area.width.saturating_sub(2),
        summary_area.height,
    );
    frame.render_widget(Paragraph::new(lines), summary);

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(body);
    frame.render_widget(block, body);

    if tui.saved.items.is_empty() {
        let text = if tui.saved.loaded {
            "Nothing saved yet. Press b on a search result to bookmark it."
        } else {
            "Loading saved articles..."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
            inner,
        );
        return;
    }

    render_article_list(frame, inner, &tui.saved.items, tui.saved.selected, true, None);
}
