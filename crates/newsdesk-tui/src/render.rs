//! Pure view/render functions for the TUI.
//!
//! Functions here take state by immutable reference and draw to a ratatui
//! `Frame`. They never mutate state or return effects.

use newsdesk_core::models::Article;
use newsdesk_core::routes::View;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::common::text::single_line;
use crate::common::truncate_with_ellipsis;
use crate::overlays::OverlayExt;
use crate::saved::{SavedState, render_saved_view};
use crate::search::render_home_view;
use crate::session::render_header;
use crate::state::AppState;
use crate::statusline::render_status_line;

const HEADER_HEIGHT: u16 = 1;

const STATUS_HEIGHT: u16 = 1;

/// Rows drawn per article in a list.
const ARTICLE_ROWS: u16 = 3;

/// Spinner frames for busy indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let tui = &app.tui;

    let [header, body, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Fill(1),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    render_header(frame, header, tui);
    match tui.view {
        View::Home => render_home_view(frame, body, tui),
        View::SavedNews => render_saved_view(frame, body, tui),
    }
    render_status_line(frame, status, tui, app.overlay.is_some());

    app.overlay
        .render(frame, area, tui.is_busy(), spinner(tui.spinner_frame));
}

pub(crate) fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// First list index to draw so that `selected` stays within `visible` rows.
fn scroll_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    selected.saturating_sub(visible - 1)
}

/// Draws `articles` three rows each: title, meta line, description.
///
/// When `saved` is given, bookmarked articles are starred.
pub(crate) fn render_article_list(
    frame: &mut Frame,
    area: Rect,
    articles: &[Article],
    selected: usize,
    focused: bool,
    saved: Option<&SavedState>,
) {
    if area.height == 0 || area.width < 4 {
        return;
    }
    let text_area = area.inner(Margin::new(1, 0));
    let visible = (text_area.height / ARTICLE_ROWS) as usize;
    let offset = scroll_offset(selected, visible);
    let max = text_area.width.saturating_sub(2) as usize;

    let mut lines = Vec::with_capacity(visible * ARTICLE_ROWS as usize);
    for (index, article) in articles.iter().enumerate().skip(offset).take(visible) {
        let is_selected = index == selected;
        let marker = if is_selected && focused { "▶ " } else { "  " };
        let title_style = if is_selected {
            Style::default()
                .fg(if focused { Color::Cyan } else { Color::White })
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(Color::Cyan)),
            Span::styled(
                truncate_with_ellipsis(&single_line(&article.title), max),
                title_style,
            ),
        ]));

        let mut meta = Vec::new();
        if let Some(source) = article.source_name() {
            meta.push(source.to_string());
        }
        if let Some(date) = article.published_date() {
            meta.push(date);
        }
        let mut meta_spans = vec![
            Span::raw("  "),
            Span::styled(
                truncate_with_ellipsis(&meta.join(" · "), max),
                Style::default().fg(Color::DarkGray),
            ),
        ];
        if saved.is_some_and(|saved| saved.contains_url(&article.url)) {
            meta_spans.push(Span::styled("  ★ saved", Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(meta_spans));

        let description = article
            .description
            .as_deref()
            .map(single_line)
            .unwrap_or_default();
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                truncate_with_ellipsis(&description, max),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }
    frame.render_widget(Paragraph::new(lines), text_area);

    if articles.len() > visible {
        let mut state = ScrollbarState::new(articles.len()).position(selected);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut state,
        );
    }
}

#[cfg(test)]
mod tests {
    use newsdesk_core::config::Config;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::overlays::OverlayRequest;

    fn draw(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_scroll_offset_keeps_selection_visible() {
        assert_eq!(scroll_offset(0, 5), 0);
        assert_eq!(scroll_offset(4, 5), 0);
        assert_eq!(scroll_offset(7, 5), 3);
    }

    #[test]
    fn test_home_renders_results() {
        let mut app = AppState::new(&Config::default());
        app.tui.search.keyword = "climate".into();
        app.tui.search.results = vec![Article {
            title: "Glaciers in retreat".into(),
            url: "https://example.com/glaciers".into(),
            ..Article::default()
        }];

        let screen = draw(&app);
        assert!(screen.contains("Glaciers in retreat"));
        assert!(screen.contains("Results for \"climate\""));
    }

    #[test]
    fn test_login_modal_renders_over_view() {
        let mut app = AppState::new(&Config::default());
        app.open_overlay(OverlayRequest::Login);

        let screen = draw(&app);
        assert!(screen.contains("Sign in"));
        assert!(screen.contains("Password"));
    }
}
