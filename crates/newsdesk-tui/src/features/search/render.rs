use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::SearchFocus;
use crate::common::truncate_start_with_ellipsis;
use crate::render::{render_article_list, spinner};
use crate::state::TuiState;

const ABOUT: &str = "Search recent news by keyword. Sign in to bookmark articles \
                     and find them again under Saved articles.";

/// Home screen: search box above the results.
pub fn render_home_view(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let [search_area, body] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

    render_search_box(frame, search_area, tui);

    let search = &tui.search;
    if search.is_loading() && search.results.is_empty() {
        let line = Line::from(vec![
            Span::styled(spinner(tui.spinner_frame), Style::default().fg(Color::Cyan)),
            Span::raw(" Searching for news..."),
        ]);
        frame.render_widget(Paragraph::new(line), inset(body));
    } else if search.no_results {
        let lines = vec![
            Line::from(Span::styled(
                "Nothing found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("Sorry, but nothing matched \"{}\".", search.keyword),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), inset(body));
    } else if search.results.is_empty() {
        let about = Paragraph::new(ABOUT)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(about, inset(body));
    } else {
        let title = format!(" Results for \"{}\" ({}) ", search.keyword, search.results.len());
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);
        let inner = block.inner(body);
        frame.render_widget(block, body);
        render_article_list(
            frame,
            inner,
            &search.results,
            search.selected,
            search.focus == SearchFocus::Results,
            Some(&tui.saved),
        );
    }
}

fn render_search_box(frame: &mut Frame, area: Rect, tui: &TuiState) {
    let focused = tui.search.focus == SearchFocus::Input;
    let border = if focused { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" What's going on in the world? ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = &tui.search.input;
    let max = inner.width.saturating_sub(3) as usize;
    let spans = if input.is_empty() && !focused {
        vec![Span::styled(
            "> Enter topic",
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        let mut spans = vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(truncate_start_with_ellipsis(input.text(), max)),
        ];
        if focused {
            spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
        }
        spans
    };
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x + 1,
        area.y + 1,
        area.width.saturating_sub(2),
        area.height.saturating_sub(1),
    )
}
