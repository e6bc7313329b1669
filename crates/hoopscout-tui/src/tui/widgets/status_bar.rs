// Status bar widget: player count, filter, sort, page, and the latest notice.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [app name] [players shown/total] [sort] [page] [notice]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(status_spans(state)))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn status_spans(state: &ViewState) -> Vec<Span<'static>> {
    let shown = state.filtered_rows().len();
    let total = state.rows.len();
    let separator = || Span::styled(" | ", Style::default().fg(Color::Gray));

    let mut spans = vec![
        Span::styled(
            " hoopscout ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{shown}/{total} players"),
            Style::default().fg(Color::White),
        ),
        separator(),
        Span::styled(
            format!("sort: {} {}", sort_label(state), state.sort.direction.arrow()),
            Style::default().fg(Color::White),
        ),
        separator(),
        Span::styled(
            format!(
                "page {}/{}",
                state.paging.page + 1,
                state.paging.page_count(shown)
            ),
            Style::default().fg(Color::White),
        ),
    ];

    if state.filter_mode {
        spans.push(separator());
        spans.push(Span::styled(
            format!("filter: {}_", state.filter_text),
            Style::default().fg(Color::Yellow),
        ));
    }

    if let Some(notice) = &state.notice {
        spans.push(separator());
        spans.push(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }
    spans
}

fn sort_label(state: &ViewState) -> String {
    state
        .schema
        .column(&state.sort.column)
        .map_or_else(|| state.sort.column.key().to_string(), |c| c.header.clone())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
