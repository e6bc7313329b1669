// Column toggle panel: every column grouped by category with a checkbox.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::tui::layout::centered_rect;
use crate::tui::ViewState;

const PANEL_WIDTH: u16 = 40;

/// Render the panel centered over `area`.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = panel_lines(state);
    let height = lines.len() as u16 + 2;
    let panel_area = centered_rect(PANEL_WIDTH, height, area);

    frame.render_widget(Clear, panel_area);

    // Keep the cursor row on screen when the list is taller than the panel.
    let inner_height = panel_area.height.saturating_sub(2);
    let cursor_line = cursor_line_index(state) as u16;
    let scroll = cursor_line.saturating_sub(inner_height.saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Columns (space: toggle, esc: close) "),
        )
        .scroll((scroll, 0))
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, panel_area);
}

/// Category headings followed by "[x] Column" lines.
pub fn panel_lines(state: &ViewState) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut index = 0usize;
    for (category, columns) in state.schema.by_category() {
        lines.push(Line::from(Span::styled(
            category.label().to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        if columns.is_empty() {
            lines.push(Line::from(Span::styled(
                "  (none)",
                Style::default().fg(Color::DarkGray),
            )));
        }
        for column in columns {
            let mark = if state.visibility.is_visible(&column.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let style = if index == state.column_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::from(Span::styled(
                format!("  {mark} {}", column.header),
                style,
            )));
            index += 1;
        }
    }
    lines
}

/// Line number of the cursor entry within `panel_lines`.
fn cursor_line_index(state: &ViewState) -> usize {
    let mut line = 0usize;
    let mut index = 0usize;
    for (_, columns) in state.schema.by_category() {
        line += 1;
        if columns.is_empty() {
            line += 1;
        }
        for _ in columns {
            if index == state.column_cursor {
                return line;
            }
            line += 1;
            index += 1;
        }
    }
    line
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
