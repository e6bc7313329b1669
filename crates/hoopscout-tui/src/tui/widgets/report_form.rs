// Scouting report form: author, pros, cons, and notes for one player.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use hoopscout_core::records::PlayerId;
use hoopscout_core::reports::{ReportDraft, ReportField};

use crate::tui::layout::centered_rect;
use crate::tui::ViewState;

const FORM_WIDTH: u16 = 64;
const FORM_HEIGHT: u16 = 14;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, id: PlayerId) {
    let form_area = centered_rect(FORM_WIDTH, FORM_HEIGHT, area);
    frame.render_widget(Clear, form_area);

    let name = state
        .profiles
        .get(&id)
        .map_or_else(|| id.to_string(), |p| p.name.clone());
    let empty = ReportDraft::default();
    let draft = state.draft(id).unwrap_or(&empty);

    let paragraph = Paragraph::new(form_lines(draft, state.report_field, state.form_error.as_deref()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(format!(" New report: {name} ")),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, form_area);
}

/// One line per field with the focused field marked, then the error or hint.
pub fn form_lines(
    draft: &ReportDraft,
    focused: ReportField,
    error: Option<&str>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for field in ReportField::ALL {
        let is_focused = field == focused;
        let label_style = if is_focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let cursor = if is_focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", field.label()), label_style),
            Span::raw(" "),
            Span::raw(format!("{}{cursor}", draft.field(field))),
        ]));
        lines.push(Line::default());
    }

    match error {
        Some(message) => lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))),
        None => lines.push(Line::from(Span::styled(
            "tab: next field | enter: save | esc: close (draft kept)",
            Style::default().fg(Color::DarkGray),
        ))),
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
