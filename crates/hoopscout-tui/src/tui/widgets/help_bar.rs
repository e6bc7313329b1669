// Help bar widget: key hints for whichever view has focus.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Screen, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        hint_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn hint_text(state: &ViewState) -> &'static str {
    if state.filter_mode {
        return " type to filter | enter:Keep | esc:Clear";
    }
    match state.screen {
        Screen::Roster => {
            " q:Quit | j/k:Move | PgUp/PgDn:Page | enter:Profile | /:Filter | s:Sort | S:Reverse | c:Columns"
        }
        Screen::ColumnPanel => " j/k:Move | space:Toggle | esc:Close",
        Screen::Profile(_) => " j/k:Scroll | a:Add report | esc:Back | q:Quit",
        Screen::ReportForm(_) => " tab:Next field | enter:Save | esc:Close",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
