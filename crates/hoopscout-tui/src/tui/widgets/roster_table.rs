// Prospect table widget: one page of filtered, sorted rows.
//
// Columns follow the schema order minus hidden columns. Rank cells are tinted
// on a green-to-red scale; missing values show a dash. The sorted column's
// header carries a direction arrow.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};
use ratatui::Frame;

use hoopscout_core::roster::{CellValue, RankScale, RosterRow};
use hoopscout_core::schema::{ColumnDef, ColumnId};

use crate::tui::ViewState;

/// Render the current page of the prospect table into the given area.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let filtered = state.filtered_rows();
    let columns = state.visible_columns();
    let range = state.paging.range(filtered.len());
    let page_start = range.start;

    let header = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(header_text(c, state)))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = filtered[range]
        .iter()
        .map(|row| {
            Row::new(
                columns
                    .iter()
                    .map(|c| body_cell(row, &c.id, &state.rank_scale))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let widths: Vec<Constraint> = columns.iter().map(|c| column_width(c)).collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(build_title(state, filtered.len())),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol(">> ");

    let selected_on_page = state
        .selected
        .checked_sub(page_start)
        .filter(|i| page_start + i < filtered.len());
    let mut table_state = TableState::default().with_selected(selected_on_page);
    frame.render_stateful_widget(table, area, &mut table_state);
}

/// Header label, with an arrow on the sorted column.
pub fn header_text(column: &ColumnDef, state: &ViewState) -> String {
    if column.id == state.sort.column {
        format!("{} {}", column.header, state.sort.direction.arrow())
    } else {
        column.header.clone()
    }
}

fn body_cell<'a>(row: &RosterRow, column: &ColumnId, scale: &RankScale) -> Cell<'a> {
    let text = row.cell_text(column);
    match (row.cell(column), column) {
        (CellValue::Number(value), ColumnId::AvgRank | ColumnId::Scout(_)) => {
            Cell::from(text).style(Style::default().fg(heat_color(scale, value)))
        }
        (CellValue::Missing, _) => Cell::from(text).style(Style::default().fg(Color::DarkGray)),
        _ => Cell::from(text),
    }
}

/// Green for the best ranks, red for the worst.
pub fn heat_color(scale: &RankScale, value: f64) -> Color {
    let (red, green) = scale.heat(value);
    Color::Rgb(red, green, 0)
}

fn column_width(column: &ColumnDef) -> Constraint {
    match column.id {
        ColumnId::FirstName | ColumnId::LastName => Constraint::Min(12),
        _ => {
            // Room for the header plus a sort arrow.
            let width = column.header.chars().count() as u16 + 2;
            Constraint::Length(width.max(6))
        }
    }
}

/// "Prospects (42) "flag" - page 1/3"
fn build_title(state: &ViewState, filtered_count: usize) -> Line<'static> {
    let mut title = format!("Prospects ({filtered_count})");
    if !state.filter_text.is_empty() {
        title.push_str(&format!(" \"{}\"", state.filter_text));
    }
    title.push_str(&format!(
        " - page {}/{}",
        state.paging.page + 1,
        state.paging.page_count(filtered_count)
    ));
    Line::from(title)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::{buffer_lines, test_state};
    use hoopscout_core::roster::{SortDirection, MISSING_CELL};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_lines(state: &ViewState) -> Vec<String> {
        let backend = TestBackend::new(120, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, frame.area(), state))
            .unwrap();
        buffer_lines(&terminal)
    }

    #[test]
    fn renders_headers_and_rows() {
        let state = test_state();
        let text = render_lines(&state).join("\n");
        assert!(text.contains("Avg. Scout Rank \u{25b2}"));
        assert!(text.contains("First Name"));
        assert!(text.contains("Scout Z"));
        assert!(text.contains("Cooper"));
        assert!(text.contains("Bailey"));
        assert!(text.contains("Prospects (3)"));
        assert!(text.contains(MISSING_CELL));
    }

    #[test]
    fn hidden_columns_not_rendered() {
        let mut state = test_state();
        state.visibility.toggle(&ColumnId::Scout("Scout Z".into()));
        let text = render_lines(&state).join("\n");
        assert!(!text.contains("Scout Z"));
        assert!(text.contains("ESPN Rank"));
    }

    #[test]
    fn filter_shows_in_title() {
        let mut state = test_state();
        state.filter_text = "dyl".into();
        let text = render_lines(&state).join("\n");
        assert!(text.contains("Prospects (1) \"dyl\""));
        assert!(text.contains("Harper"));
        assert!(!text.contains("Cooper"));
    }

    #[test]
    fn header_arrow_follows_sort() {
        let mut state = test_state();
        state.sort.direction = SortDirection::Descending;
        let avg = state.schema.columns[0].clone();
        assert_eq!(header_text(&avg, &state), "Avg. Scout Rank \u{25bc}");
        let first = state.schema.columns[1].clone();
        assert_eq!(header_text(&first, &state), "First Name");
    }

    #[test]
    fn heat_color_endpoints() {
        let scale = RankScale::default();
        assert_eq!(heat_color(&scale, 1.0), Color::Rgb(0, 255, 0));
        assert_eq!(heat_color(&scale, 50.0), Color::Rgb(255, 0, 0));
    }

    #[test]
    fn empty_filter_result_renders() {
        let mut state = test_state();
        state.filter_text = "nobody".into();
        let text = render_lines(&state).join("\n");
        assert!(text.contains("Prospects (0)"));
    }
}
