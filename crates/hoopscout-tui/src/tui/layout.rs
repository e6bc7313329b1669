// Screen layout: panel arrangement and popup sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Prospect table (fill)                             |
// |        +----------------------------+             |
// |        | popup (profile / columns)   |             |
// |        +----------------------------+             |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Flex, Layout, Rect};

/// Resolved screen areas for each board zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: dataset size, filter, sort, page.
    pub status_bar: Rect,
    /// The prospect table; popups are drawn over it.
    pub main_panel: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(3),    // table
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        status_bar: vertical[0],
        main_panel: vertical[1],
        help_bar: vertical[2],
    }
}

/// A rectangle covering the given percentages of `area`, centered.
pub fn centered_percent(width_pct: u16, height_pct: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(height_pct)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(width_pct)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}

/// A centered rectangle of fixed size, clamped to `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let clamped_width = width.min(area.width);
    let clamped_height = height.min(area.height);

    let vertical = Layout::vertical([Constraint::Length(clamped_height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Length(clamped_width)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 120, 40)
    }

    #[test]
    fn bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.status_bar.y, 0);
        assert_eq!(layout.help_bar.y, 39);
    }

    #[test]
    fn table_fills_the_middle() {
        let layout = build_layout(test_area());
        assert_eq!(layout.main_panel.y, 1);
        assert_eq!(layout.main_panel.height, 38);
        assert_eq!(layout.main_panel.width, 120);
    }

    #[test]
    fn centered_percent_is_inside_area() {
        let area = test_area();
        let popup = centered_percent(80, 50, area);
        assert_eq!(popup.width, 96);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 12);
        assert_eq!(popup.y, 10);
    }

    #[test]
    fn centered_rect_clamps_to_small_area() {
        let area = Rect::new(0, 0, 10, 3);
        let result = centered_rect(40, 12, area);
        assert!(result.width <= area.width);
        assert!(result.height <= area.height);
    }
}
