// Keyboard input handling.
//
// Translates crossterm key events into `ViewState` mutations. Only quitting
// is forwarded to the event loop as a `UserCommand`.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use hoopscout_core::records::PlayerId;

use super::{Screen, UserCommand, ViewState};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand::Quit)` when the board should exit; every other
/// key is applied to `ViewState` directly.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports Press and Release for each keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits, whatever has focus.
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.filter_mode {
        return handle_filter_mode(key_event, view_state);
    }

    match view_state.screen {
        Screen::Roster => handle_roster(key_event, view_state),
        Screen::ColumnPanel => handle_column_panel(key_event, view_state),
        Screen::Profile(id) => handle_profile(key_event, view_state, id),
        Screen::ReportForm(id) => handle_report_form(key_event, view_state, id),
    }
}

fn handle_roster(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.select(view_state.selected.saturating_sub(1));
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.select(view_state.selected.saturating_add(1));
            None
        }
        KeyCode::PageUp => {
            let page = view_state.paging.page_size;
            view_state.select(view_state.selected.saturating_sub(page));
            None
        }
        KeyCode::PageDown => {
            let page = view_state.paging.page_size;
            view_state.select(view_state.selected.saturating_add(page));
            None
        }
        KeyCode::Home => {
            view_state.select(0);
            None
        }
        KeyCode::End => {
            view_state.select(usize::MAX);
            None
        }
        KeyCode::Enter => {
            if let Some(id) = view_state.selected_row().map(|row| row.player_id) {
                view_state.profile_scroll = 0;
                view_state.screen = Screen::Profile(id);
            }
            None
        }
        KeyCode::Char('/') => {
            view_state.filter_mode = true;
            None
        }
        KeyCode::Esc => {
            view_state.filter_text.clear();
            view_state.notice = None;
            view_state.select(0);
            None
        }
        KeyCode::Char('s') => {
            cycle_sort_column(view_state);
            None
        }
        KeyCode::Char('S') => {
            view_state.sort.direction = view_state.sort.direction.flipped();
            view_state.apply_sort();
            None
        }
        KeyCode::Char('c') => {
            view_state.screen = Screen::ColumnPanel;
            None
        }
        KeyCode::Char('q') => Some(UserCommand::Quit),
        _ => None,
    }
}

/// Handle key events while typing a name filter.
///
/// Printable characters extend the filter, Backspace removes one, Enter keeps
/// the text, and Esc clears it.
fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            view_state.filter_text.clear();
        }
        KeyCode::Enter => {
            view_state.filter_mode = false;
        }
        KeyCode::Backspace => {
            view_state.filter_text.pop();
        }
        KeyCode::Char(c) => {
            view_state.filter_text.push(c);
        }
        _ => return None,
    }
    view_state.select(0);
    None
}

fn handle_column_panel(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let count = view_state.panel_columns().len();
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.column_cursor = view_state.column_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view_state.column_cursor + 1 < count {
                view_state.column_cursor += 1;
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            let column = view_state
                .panel_columns()
                .get(view_state.column_cursor)
                .map(|c| c.id.clone());
            if let Some(column) = column {
                view_state.visibility.toggle(&column);
            }
        }
        KeyCode::Esc | KeyCode::Char('c') => {
            view_state.screen = Screen::Roster;
        }
        KeyCode::Char('q') => return Some(UserCommand::Quit),
        _ => {}
    }
    None
}

fn handle_profile(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    id: PlayerId,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc | KeyCode::Backspace => {
            view_state.screen = Screen::Roster;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.profile_scroll = view_state.profile_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.profile_scroll = view_state.profile_scroll.saturating_add(1);
        }
        KeyCode::Char('a') => {
            if view_state.profiles.contains_key(&id) {
                view_state.form_error = None;
                view_state.screen = Screen::ReportForm(id);
            }
        }
        KeyCode::Char('q') => return Some(UserCommand::Quit),
        _ => {}
    }
    None
}

/// Handle key events in the report form. Typed characters go to the focused
/// field; Esc closes the form and keeps the draft.
fn handle_report_form(
    key_event: KeyEvent,
    view_state: &mut ViewState,
    id: PlayerId,
) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.form_error = None;
            view_state.screen = Screen::Profile(id);
        }
        KeyCode::Tab => {
            view_state.report_field = view_state.report_field.next();
        }
        KeyCode::BackTab => {
            view_state.report_field = view_state.report_field.prev();
        }
        KeyCode::Enter => {
            // Failure is recorded in `form_error` and rendered by the form.
            let _ = view_state.submit_report(id, Local::now());
        }
        KeyCode::Backspace => {
            let field = view_state.report_field;
            view_state.draft_mut(id).field_mut(field).pop();
        }
        KeyCode::Char(c) => {
            let field = view_state.report_field;
            view_state.draft_mut(id).field_mut(field).push(c);
        }
        _ => {}
    }
    None
}

/// Advance the sort to the next visible column, starting over at the first.
fn cycle_sort_column(view_state: &mut ViewState) {
    let columns: Vec<_> = view_state
        .visible_columns()
        .iter()
        .map(|c| c.id.clone())
        .collect();
    if columns.is_empty() {
        return;
    }
    let next = columns
        .iter()
        .position(|c| *c == view_state.sort.column)
        .map_or(0, |i| (i + 1) % columns.len());
    view_state.sort.column = columns[next].clone();
    view_state.apply_sort();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::tests::test_state;
    use crossterm::event::{KeyEventState, KeyModifiers};
    use hoopscout_core::reports::ReportField;
    use hoopscout_core::roster::SortDirection;
    use hoopscout_core::schema::ColumnId;

    /// Helper to create a KeyEvent with no modifiers.
    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(state: &mut ViewState, text: &str) {
        for c in text.chars() {
            handle_key(key(KeyCode::Char(c)), state);
        }
    }

    // -- Navigation --

    #[test]
    fn j_and_k_move_selection() {
        let mut state = test_state();
        handle_key(key(KeyCode::Char('j')), &mut state);
        assert_eq!(state.selected, 1);
        handle_key(key(KeyCode::Down), &mut state);
        handle_key(key(KeyCode::Down), &mut state);
        assert_eq!(state.selected, 2);
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.selected, 1);
        handle_key(key(KeyCode::Up), &mut state);
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn page_keys_move_by_page_size() {
        let mut state = test_state();
        state.paging.page_size = 2;
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.selected, 2);
        assert_eq!(state.paging.page, 1);
        handle_key(key(KeyCode::PageUp), &mut state);
        assert_eq!(state.selected, 0);
        assert_eq!(state.paging.page, 0);
    }

    #[test]
    fn enter_opens_profile_and_esc_closes() {
        let mut state = test_state();
        handle_key(key(KeyCode::Enter), &mut state);
        assert_eq!(state.screen, Screen::Profile(PlayerId(1)));
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.screen, Screen::Roster);
    }

    // -- Filter --

    #[test]
    fn filter_mode_narrows_rows() {
        let mut state = test_state();
        handle_key(key(KeyCode::Char('/')), &mut state);
        assert!(state.filter_mode);
        type_text(&mut state, "bai");
        assert_eq!(state.filter_text, "bai");
        assert_eq!(state.filtered_rows().len(), 1);

        handle_key(key(KeyCode::Backspace), &mut state);
        assert_eq!(state.filter_text, "ba");

        handle_key(key(KeyCode::Enter), &mut state);
        assert!(!state.filter_mode);
        assert_eq!(state.filter_text, "ba");
    }

    #[test]
    fn q_in_filter_mode_is_text() {
        let mut state = test_state();
        handle_key(key(KeyCode::Char('/')), &mut state);
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), None);
        assert_eq!(state.filter_text, "q");
    }

    #[test]
    fn esc_clears_filter() {
        let mut state = test_state();
        handle_key(key(KeyCode::Char('/')), &mut state);
        type_text(&mut state, "flagg");
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(!state.filter_mode);
        assert!(state.filter_text.is_empty());

        state.filter_text = "harper".into();
        handle_key(key(KeyCode::Esc), &mut state);
        assert!(state.filter_text.is_empty());
    }

    // -- Sorting --

    #[test]
    fn s_cycles_sort_column_and_shift_s_flips() {
        let mut state = test_state();
        assert_eq!(state.sort.column, ColumnId::AvgRank);
        handle_key(key(KeyCode::Char('s')), &mut state);
        assert_eq!(state.sort.column, ColumnId::FirstName);
        let first: Vec<&str> = state.rows.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(first, vec!["Ace", "Cooper", "Dylan"]);

        handle_key(key(KeyCode::Char('S')), &mut state);
        assert_eq!(state.sort.direction, SortDirection::Descending);
        let first: Vec<&str> = state.rows.iter().map(|r| r.first_name.as_str()).collect();
        assert_eq!(first, vec!["Dylan", "Cooper", "Ace"]);
    }

    #[test]
    fn sort_cycle_skips_hidden_columns() {
        let mut state = test_state();
        state.visibility.toggle(&ColumnId::FirstName);
        handle_key(key(KeyCode::Char('s')), &mut state);
        assert_eq!(state.sort.column, ColumnId::LastName);
    }

    // -- Column panel --

    #[test]
    fn column_panel_toggles_visibility() {
        let mut state = test_state();
        handle_key(key(KeyCode::Char('c')), &mut state);
        assert_eq!(state.screen, Screen::ColumnPanel);

        // Panel order: firstName, lastName, avgRank, ...
        handle_key(key(KeyCode::Char('j')), &mut state);
        handle_key(key(KeyCode::Char(' ')), &mut state);
        assert!(!state.visibility.is_visible(&ColumnId::LastName));
        handle_key(key(KeyCode::Char(' ')), &mut state);
        assert!(state.visibility.is_visible(&ColumnId::LastName));

        for _ in 0..20 {
            handle_key(key(KeyCode::Down), &mut state);
        }
        assert_eq!(state.column_cursor, state.panel_columns().len() - 1);

        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.screen, Screen::Roster);
    }

    // -- Reports --

    #[test]
    fn report_form_round_trip() {
        let mut state = test_state();
        handle_key(key(KeyCode::Enter), &mut state);
        handle_key(key(KeyCode::Char('a')), &mut state);
        assert_eq!(state.screen, Screen::ReportForm(PlayerId(1)));

        type_text(&mut state, "Jane");
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.report_field, ReportField::Pros);
        type_text(&mut state, "Two-way wing");
        handle_key(key(KeyCode::Enter), &mut state);

        assert_eq!(state.screen, Screen::Profile(PlayerId(1)));
        let reports = state.reports.reports_for(PlayerId(1));
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].author, "Jane");
        assert_eq!(reports[0].pros, "Two-way wing");
    }

    #[test]
    fn blank_author_keeps_form_open() {
        let mut state = test_state();
        state.screen = Screen::ReportForm(PlayerId(2));
        handle_key(key(KeyCode::Tab), &mut state);
        type_text(&mut state, "Shifty handle");
        handle_key(key(KeyCode::Enter), &mut state);

        assert_eq!(state.screen, Screen::ReportForm(PlayerId(2)));
        assert!(state.form_error.is_some());
        assert_eq!(state.draft(PlayerId(2)).unwrap().pros, "Shifty handle");
    }

    #[test]
    fn cancel_preserves_draft() {
        let mut state = test_state();
        state.screen = Screen::ReportForm(PlayerId(1));
        type_text(&mut state, "Half written");
        handle_key(key(KeyCode::Esc), &mut state);
        assert_eq!(state.screen, Screen::Profile(PlayerId(1)));

        handle_key(key(KeyCode::Char('a')), &mut state);
        assert_eq!(state.draft(PlayerId(1)).unwrap().author, "Half written");
    }

    #[test]
    fn q_in_report_form_is_text() {
        let mut state = test_state();
        state.screen = Screen::ReportForm(PlayerId(1));
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), None);
        assert_eq!(state.draft(PlayerId(1)).unwrap().author, "q");
    }

    // -- Quit --

    #[test]
    fn q_quits_from_roster() {
        let mut state = test_state();
        assert_eq!(handle_key(key(KeyCode::Char('q')), &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        let mut state = test_state();
        state.screen = Screen::ReportForm(PlayerId(1));
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
        state.screen = Screen::Roster;
        state.filter_mode = true;
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = test_state();
        let event = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handle_key(event, &mut state), None);
    }
}
