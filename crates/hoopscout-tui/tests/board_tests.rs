// Integration tests for the prospect board.
//
// These drive the TUI's view state with key events over the shared dataset
// fixture, then render frames into a TestBackend.

use std::path::Path;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

use hoopscout_core::config::{parse_config, DEFAULT_BOARD_TOML};
use hoopscout_core::merge::merge_players;
use hoopscout_core::records::{load_dataset, PlayerId, RecordStore};
use hoopscout_core::schema::TableSchema;
use hoopscout_tui::tui::input::handle_key;
use hoopscout_tui::tui::{render_frame, Screen, UserCommand, ViewState};

const FIXTURE: &str = "../hoopscout-core/tests/fixtures/dataset.json";

// ===========================================================================
// Test helpers
// ===========================================================================

fn fixture_store() -> RecordStore {
    let (store, _) = load_dataset(Path::new(FIXTURE)).unwrap();
    store
}

fn board(store: &RecordStore) -> ViewState {
    let config = parse_config(DEFAULT_BOARD_TOML, Path::new("board.toml")).unwrap();
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    ViewState::new(&merge_players(store), TableSchema::derive(store), &config, today)
}

fn press(state: &mut ViewState, code: KeyCode) -> Option<UserCommand> {
    handle_key(
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        },
        state,
    )
}

fn type_text(state: &mut ViewState, text: &str) {
    for c in text.chars() {
        press(state, KeyCode::Char(c));
    }
}

fn screen_text(state: &ViewState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(200, 80)).unwrap();
    terminal.draw(|frame| render_frame(frame, state)).unwrap();
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ===========================================================================
// Board
// ===========================================================================

#[test]
fn board_lists_players_best_rank_first() {
    let store = fixture_store();
    let state = board(&store);

    let ids: Vec<u64> = state.rows.iter().map(|r| r.player_id.0).collect();
    assert_eq!(ids, vec![101, 102, 103, 104, 105]);

    let text = screen_text(&state);
    assert!(text.contains("Prospects (5)"));
    assert!(text.contains("Kyle Boone Rank"));
    assert!(text.contains("orphaned records skipped"));
}

#[test]
fn filter_then_open_profile() {
    let store = fixture_store();
    let mut state = board(&store);

    press(&mut state, KeyCode::Char('/'));
    type_text(&mut state, "harp");
    press(&mut state, KeyCode::Enter);
    assert_eq!(state.filtered_rows().len(), 1);

    press(&mut state, KeyCode::Enter);
    assert_eq!(state.screen, Screen::Profile(PlayerId(102)));
    let text = screen_text(&state);
    assert!(text.contains("Rutgers"));
}

#[test]
fn report_round_trip_through_keys() {
    let store = fixture_store();
    let mut state = board(&store);

    press(&mut state, KeyCode::Enter);
    assert_eq!(state.screen, Screen::Profile(PlayerId(101)));
    press(&mut state, KeyCode::Char('a'));
    assert_eq!(state.screen, Screen::ReportForm(PlayerId(101)));

    // Saving without an author keeps the form open.
    press(&mut state, KeyCode::Enter);
    assert_eq!(state.screen, Screen::ReportForm(PlayerId(101)));
    assert!(state.form_error.is_some());

    type_text(&mut state, "Jane Scout");
    press(&mut state, KeyCode::Tab);
    type_text(&mut state, "Two-way wing");
    press(&mut state, KeyCode::Enter);

    assert_eq!(state.screen, Screen::Profile(PlayerId(101)));
    let reports = state.reports.reports_for(PlayerId(101));
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].author, "Jane Scout");
    assert_eq!(reports[0].pros, "Two-way wing");

    let text = screen_text(&state);
    assert!(text.contains("Jane Scout"));
}

#[test]
fn quit_from_board() {
    let store = fixture_store();
    let mut state = board(&store);
    assert_eq!(press(&mut state, KeyCode::Char('q')), Some(UserCommand::Quit));
}
