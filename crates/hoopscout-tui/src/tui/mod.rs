// Terminal front end: prospect board, column panel, profile popup, and
// report form.
//
// The TUI owns a `ViewState` built once from the merged dataset. Every key
// press mutates it through `input::handle_key`, and the frame is redrawn from
// it at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tracing::{info, warn};

use hoopscout_core::config::BoardConfig;
use hoopscout_core::merge::MergeOutcome;
use hoopscout_core::profile::PlayerProfile;
use hoopscout_core::records::PlayerId;
use hoopscout_core::reports::{ReportBook, ReportDraft, ReportError, ReportField};
use hoopscout_core::roster::{
    build_rows, filter_rows, sort_rows, ColumnVisibility, Paging, RankScale, RosterRow, SortState,
};
use hoopscout_core::schema::{ColumnDef, TableSchema};

use layout::build_layout;

// ---------------------------------------------------------------------------
// Commands and screens
// ---------------------------------------------------------------------------

/// Requests from the input handler that the event loop acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
}

/// Which view has the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Roster,
    ColumnPanel,
    Profile(PlayerId),
    ReportForm(PlayerId),
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Everything the board renders plus the session's mutable state.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub schema: TableSchema,
    /// All rows, kept in the current sort order.
    pub rows: Vec<RosterRow>,
    pub profiles: BTreeMap<PlayerId, PlayerProfile>,
    pub sort: SortState,
    pub visibility: ColumnVisibility,
    pub paging: Paging,
    pub rank_scale: RankScale,
    /// Index into the filtered rows.
    pub selected: usize,
    pub filter_text: String,
    pub filter_mode: bool,
    pub screen: Screen,
    /// Cursor in the column panel, over `panel_columns()`.
    pub column_cursor: usize,
    pub profile_scroll: u16,
    pub reports: ReportBook,
    /// Unsaved report drafts, per player.
    pub drafts: BTreeMap<PlayerId, ReportDraft>,
    pub report_field: ReportField,
    pub form_error: Option<String>,
    /// One-line message for the status bar.
    pub notice: Option<String>,
}

impl ViewState {
    pub fn new(
        outcome: &MergeOutcome<'_>,
        schema: TableSchema,
        config: &BoardConfig,
        today: NaiveDate,
    ) -> Self {
        let rows = build_rows(outcome, &schema);
        let profiles = outcome
            .players
            .values()
            .map(|player| (player.id, PlayerProfile::from_player(player, today)))
            .collect();
        let notice = (!outcome.orphans.is_empty())
            .then(|| format!("{} orphaned records skipped", outcome.orphans.len()));

        ViewState {
            schema,
            rows,
            profiles,
            sort: SortState::default(),
            visibility: ColumnVisibility::from_hidden_keys(&config.table.hidden_columns),
            paging: Paging::new(config.table.page_size),
            rank_scale: RankScale::from_config(&config.table),
            selected: 0,
            filter_text: String::new(),
            filter_mode: false,
            screen: Screen::Roster,
            column_cursor: 0,
            profile_scroll: 0,
            reports: ReportBook::new(),
            drafts: BTreeMap::new(),
            report_field: ReportField::default(),
            form_error: None,
            notice,
        }
    }

    /// Rows passing the name filter, in sort order.
    pub fn filtered_rows(&self) -> Vec<&RosterRow> {
        filter_rows(&self.rows, &self.filter_text)
    }

    pub fn selected_row(&self) -> Option<&RosterRow> {
        self.filtered_rows().get(self.selected).copied()
    }

    /// Move the selection to `index`, clamped, and follow it with the page.
    pub fn select(&mut self, index: usize) {
        let total = self.filtered_rows().len();
        self.selected = index.min(total.saturating_sub(1));
        self.paging.page = self.selected / self.paging.page_size;
        self.paging.clamp(total);
    }

    /// Re-sort the rows, keeping the selected player selected.
    pub fn apply_sort(&mut self) {
        let keep = self.selected_row().map(|row| row.player_id);
        sort_rows(&mut self.rows, &self.sort);
        let index = keep
            .and_then(|id| self.filtered_rows().iter().position(|r| r.player_id == id))
            .unwrap_or(0);
        self.select(index);
    }

    /// Columns in toggle-panel order: grouped by category.
    pub fn panel_columns(&self) -> Vec<&ColumnDef> {
        self.schema
            .by_category()
            .into_iter()
            .flat_map(|(_, cols)| cols)
            .collect()
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.visibility.visible_columns(&self.schema)
    }

    pub fn draft(&self, player: PlayerId) -> Option<&ReportDraft> {
        self.drafts.get(&player)
    }

    pub fn draft_mut(&mut self, player: PlayerId) -> &mut ReportDraft {
        self.drafts.entry(player).or_default()
    }

    /// Save the player's draft as a report. The form stays open on error.
    pub fn submit_report(
        &mut self,
        player: PlayerId,
        now: DateTime<Local>,
    ) -> Result<(), ReportError> {
        let draft = self.drafts.entry(player).or_default();
        match self.reports.submit(player, draft, now) {
            Ok(report) => {
                self.notice = Some(format!("Report by {} saved", report.author));
                self.form_error = None;
                self.drafts.remove(&player);
                self.report_field = ReportField::default();
                self.screen = Screen::Profile(player);
                Ok(())
            }
            Err(e) => {
                warn!("report for player {player} rejected: {e}");
                self.form_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the board plus whichever overlay is active.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::roster_table::render(frame, layout.main_panel, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    match state.screen {
        Screen::Roster => {}
        Screen::ColumnPanel => widgets::column_panel::render(frame, layout.main_panel, state),
        Screen::Profile(id) => widgets::profile::render(frame, layout.main_panel, state, id),
        Screen::ReportForm(id) => {
            widgets::profile::render(frame, layout.main_panel, state, id);
            widgets::report_form::render(frame, layout.main_panel, state, id);
        }
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over keyboard input and the render tick. The terminal is restored
/// on clean exit.
pub async fn run(mut view_state: ViewState) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(UserCommand::Quit) = input::handle_key(key_event, &mut view_state) {
                            info!("quit requested");
                            break Ok(());
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::from(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }
            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::from(e).context("failed to draw frame"));
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
