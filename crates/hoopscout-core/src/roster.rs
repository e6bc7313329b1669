// Roster table view model: one row per merged player, sorting, name filter,
// column visibility, paging, and the rank heat scale.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use crate::config::TableConfig;
use crate::merge::{MergeOutcome, Player};
use crate::metrics::AverageRank;
use crate::records::PlayerId;
use crate::schema::{ColumnDef, ColumnId, TableSchema};

/// Text shown in a table cell with no value.
pub const MISSING_CELL: &str = "\u{2013}";

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// A single cell's value before formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Missing,
}

impl CellValue {
    fn from_number(value: Option<f64>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Number)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// One roster table row, owning everything it displays.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub player_id: PlayerId,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub avg_rank: AverageRank,
    /// Every scout in the schema, ranked or not.
    pub scout_ranks: BTreeMap<String, Option<f64>>,
}

impl RosterRow {
    pub fn from_player(player: &Player<'_>, schema: &TableSchema) -> Self {
        let scout_ranks = schema
            .scout_names()
            .map(|scout| (scout.to_string(), player.scout_rank(scout)))
            .collect();
        RosterRow {
            player_id: player.id,
            name: player.bio.name.clone(),
            first_name: player.bio.first_name.clone(),
            last_name: player.bio.last_name.clone(),
            height: player.bio.height,
            weight: player.bio.weight,
            avg_rank: player.average_rank(),
            scout_ranks,
        }
    }

    pub fn cell(&self, column: &ColumnId) -> CellValue {
        match column {
            ColumnId::AvgRank => CellValue::from_number(self.avg_rank.value()),
            ColumnId::FirstName => text_cell(&self.first_name),
            ColumnId::LastName => text_cell(&self.last_name),
            ColumnId::Height => CellValue::from_number(self.height),
            ColumnId::Weight => CellValue::from_number(self.weight),
            ColumnId::Scout(name) => {
                CellValue::from_number(self.scout_ranks.get(name).copied().flatten())
            }
        }
    }

    /// Display text for a cell. Ranks carry one decimal; height and weight
    /// drop a zero fraction.
    pub fn cell_text(&self, column: &ColumnId) -> String {
        match (self.cell(column), column) {
            (CellValue::Missing, _) => MISSING_CELL.to_string(),
            (CellValue::Text(text), _) => text,
            (CellValue::Number(v), ColumnId::Height | ColumnId::Weight) => format_measure(v),
            (CellValue::Number(v), _) => format!("{v:.1}"),
        }
    }

    /// Case-insensitive substring match on first, last, or full name.
    pub fn matches_name(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || [&self.name, &self.first_name, &self.last_name]
                .iter()
                .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

fn text_cell(text: &str) -> CellValue {
    if text.is_empty() {
        CellValue::Missing
    } else {
        CellValue::Text(text.to_string())
    }
}

fn format_measure(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

/// Build one row per merged player, in the default order.
pub fn build_rows(outcome: &MergeOutcome<'_>, schema: &TableSchema) -> Vec<RosterRow> {
    let mut rows: Vec<RosterRow> = outcome
        .players
        .values()
        .map(|player| RosterRow::from_player(player, schema))
        .collect();
    sort_rows(&mut rows, &SortState::default());
    rows
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "\u{25b2}",
            SortDirection::Descending => "\u{25bc}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub column: ColumnId,
    pub direction: SortDirection,
}

impl Default for SortState {
    /// Best average rank first.
    fn default() -> Self {
        SortState {
            column: ColumnId::AvgRank,
            direction: SortDirection::Ascending,
        }
    }
}

/// Stable sort by one column. Missing values go last in either direction;
/// ties fall back to ascending player id.
pub fn sort_rows(rows: &mut [RosterRow], sort: &SortState) {
    rows.sort_by(|a, b| {
        compare_cells(&a.cell(&sort.column), &b.cell(&sort.column), sort.direction)
            .then(a.player_id.cmp(&b.player_id))
    });
}

fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    let ordering = match (a, b) {
        (CellValue::Missing, CellValue::Missing) => return Ordering::Equal,
        (CellValue::Missing, _) => return Ordering::Greater,
        (_, CellValue::Missing) => return Ordering::Less,
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        (CellValue::Number(_), CellValue::Text(_)) => Ordering::Less,
        (CellValue::Text(_), CellValue::Number(_)) => Ordering::Greater,
    };
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Rows whose name contains `filter_text`, ignoring case. Order is kept.
pub fn filter_rows<'a>(rows: &'a [RosterRow], filter_text: &str) -> Vec<&'a RosterRow> {
    let text_lower = filter_text.trim().to_lowercase();
    rows.iter().filter(|row| row.matches_name(&text_lower)).collect()
}

// ---------------------------------------------------------------------------
// Column visibility
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    hidden: BTreeSet<ColumnId>,
}

impl ColumnVisibility {
    /// Start with the given column keys hidden and everything else shown.
    pub fn from_hidden_keys<S: AsRef<str>>(keys: &[S]) -> Self {
        ColumnVisibility {
            hidden: keys.iter().map(|k| ColumnId::from_key(k.as_ref())).collect(),
        }
    }

    pub fn is_visible(&self, column: &ColumnId) -> bool {
        !self.hidden.contains(column)
    }

    /// Flip one column. Returns whether it is now visible.
    pub fn toggle(&mut self, column: &ColumnId) -> bool {
        if self.hidden.remove(column) {
            true
        } else {
            self.hidden.insert(column.clone());
            false
        }
    }

    /// Schema columns that are currently shown, in schema order.
    pub fn visible_columns<'s>(&self, schema: &'s TableSchema) -> Vec<&'s ColumnDef> {
        schema
            .columns
            .iter()
            .filter(|c| self.is_visible(&c.id))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub page_size: usize,
    /// Zero-based.
    pub page: usize,
}

impl Paging {
    pub fn new(page_size: usize) -> Self {
        Paging {
            page_size: page_size.max(1),
            page: 0,
        }
    }

    /// Always at least one page, even with no rows.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn clamp(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }

    /// Index range of the current page, clamped to `total`.
    pub fn range(&self, total: usize) -> Range<usize> {
        let page = self.page.min(self.page_count(total) - 1);
        let start = (page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub fn next(&mut self, total: usize) {
        self.page = (self.page + 1).min(self.page_count(total) - 1);
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Rank heat scale
// ---------------------------------------------------------------------------

/// Maps a rank onto a green (best) to red (worst) gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankScale {
    pub min: f64,
    pub max: f64,
}

impl Default for RankScale {
    fn default() -> Self {
        RankScale { min: 1.0, max: 50.0 }
    }
}

impl RankScale {
    pub fn from_config(table: &TableConfig) -> Self {
        RankScale {
            min: table.rank_scale_min,
            max: table.rank_scale_max,
        }
    }

    /// Position of `value` on the scale, in [0, 1].
    pub fn ratio(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }

    /// (red, green) channels for a rank.
    pub fn heat(&self, value: f64) -> (u8, u8) {
        let ratio = self.ratio(value);
        let red = (255.0 * ratio).round() as u8;
        let green = (255.0 * (1.0 - ratio)).round() as u8;
        (red, green)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
