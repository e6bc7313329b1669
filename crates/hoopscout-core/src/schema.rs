// Dynamic table schema: fixed bio columns plus one column per scout name
// discovered in the ranking records.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

pub use crate::records::PLAYER_ID_KEY;
use crate::records::{RecordStore, ScoutRanking};

/// Union of scout names across every ranking, excluding the id key.
///
/// A scout who ranked only some players still gets a column. The result is a
/// sorted set, so it does not depend on record order and repeated calls over
/// the same input agree.
pub fn discover_scout_columns<'a, I>(rankings: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a ScoutRanking>,
{
    rankings
        .into_iter()
        .flat_map(|ranking| ranking.scouts())
        .filter(|name| *name != PLAYER_ID_KEY)
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Identifies a roster table column.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColumnId {
    AvgRank,
    FirstName,
    LastName,
    Height,
    Weight,
    Scout(String),
}

/// Prefix that marks a scout column key, keeping scout names apart from the
/// fixed column keys.
pub const SCOUT_KEY_PREFIX: &str = "scout:";

impl ColumnId {
    /// Stable key, as used in config `hidden_columns`. Scout keys are
    /// `scout:<name>`.
    pub fn key(&self) -> Cow<'_, str> {
        match self {
            ColumnId::AvgRank => Cow::Borrowed("avgRank"),
            ColumnId::FirstName => Cow::Borrowed("firstName"),
            ColumnId::LastName => Cow::Borrowed("lastName"),
            ColumnId::Height => Cow::Borrowed("height"),
            ColumnId::Weight => Cow::Borrowed("weight"),
            ColumnId::Scout(name) => Cow::Owned(format!("{SCOUT_KEY_PREFIX}{name}")),
        }
    }

    /// Inverse of `key`. A bare name that is not a fixed column key is also
    /// read as a scout name.
    pub fn from_key(key: &str) -> Self {
        if let Some(name) = key.strip_prefix(SCOUT_KEY_PREFIX) {
            return ColumnId::Scout(name.to_string());
        }
        match key {
            "avgRank" => ColumnId::AvgRank,
            "firstName" => ColumnId::FirstName,
            "lastName" => ColumnId::LastName,
            "height" => ColumnId::Height,
            "weight" => ColumnId::Weight,
            other => ColumnId::Scout(other.to_string()),
        }
    }

    pub fn is_scout(&self) -> bool {
        matches!(self, ColumnId::Scout(_))
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Grouping used by the column toggle panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnCategory {
    Bio,
    Measurements,
    ScoutRankings,
}

impl ColumnCategory {
    pub const ALL: [ColumnCategory; 3] = [
        ColumnCategory::Bio,
        ColumnCategory::Measurements,
        ColumnCategory::ScoutRankings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ColumnCategory::Bio => "Bio",
            ColumnCategory::Measurements => "Measurements",
            ColumnCategory::ScoutRankings => "Scout Rankings",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub id: ColumnId,
    pub header: String,
    pub category: ColumnCategory,
    pub numeric: bool,
}

impl ColumnDef {
    fn fixed(id: ColumnId, header: &str, category: ColumnCategory, numeric: bool) -> Self {
        ColumnDef {
            id,
            header: header.to_string(),
            category,
            numeric,
        }
    }
}

/// Ordered column list: the fixed columns, then scouts in name order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn from_scout_names(scouts: &BTreeSet<String>) -> Self {
        let mut columns = vec![
            ColumnDef::fixed(ColumnId::AvgRank, "Avg. Scout Rank", ColumnCategory::Measurements, true),
            ColumnDef::fixed(ColumnId::FirstName, "First Name", ColumnCategory::Bio, false),
            ColumnDef::fixed(ColumnId::LastName, "Last Name", ColumnCategory::Bio, false),
            ColumnDef::fixed(ColumnId::Height, "Height (in)", ColumnCategory::Measurements, true),
            ColumnDef::fixed(ColumnId::Weight, "Weight (lbs)", ColumnCategory::Measurements, true),
        ];
        columns.extend(scouts.iter().map(|name| ColumnDef {
            id: ColumnId::Scout(name.clone()),
            header: name.clone(),
            category: ColumnCategory::ScoutRankings,
            numeric: true,
        }));
        TableSchema { columns }
    }

    /// Derive the schema from the ranking records in a store.
    pub fn derive(store: &RecordStore) -> Self {
        Self::from_scout_names(&discover_scout_columns(store.scout_rankings()))
    }

    pub fn column(&self, id: &ColumnId) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn scout_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().filter_map(|c| match &c.id {
            ColumnId::Scout(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Columns grouped by category, in toggle-panel order.
    pub fn by_category(&self) -> Vec<(ColumnCategory, Vec<&ColumnDef>)> {
        ColumnCategory::ALL
            .iter()
            .map(|cat| {
                let cols: Vec<&ColumnDef> = self.columns.iter().filter(|c| c.category == *cat).collect();
                (*cat, cols)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
