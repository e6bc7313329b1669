// Scouting reports entered during a session. Held in memory only.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::info;

use crate::records::PlayerId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("a scouting report needs an author")]
    MissingAuthor,
}

/// Which draft field has focus in the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportField {
    #[default]
    Author,
    Pros,
    Cons,
    Notes,
}

impl ReportField {
    pub const ALL: [ReportField; 4] = [
        ReportField::Author,
        ReportField::Pros,
        ReportField::Cons,
        ReportField::Notes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ReportField::Author => "Author",
            ReportField::Pros => "Pros",
            ReportField::Cons => "Cons",
            ReportField::Notes => "Special Notes",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ReportField::Author => ReportField::Pros,
            ReportField::Pros => ReportField::Cons,
            ReportField::Cons => ReportField::Notes,
            ReportField::Notes => ReportField::Author,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ReportField::Author => ReportField::Notes,
            ReportField::Pros => ReportField::Author,
            ReportField::Cons => ReportField::Pros,
            ReportField::Notes => ReportField::Cons,
        }
    }
}

/// Unsaved form contents. Survives closing the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub author: String,
    pub pros: String,
    pub cons: String,
    pub notes: String,
}

impl ReportDraft {
    pub fn field(&self, field: ReportField) -> &str {
        match field {
            ReportField::Author => &self.author,
            ReportField::Pros => &self.pros,
            ReportField::Cons => &self.cons,
            ReportField::Notes => &self.notes,
        }
    }

    pub fn field_mut(&mut self, field: ReportField) -> &mut String {
        match field {
            ReportField::Author => &mut self.author,
            ReportField::Pros => &mut self.pros,
            ReportField::Cons => &mut self.cons,
            ReportField::Notes => &mut self.notes,
        }
    }

    pub fn is_empty(&self) -> bool {
        ReportField::ALL
            .iter()
            .all(|f| self.field(*f).trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoutingReport {
    pub author: String,
    pub created_at: DateTime<Local>,
    pub pros: String,
    pub cons: String,
    pub notes: String,
}

/// Reports per player, each list in submission order.
#[derive(Debug, Clone, Default)]
pub struct ReportBook {
    reports: BTreeMap<PlayerId, Vec<ScoutingReport>>,
}

impl ReportBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports_for(&self, player: PlayerId) -> &[ScoutingReport] {
        self.reports.get(&player).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.reports.values().map(Vec::len).sum()
    }

    /// Save `draft` as a report for `player`. On success the draft is
    /// cleared; on error it is left untouched.
    pub fn submit(
        &mut self,
        player: PlayerId,
        draft: &mut ReportDraft,
        created_at: DateTime<Local>,
    ) -> Result<&ScoutingReport, ReportError> {
        let author = draft.author.trim();
        if author.is_empty() {
            return Err(ReportError::MissingAuthor);
        }
        let report = ScoutingReport {
            author: author.to_string(),
            created_at,
            pros: draft.pros.trim().to_string(),
            cons: draft.cons.trim().to_string(),
            notes: draft.notes.trim().to_string(),
        };
        *draft = ReportDraft::default();
        info!("saved scouting report for player {player} by {}", report.author);

        let list = self.reports.entry(player).or_default();
        list.push(report);
        Ok(&list[list.len() - 1])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
