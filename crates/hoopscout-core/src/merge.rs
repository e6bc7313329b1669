// Identity merge: joins the four record sets into one `Player` per bio.
//
// Bio is the identity anchor. Measurements, rankings, and game logs attach to
// the player with a matching id; records pointing at an id with no bio are
// orphans and are skipped, but reported back so the caller can surface them.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, warn};

use crate::metrics::{self, AverageRank, GameStatSummary};
use crate::records::{Bio, GameLog, Measurement, PlayerId, RecordStore, ScoutRanking};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One prospect's joined view over the record store. Borrows every record;
/// rebuilt on each merge and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Player<'a> {
    pub id: PlayerId,
    pub bio: &'a Bio,
    pub measurement: Option<&'a Measurement>,
    pub scout_ranking: Option<&'a ScoutRanking>,
    /// In dataset order. Order carries no meaning.
    pub game_logs: Vec<&'a GameLog>,
}

impl<'a> Player<'a> {
    fn from_bio(bio: &'a Bio) -> Self {
        Player {
            id: bio.player_id,
            bio,
            measurement: None,
            scout_ranking: None,
            game_logs: Vec::new(),
        }
    }

    pub fn average_rank(&self) -> AverageRank {
        metrics::average_scout_rank(self.scout_ranking)
    }

    pub fn game_stats(&self) -> GameStatSummary {
        metrics::aggregate_game_stats(self.game_logs.iter().copied())
    }

    /// This player's rank from one scout, if that scout ranked them.
    pub fn scout_rank(&self, scout: &str) -> Option<f64> {
        self.scout_ranking.and_then(|r| r.rank(scout))
    }
}

/// Which secondary collection a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RecordKind {
    Bio,
    Measurement,
    ScoutRanking,
    GameLog,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordKind::Bio => "bio",
            RecordKind::Measurement => "measurement",
            RecordKind::ScoutRanking => "scout ranking",
            RecordKind::GameLog => "game log",
        };
        f.write_str(s)
    }
}

/// A secondary record whose player id has no bio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrphanRecord {
    pub kind: RecordKind,
    pub player_id: PlayerId,
    /// Set for game logs only.
    pub game_id: Option<u64>,
}

/// A record that replaced an earlier one of the same kind for the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacedRecord {
    pub kind: RecordKind,
    pub player_id: PlayerId,
}

/// Result of a merge: the players plus everything that did not attach cleanly.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome<'a> {
    pub players: BTreeMap<PlayerId, Player<'a>>,
    /// Skipped records, in the order they were encountered.
    pub orphans: Vec<OrphanRecord>,
    /// Later duplicates that replaced an earlier record.
    pub replaced: Vec<ReplacedRecord>,
}

impl<'a> MergeOutcome<'a> {
    pub fn get(&self, id: PlayerId) -> Option<&Player<'a>> {
        self.players.get(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn orphan_count(&self, kind: RecordKind) -> usize {
        self.orphans.iter().filter(|o| o.kind == kind).count()
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Build one `Player` per distinct bio id.
///
/// Measurement and ranking attach by assignment, so a later duplicate
/// replaces the earlier one. Game logs append. Records whose id has no bio are
/// skipped and listed in `MergeOutcome::orphans`; this never fails.
pub fn merge_players(store: &RecordStore) -> MergeOutcome<'_> {
    let mut outcome = MergeOutcome::default();

    for bio in store.bio() {
        if outcome
            .players
            .insert(bio.player_id, Player::from_bio(bio))
            .is_some()
        {
            warn!("duplicate bio for player {}, using latest record", bio.player_id);
            outcome.replaced.push(ReplacedRecord {
                kind: RecordKind::Bio,
                player_id: bio.player_id,
            });
        }
    }

    for ranking in store.scout_rankings() {
        match outcome.players.get_mut(&ranking.player_id) {
            Some(player) => {
                if player.scout_ranking.replace(ranking).is_some() {
                    warn!(
                        "duplicate scout ranking for player {}, using latest record",
                        ranking.player_id
                    );
                    outcome.replaced.push(ReplacedRecord {
                        kind: RecordKind::ScoutRanking,
                        player_id: ranking.player_id,
                    });
                }
            }
            None => outcome.orphans.push(OrphanRecord {
                kind: RecordKind::ScoutRanking,
                player_id: ranking.player_id,
                game_id: None,
            }),
        }
    }

    for measurement in store.measurements() {
        match outcome.players.get_mut(&measurement.player_id) {
            Some(player) => {
                if player.measurement.replace(measurement).is_some() {
                    warn!(
                        "duplicate measurement for player {}, using latest record",
                        measurement.player_id
                    );
                    outcome.replaced.push(ReplacedRecord {
                        kind: RecordKind::Measurement,
                        player_id: measurement.player_id,
                    });
                }
            }
            None => outcome.orphans.push(OrphanRecord {
                kind: RecordKind::Measurement,
                player_id: measurement.player_id,
                game_id: None,
            }),
        }
    }

    for log in store.game_logs() {
        match outcome.players.get_mut(&log.player_id) {
            Some(player) => player.game_logs.push(log),
            None => outcome.orphans.push(OrphanRecord {
                kind: RecordKind::GameLog,
                player_id: log.player_id,
                game_id: Some(log.game_id),
            }),
        }
    }

    if !outcome.orphans.is_empty() {
        warn!(
            "skipped {} orphaned records ({} rankings, {} measurements, {} game logs) with no matching bio",
            outcome.orphans.len(),
            outcome.orphan_count(RecordKind::ScoutRanking),
            outcome.orphan_count(RecordKind::Measurement),
            outcome.orphan_count(RecordKind::GameLog),
        );
    }
    debug!(
        "merged {} players ({} orphans, {} replaced)",
        outcome.players.len(),
        outcome.orphans.len(),
        outcome.replaced.len()
    );

    outcome
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
