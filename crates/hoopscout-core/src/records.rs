// Record store: the four flat record sets and their JSON loader.
//
// The dataset is a static snapshot holding `bio`, `measurements`,
// `scoutRankings`, and `game_logs` collections. Records are decoded one at a
// time so a malformed entry is skipped rather than failing the whole load.
// Every spelling of "missing" (null, absent key, blank string, non-numeric
// rank) is normalized to `None` here; nothing downstream re-checks it.

use chrono::{Datelike, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Source key for the identifier; never a scout name.
pub const PLAYER_ID_KEY: &str = "playerId";

/// Stable key joining bio, measurement, ranking, and game-log records.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity and static attributes for a prospect. Exactly one per player.
#[derive(Debug, Clone, PartialEq)]
pub struct Bio {
    pub player_id: PlayerId,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    /// Inches.
    pub height: Option<f64>,
    /// Pounds.
    pub weight: Option<f64>,
    pub high_school: Option<String>,
    pub high_school_state: Option<String>,
    pub home_town: Option<String>,
    pub home_state: Option<String>,
    pub home_country: Option<String>,
    pub nationality: Option<String>,
    pub photo_url: Option<String>,
    pub current_team: Option<String>,
    pub league: Option<String>,
    pub league_type: Option<String>,
}

impl Bio {
    /// A bio carrying only an id and a full name; first/last are split from
    /// the name and every other attribute is missing.
    pub fn named(player_id: PlayerId, name: &str) -> Self {
        let (first_name, last_name) = split_full_name(name.trim());
        Bio {
            player_id,
            name: name.trim().to_string(),
            first_name,
            last_name,
            birth_date: None,
            height: None,
            weight: None,
            high_school: None,
            high_school_state: None,
            home_town: None,
            home_state: None,
            home_country: None,
            nationality: None,
            photo_url: None,
            current_team: None,
            league: None,
            league_type: None,
        }
    }

    /// Age in whole years on the given date, if the birth date is known and
    /// not after `on`.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        let mut age = on.year() - birth.year();
        if (on.month(), on.day()) < (birth.month(), birth.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }

    /// "Town, State, Country" with missing parts left out.
    pub fn hometown(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.home_town, &self.home_state, &self.home_country]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Combine measurements. Any metric may be unrecorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurement {
    pub player_id: PlayerId,
    pub height_no_shoes: Option<f64>,
    pub height_shoes: Option<f64>,
    pub wingspan: Option<f64>,
    pub reach: Option<f64>,
    pub max_vertical: Option<f64>,
    pub no_step_vertical: Option<f64>,
    pub weight: Option<f64>,
    pub body_fat: Option<f64>,
    pub hand_length: Option<f64>,
    pub hand_width: Option<f64>,
    /// Lane agility time.
    pub agility: Option<f64>,
    /// Three-quarter-court sprint.
    pub sprint: Option<f64>,
    pub shuttle_left: Option<f64>,
    pub shuttle_right: Option<f64>,
    pub shuttle_best: Option<f64>,
}

/// Names a single measurement column, in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeasurementField {
    HeightNoShoes,
    HeightShoes,
    Wingspan,
    Reach,
    MaxVertical,
    NoStepVertical,
    Weight,
    BodyFat,
    HandLength,
    HandWidth,
    Agility,
    Sprint,
    ShuttleLeft,
    ShuttleRight,
    ShuttleBest,
}

impl MeasurementField {
    pub const ALL: [MeasurementField; 15] = [
        MeasurementField::HeightNoShoes,
        MeasurementField::HeightShoes,
        MeasurementField::Wingspan,
        MeasurementField::Reach,
        MeasurementField::MaxVertical,
        MeasurementField::NoStepVertical,
        MeasurementField::Weight,
        MeasurementField::BodyFat,
        MeasurementField::HandLength,
        MeasurementField::HandWidth,
        MeasurementField::Agility,
        MeasurementField::Sprint,
        MeasurementField::ShuttleLeft,
        MeasurementField::ShuttleRight,
        MeasurementField::ShuttleBest,
    ];

    /// The camelCase key used by the source dataset.
    pub fn key(&self) -> &'static str {
        match self {
            MeasurementField::HeightNoShoes => "heightNoShoes",
            MeasurementField::HeightShoes => "heightShoes",
            MeasurementField::Wingspan => "wingspan",
            MeasurementField::Reach => "reach",
            MeasurementField::MaxVertical => "maxVertical",
            MeasurementField::NoStepVertical => "noStepVertical",
            MeasurementField::Weight => "weight",
            MeasurementField::BodyFat => "bodyFat",
            MeasurementField::HandLength => "handLength",
            MeasurementField::HandWidth => "handWidth",
            MeasurementField::Agility => "agility",
            MeasurementField::Sprint => "sprint",
            MeasurementField::ShuttleLeft => "shuttleLeft",
            MeasurementField::ShuttleRight => "shuttleRight",
            MeasurementField::ShuttleBest => "shuttleBest",
        }
    }
}

impl Measurement {
    pub fn get(&self, field: MeasurementField) -> Option<f64> {
        match field {
            MeasurementField::HeightNoShoes => self.height_no_shoes,
            MeasurementField::HeightShoes => self.height_shoes,
            MeasurementField::Wingspan => self.wingspan,
            MeasurementField::Reach => self.reach,
            MeasurementField::MaxVertical => self.max_vertical,
            MeasurementField::NoStepVertical => self.no_step_vertical,
            MeasurementField::Weight => self.weight,
            MeasurementField::BodyFat => self.body_fat,
            MeasurementField::HandLength => self.hand_length,
            MeasurementField::HandWidth => self.hand_width,
            MeasurementField::Agility => self.agility,
            MeasurementField::Sprint => self.sprint,
            MeasurementField::ShuttleLeft => self.shuttle_left,
            MeasurementField::ShuttleRight => self.shuttle_right,
            MeasurementField::ShuttleBest => self.shuttle_best,
        }
    }

    fn sanitized(self) -> Self {
        Measurement {
            player_id: self.player_id,
            height_no_shoes: finite(self.height_no_shoes),
            height_shoes: finite(self.height_shoes),
            wingspan: finite(self.wingspan),
            reach: finite(self.reach),
            max_vertical: finite(self.max_vertical),
            no_step_vertical: finite(self.no_step_vertical),
            weight: finite(self.weight),
            body_fat: finite(self.body_fat),
            hand_length: finite(self.hand_length),
            hand_width: finite(self.hand_width),
            agility: finite(self.agility),
            sprint: finite(self.sprint),
            shuttle_left: finite(self.shuttle_left),
            shuttle_right: finite(self.shuttle_right),
            shuttle_best: finite(self.shuttle_best),
        }
    }
}

/// One player's ranks keyed by scout name. The scout names are whatever the
/// dataset carries; a key with a `None` rank means the scout column exists
/// but this player was not ranked in it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoutRanking {
    pub player_id: PlayerId,
    pub ranks: BTreeMap<String, Option<f64>>,
}

impl ScoutRanking {
    pub fn new(player_id: PlayerId) -> Self {
        ScoutRanking {
            player_id,
            ranks: BTreeMap::new(),
        }
    }

    /// Builder-style insert, mostly for fixtures.
    pub fn with_rank(mut self, scout: &str, rank: Option<f64>) -> Self {
        self.ranks.insert(scout.to_string(), finite(rank));
        self
    }

    pub fn rank(&self, scout: &str) -> Option<f64> {
        self.ranks.get(scout).copied().flatten()
    }

    pub fn scouts(&self) -> impl Iterator<Item = &str> {
        self.ranks.keys().map(String::as_str)
    }
}

/// One completed game's boxscore line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameLog {
    pub player_id: PlayerId,
    pub game_id: u64,
    pub season: Option<u32>,
    pub league: Option<String>,
    pub date: Option<String>,
    pub team: Option<String>,
    pub team_id: Option<u64>,
    pub opponent: Option<String>,
    pub opponent_id: Option<u64>,
    pub is_home: Option<bool>,
    pub home_team_pts: Option<u32>,
    pub visitor_team_pts: Option<u32>,
    /// Minutes played, fractional.
    pub minutes: Option<f64>,
    pub started: Option<bool>,
    pub time_played: Option<String>,
    pub fgm: u32,
    pub fga: u32,
    pub fg_pct: Option<f64>,
    pub tpm: u32,
    pub tpa: u32,
    pub tp_pct: Option<f64>,
    pub ftm: u32,
    pub fta: u32,
    pub ft_pct: Option<f64>,
    pub oreb: u32,
    pub dreb: u32,
    pub reb: u32,
    pub ast: u32,
    /// Not every league records steals, blocks, or turnovers.
    pub stl: Option<u32>,
    pub blk: Option<u32>,
    pub tov: Option<u32>,
    pub pf: Option<u32>,
    pub pts: u32,
    pub plus_minus: Option<f64>,
}

/// Per-collection decode counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// What the loader kept and dropped, per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub bio: CollectionReport,
    pub measurements: CollectionReport,
    pub scout_rankings: CollectionReport,
    pub game_logs: CollectionReport,
}

impl LoadReport {
    pub fn total_skipped(&self) -> usize {
        self.bio.skipped
            + self.measurements.skipped
            + self.scout_rankings.skipped
            + self.game_logs.skipped
    }
}

/// The immutable input to every merge, metric, and schema operation.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    bio: Vec<Bio>,
    measurements: Vec<Measurement>,
    scout_rankings: Vec<ScoutRanking>,
    game_logs: Vec<GameLog>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("dataset validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawDataset {
    bio: Option<Vec<Value>>,
    measurements: Option<Vec<Value>>,
    #[serde(rename = "scoutRankings")]
    scout_rankings: Option<Vec<Value>>,
    game_logs: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBio {
    player_id: u64,
    name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    birth_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    weight: Option<f64>,
    high_school: Option<String>,
    high_school_state: Option<String>,
    home_town: Option<String>,
    home_state: Option<String>,
    home_country: Option<String>,
    nationality: Option<String>,
    photo_url: Option<String>,
    current_team: Option<String>,
    league: Option<String>,
    league_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMeasurement {
    player_id: u64,
    #[serde(default, deserialize_with = "lenient_number")]
    height_no_shoes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    height_shoes: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    wingspan: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    reach: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    max_vertical: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    no_step_vertical: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    body_fat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    hand_length: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    hand_width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    agility: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    sprint: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    shuttle_left: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    shuttle_right: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    shuttle_best: Option<f64>,
}

/// Ranking row: the id plus an open set of scout-name keys.
#[derive(Debug, Deserialize)]
struct RawScoutRanking {
    #[serde(rename = "playerId")]
    player_id: u64,
    #[serde(flatten)]
    ranks: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGameLog {
    player_id: u64,
    game_id: u64,
    #[serde(default, deserialize_with = "lenient_number")]
    season: Option<f64>,
    league: Option<String>,
    date: Option<String>,
    team: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    team_id: Option<f64>,
    opponent: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    opponent_id: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    is_home: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    home_team_pts: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    visitor_team_pts: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    gp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    gs: Option<f64>,
    time_played: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    fgm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    fga: Option<f64>,
    #[serde(rename = "fg%")]
    #[serde(default, deserialize_with = "lenient_number")]
    fg_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    tpm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    tpa: Option<f64>,
    #[serde(rename = "tp%")]
    #[serde(default, deserialize_with = "lenient_number")]
    tp_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    ftm: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    fta: Option<f64>,
    #[serde(rename = "ft%")]
    #[serde(default, deserialize_with = "lenient_number")]
    ft_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    oreb: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    dreb: Option<f64>,
    reb: f64,
    ast: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    stl: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    blk: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    tov: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pf: Option<f64>,
    pts: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    plus_minus: Option<f64>,
}

// ---------------------------------------------------------------------------
// Normalization helpers
// ---------------------------------------------------------------------------

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Round a counting stat into `u32`. Negative or non-finite values become 0.
fn count(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

fn optional_count(value: Option<f64>) -> Option<u32> {
    finite(value).map(count)
}

/// Non-negative whole number, for ids and seasons.
fn whole(value: Option<f64>) -> Option<u64> {
    finite(value)
        .filter(|v| *v >= 0.0)
        .map(|v| v.round() as u64)
}

/// Optional numeric field. Only a finite JSON number is a value; null, blank
/// or other strings, and any other JSON type become `None` instead of
/// failing the whole record.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => finite(n.as_f64()),
        Some(other) => {
            debug!("non-numeric value {other} treated as missing");
            None
        }
        None => None,
    })
}

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_birth_date(player_id: u64, raw: Option<String>) -> Option<NaiveDate> {
    let raw = text(raw)?;
    let date_part = raw.get(..10).unwrap_or(raw.as_str());
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            warn!("player {player_id}: unparsable birth date '{raw}', treating as missing");
            None
        }
    }
}

fn split_full_name(name: &str) -> (String, String) {
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (name.to_string(), String::new()),
    }
}

/// Only JSON numbers count as ranks; anything else is an unranked cell.
fn rank_value(player_id: u64, scout: &str, value: Value) -> Option<f64> {
    match value {
        Value::Number(n) => finite(n.as_f64()),
        Value::Null => None,
        other => {
            debug!("player {player_id}: non-numeric rank {other} for '{scout}' ignored");
            None
        }
    }
}

fn normalize_bio(raw: RawBio) -> Option<Bio> {
    let first = text(raw.first_name);
    let last = text(raw.last_name);
    let name = text(raw.name).or_else(|| {
        let joined = [first.as_deref(), last.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");
        (!joined.is_empty()).then_some(joined)
    });
    let Some(name) = name else {
        warn!("skipping bio record for player {}: no name", raw.player_id);
        return None;
    };
    let (first_name, last_name) = match (first, last) {
        (Some(f), Some(l)) => (f, l),
        (f, l) => {
            let (split_first, split_last) = split_full_name(&name);
            (f.unwrap_or(split_first), l.unwrap_or(split_last))
        }
    };

    Some(Bio {
        player_id: PlayerId(raw.player_id),
        birth_date: parse_birth_date(raw.player_id, raw.birth_date),
        name,
        first_name,
        last_name,
        height: finite(raw.height),
        weight: finite(raw.weight),
        high_school: text(raw.high_school),
        high_school_state: text(raw.high_school_state),
        home_town: text(raw.home_town),
        home_state: text(raw.home_state),
        home_country: text(raw.home_country),
        nationality: text(raw.nationality),
        photo_url: text(raw.photo_url),
        current_team: text(raw.current_team),
        league: text(raw.league),
        league_type: text(raw.league_type),
    })
}

fn normalize_measurement(raw: RawMeasurement) -> Measurement {
    Measurement {
        player_id: PlayerId(raw.player_id),
        height_no_shoes: raw.height_no_shoes,
        height_shoes: raw.height_shoes,
        wingspan: raw.wingspan,
        reach: raw.reach,
        max_vertical: raw.max_vertical,
        no_step_vertical: raw.no_step_vertical,
        weight: raw.weight,
        body_fat: raw.body_fat,
        hand_length: raw.hand_length,
        hand_width: raw.hand_width,
        agility: raw.agility,
        sprint: raw.sprint,
        shuttle_left: raw.shuttle_left,
        shuttle_right: raw.shuttle_right,
        shuttle_best: raw.shuttle_best,
    }
}

fn normalize_scout_ranking(raw: RawScoutRanking) -> ScoutRanking {
    let player_id = raw.player_id;
    let ranks = raw
        .ranks
        .into_iter()
        .map(|(scout, value)| {
            let rank = rank_value(player_id, &scout, value);
            (scout, rank)
        })
        .collect();
    ScoutRanking {
        player_id: PlayerId(player_id),
        ranks,
    }
}

fn normalize_game_log(raw: RawGameLog) -> GameLog {
    GameLog {
        player_id: PlayerId(raw.player_id),
        game_id: raw.game_id,
        season: whole(raw.season).and_then(|v| u32::try_from(v).ok()),
        league: text(raw.league),
        date: text(raw.date),
        team: text(raw.team),
        team_id: whole(raw.team_id),
        opponent: text(raw.opponent),
        opponent_id: whole(raw.opponent_id),
        is_home: finite(raw.is_home).map(|v| v != 0.0),
        home_team_pts: optional_count(raw.home_team_pts),
        visitor_team_pts: optional_count(raw.visitor_team_pts),
        minutes: finite(raw.gp),
        started: finite(raw.gs).map(|v| v != 0.0),
        time_played: text(raw.time_played),
        fgm: optional_count(raw.fgm).unwrap_or(0),
        fga: optional_count(raw.fga).unwrap_or(0),
        fg_pct: finite(raw.fg_pct),
        tpm: optional_count(raw.tpm).unwrap_or(0),
        tpa: optional_count(raw.tpa).unwrap_or(0),
        tp_pct: finite(raw.tp_pct),
        ftm: optional_count(raw.ftm).unwrap_or(0),
        fta: optional_count(raw.fta).unwrap_or(0),
        ft_pct: finite(raw.ft_pct),
        oreb: optional_count(raw.oreb).unwrap_or(0),
        dreb: optional_count(raw.dreb).unwrap_or(0),
        reb: count(raw.reb),
        ast: count(raw.ast),
        stl: optional_count(raw.stl),
        blk: optional_count(raw.blk),
        tov: optional_count(raw.tov),
        pf: optional_count(raw.pf),
        pts: count(raw.pts),
        plus_minus: finite(raw.plus_minus),
    }
}

/// Decode each value of one collection, skipping (and counting) rows that do
/// not fit the raw shape or fail normalization.
fn decode_collection<R, T>(
    name: &'static str,
    values: Option<Vec<Value>>,
    normalize: impl Fn(R) -> Option<T>,
) -> (Vec<T>, CollectionReport)
where
    R: DeserializeOwned,
{
    let mut report = CollectionReport::default();
    let Some(values) = values else {
        warn!("dataset has no `{name}` collection, treating it as empty");
        return (Vec::new(), report);
    };

    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<R>(value) {
            Ok(raw) => match normalize(raw) {
                Some(record) => {
                    records.push(record);
                    report.loaded += 1;
                }
                None => report.skipped += 1,
            },
            Err(e) => {
                warn!("skipping malformed {name} record #{index}: {e}");
                report.skipped += 1;
            }
        }
    }
    (records, report)
}

// ---------------------------------------------------------------------------
// RecordStore
// ---------------------------------------------------------------------------

impl RecordStore {
    /// Assemble a store from already-normalized records.
    pub fn new(
        bio: Vec<Bio>,
        measurements: Vec<Measurement>,
        scout_rankings: Vec<ScoutRanking>,
        game_logs: Vec<GameLog>,
    ) -> Self {
        RecordStore {
            bio,
            measurements: measurements.into_iter().map(Measurement::sanitized).collect(),
            scout_rankings,
            game_logs,
        }
    }

    pub fn bio(&self) -> &[Bio] {
        &self.bio
    }

    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    pub fn scout_rankings(&self) -> &[ScoutRanking] {
        &self.scout_rankings
    }

    pub fn game_logs(&self) -> &[GameLog] {
        &self.game_logs
    }

    /// Parse a dataset document held in memory.
    pub fn from_json_str(text: &str) -> Result<(RecordStore, LoadReport), DatasetError> {
        let raw: RawDataset = serde_json::from_str(text).map_err(|e| DatasetError::Json {
            path: "<memory>".into(),
            source: e,
        })?;
        Self::from_raw(raw)
    }

    /// Parse a dataset document from any reader.
    pub fn from_reader<R: Read>(rdr: R) -> Result<(RecordStore, LoadReport), DatasetError> {
        let raw: RawDataset = serde_json::from_reader(rdr).map_err(|e| DatasetError::Json {
            path: "<reader>".into(),
            source: e,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawDataset) -> Result<(RecordStore, LoadReport), DatasetError> {
        let (bio, bio_report) = decode_collection("bio", raw.bio, normalize_bio);
        let (measurements, measurement_report) =
            decode_collection("measurements", raw.measurements, |m| {
                Some(normalize_measurement(m))
            });
        let (scout_rankings, ranking_report) =
            decode_collection("scoutRankings", raw.scout_rankings, |r| {
                Some(normalize_scout_ranking(r))
            });
        let (game_logs, log_report) =
            decode_collection("game_logs", raw.game_logs, |g| Some(normalize_game_log(g)));

        if bio.is_empty() {
            return Err(DatasetError::Validation(
                "dataset produced zero valid bio records".into(),
            ));
        }

        let report = LoadReport {
            bio: bio_report,
            measurements: measurement_report,
            scout_rankings: ranking_report,
            game_logs: log_report,
        };
        info!(
            "Loaded {} bio, {} measurement, {} ranking, {} game-log records ({} skipped)",
            bio.len(),
            measurements.len(),
            scout_rankings.len(),
            game_logs.len(),
            report.total_skipped()
        );

        Ok((
            RecordStore {
                bio,
                measurements,
                scout_rankings,
                game_logs,
            },
            report,
        ))
    }
}

/// Load a dataset file from disk.
pub fn load_dataset(path: &Path) -> Result<(RecordStore, LoadReport), DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let raw: RawDataset =
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(|e| DatasetError::Json {
            path: path.display().to_string(),
            source: e,
        })?;
    RecordStore::from_raw(raw)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
