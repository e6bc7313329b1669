// Player profile view model for the detail screen.

use chrono::NaiveDate;

use crate::merge::{MergeOutcome, Player};
use crate::metrics::{AverageRank, CountingStat, GameStatSummary};
use crate::records::{Measurement, MeasurementField, PlayerId};
use crate::roster::MISSING_CELL;

pub const PLAYER_NOT_FOUND: &str = "Player not found.";
pub const NO_GAME_LOGS: &str = "No game logs recorded.";
pub const NO_PHOTO: &str = "No photo available";

/// Measurements left off the profile.
pub const HIDDEN_MEASUREMENTS: [MeasurementField; 5] = [
    MeasurementField::NoStepVertical,
    MeasurementField::BodyFat,
    MeasurementField::HandWidth,
    MeasurementField::ShuttleLeft,
    MeasurementField::ShuttleRight,
];

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFact {
    pub label: &'static str,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub label: &'static str,
    pub total: u64,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    pub player_id: PlayerId,
    pub name: String,
    pub current_team: Option<String>,
    pub league: Option<String>,
    pub photo_url: Option<String>,
    pub avg_rank: AverageRank,
    pub facts: Vec<ProfileFact>,
    pub stats: GameStatSummary,
    pub stat_rows: Vec<StatRow>,
    /// `None` when the player has no measurement record at all.
    pub measurements: Option<Vec<MeasurementRow>>,
    /// Every scout that ranked or listed this player, by name.
    pub scout_ranks: Vec<(String, Option<f64>)>,
}

impl PlayerProfile {
    pub fn from_player(player: &Player<'_>, today: NaiveDate) -> Self {
        let bio = player.bio;
        let stats = player.game_stats();
        let stat_rows = CountingStat::ALL
            .iter()
            .map(|stat| StatRow {
                label: stat.label(),
                total: stats.totals.get(*stat),
                average: stats.averages.get(*stat),
            })
            .collect();

        let born = bio.birth_date.map(|date| match bio.age_on(today) {
            Some(age) => format!("{} (age {age})", date.format("%b %-d, %Y")),
            None => date.format("%b %-d, %Y").to_string(),
        });
        let high_school = bio.high_school.as_ref().map(|school| {
            match &bio.high_school_state {
                Some(state) => format!("{school} ({state})"),
                None => school.clone(),
            }
        });
        let facts = vec![
            ProfileFact { label: "Born", value: born },
            ProfileFact { label: "Hometown", value: bio.hometown() },
            ProfileFact { label: "Nationality", value: bio.nationality.clone() },
            ProfileFact { label: "High School", value: high_school },
            ProfileFact { label: "Height", value: bio.height.map(format_height) },
            ProfileFact { label: "Weight", value: bio.weight.map(|w| format!("{w:.0} lbs")) },
        ];

        let scout_ranks = player
            .scout_ranking
            .map(|ranking| {
                ranking
                    .ranks
                    .iter()
                    .map(|(scout, rank)| (scout.clone(), *rank))
                    .collect()
            })
            .unwrap_or_default();

        PlayerProfile {
            player_id: player.id,
            name: bio.name.clone(),
            current_team: bio.current_team.clone(),
            league: bio.league.clone(),
            photo_url: bio.photo_url.clone(),
            avg_rank: player.average_rank(),
            facts,
            stats,
            stat_rows,
            measurements: player.measurement.map(measurement_rows),
            scout_ranks,
        }
    }

    /// "Avg. Scout Rank: 4.5", or "??" when no scout ranked the player.
    pub fn avg_rank_line(&self) -> String {
        format!("Avg. Scout Rank: {}", self.avg_rank)
    }

    /// "Duke - NCAA" with whichever parts are known.
    pub fn team_line(&self) -> Option<String> {
        match (&self.current_team, &self.league) {
            (Some(team), Some(league)) => Some(format!("{team} - {league}")),
            (Some(only), None) | (None, Some(only)) => Some(only.clone()),
            (None, None) => None,
        }
    }

    pub fn photo_label(&self) -> &str {
        self.photo_url.as_deref().unwrap_or(NO_PHOTO)
    }

    pub fn has_game_logs(&self) -> bool {
        self.stats.games > 0
    }

    /// Games, minutes, and shooting lines under the stat table.
    pub fn summary_lines(&self) -> Vec<(&'static str, String)> {
        let shooting = &self.stats.shooting;
        vec![
            ("Games", self.stats.games.to_string()),
            ("MPG", format_optional(self.stats.minutes_per_game, |m| format!("{m:.1}"))),
            ("FG%", format_optional(shooting.fg_pct(), format_pct)),
            ("3P%", format_optional(shooting.tp_pct(), format_pct)),
            ("FT%", format_optional(shooting.ft_pct(), format_pct)),
        ]
    }
}

/// Look up a player and build their profile, or `None` for an unknown id.
pub fn build_profile(
    outcome: &MergeOutcome<'_>,
    id: PlayerId,
    today: NaiveDate,
) -> Option<PlayerProfile> {
    outcome
        .get(id)
        .map(|player| PlayerProfile::from_player(player, today))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn measurement_rows(measurement: &Measurement) -> Vec<MeasurementRow> {
    MeasurementField::ALL
        .iter()
        .filter(|field| !HIDDEN_MEASUREMENTS.contains(*field))
        .map(|field| MeasurementRow {
            label: field_label(field.key()),
            value: measurement.get(*field),
        })
        .collect()
}

/// "heightNoShoes" -> "Height No Shoes".
pub fn field_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            label.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            label.push(' ');
            label.push(ch);
        } else {
            label.push(ch);
        }
    }
    label
}

/// 80.5 -> 6' 8.5"
pub fn format_height(inches: f64) -> String {
    let feet = (inches / 12.0).floor();
    let rest = inches - feet * 12.0;
    if rest.fract() == 0.0 {
        format!("{feet:.0}' {rest:.0}\"")
    } else {
        format!("{feet:.0}' {rest:.1}\"")
    }
}

fn format_pct(pct: f64) -> String {
    format!("{pct:.1}%")
}

fn format_optional(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| MISSING_CELL.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
