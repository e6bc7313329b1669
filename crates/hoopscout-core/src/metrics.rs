// Derived metrics: average scout rank and game-log aggregates.
//
// Both calculators are total: an empty input yields the unknown sentinel or
// zeros, never NaN.

use std::cmp::Ordering;
use std::fmt;

use crate::records::{GameLog, ScoutRanking, PLAYER_ID_KEY};

/// Text shown for a rank that cannot be computed.
pub const UNKNOWN_RANK_LABEL: &str = "??";

/// Round to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Average scout rank
// ---------------------------------------------------------------------------

/// Mean of a player's scout ranks, or `Unknown` when no scout ranked them.
///
/// Ordering puts every `Ranked` value before `Unknown`, so an ascending sort
/// never interleaves the sentinel with real ranks.
#[derive(Debug, Clone, Copy)]
pub enum AverageRank {
    Ranked(f64),
    Unknown,
}

impl AverageRank {
    pub fn value(&self) -> Option<f64> {
        match self {
            AverageRank::Ranked(v) => Some(*v),
            AverageRank::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, AverageRank::Unknown)
    }
}

impl PartialEq for AverageRank {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AverageRank {}

impl PartialOrd for AverageRank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AverageRank {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (AverageRank::Ranked(a), AverageRank::Ranked(b)) => a.total_cmp(b),
            (AverageRank::Ranked(_), AverageRank::Unknown) => Ordering::Less,
            (AverageRank::Unknown, AverageRank::Ranked(_)) => Ordering::Greater,
            (AverageRank::Unknown, AverageRank::Unknown) => Ordering::Equal,
        }
    }
}

impl fmt::Display for AverageRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AverageRank::Ranked(v) => write!(f, "{v:.1}"),
            AverageRank::Unknown => f.write_str(UNKNOWN_RANK_LABEL),
        }
    }
}

/// Average every numeric rank present, whatever the scout names are.
///
/// The mean is rounded to one decimal. For whole-number ranks the result stays
/// within the lowest and highest rank; fractional ranks can round outside that
/// range (two ranks of 1.04 average to 1.0).
pub fn average_scout_rank(ranking: Option<&ScoutRanking>) -> AverageRank {
    let Some(ranking) = ranking else {
        return AverageRank::Unknown;
    };
    let values: Vec<f64> = ranking
        .ranks
        .iter()
        .filter(|(scout, _)| scout.as_str() != PLAYER_ID_KEY)
        .filter_map(|(_, rank)| *rank)
        .filter(|rank| rank.is_finite())
        .collect();
    if values.is_empty() {
        return AverageRank::Unknown;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    AverageRank::Ranked(round_to_tenth(mean))
}

// ---------------------------------------------------------------------------
// Game-log aggregates
// ---------------------------------------------------------------------------

/// The six counting stats tracked per game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CountingStat {
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
}

impl CountingStat {
    pub const ALL: [CountingStat; 6] = [
        CountingStat::Points,
        CountingStat::Rebounds,
        CountingStat::Assists,
        CountingStat::Steals,
        CountingStat::Blocks,
        CountingStat::Turnovers,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CountingStat::Points => "PTS",
            CountingStat::Rebounds => "REB",
            CountingStat::Assists => "AST",
            CountingStat::Steals => "STL",
            CountingStat::Blocks => "BLK",
            CountingStat::Turnovers => "TOV",
        }
    }

    /// Value in one game. Missing steals, blocks, and turnovers count as 0.
    fn from_log(&self, log: &GameLog) -> u32 {
        match self {
            CountingStat::Points => log.pts,
            CountingStat::Rebounds => log.reb,
            CountingStat::Assists => log.ast,
            CountingStat::Steals => log.stl.unwrap_or(0),
            CountingStat::Blocks => log.blk.unwrap_or(0),
            CountingStat::Turnovers => log.tov.unwrap_or(0),
        }
    }
}

/// Summed counting stats, widened to `u64` and saturating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatTotals {
    pub pts: u64,
    pub reb: u64,
    pub ast: u64,
    pub stl: u64,
    pub blk: u64,
    pub tov: u64,
}

impl StatTotals {
    pub fn get(&self, stat: CountingStat) -> u64 {
        match stat {
            CountingStat::Points => self.pts,
            CountingStat::Rebounds => self.reb,
            CountingStat::Assists => self.ast,
            CountingStat::Steals => self.stl,
            CountingStat::Blocks => self.blk,
            CountingStat::Turnovers => self.tov,
        }
    }

    fn add(&mut self, log: &GameLog) {
        let value = |stat: CountingStat| u64::from(stat.from_log(log));
        self.pts = self.pts.saturating_add(value(CountingStat::Points));
        self.reb = self.reb.saturating_add(value(CountingStat::Rebounds));
        self.ast = self.ast.saturating_add(value(CountingStat::Assists));
        self.stl = self.stl.saturating_add(value(CountingStat::Steals));
        self.blk = self.blk.saturating_add(value(CountingStat::Blocks));
        self.tov = self.tov.saturating_add(value(CountingStat::Turnovers));
    }
}

/// Per-game averages, rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatAverages {
    pub pts: f64,
    pub reb: f64,
    pub ast: f64,
    pub stl: f64,
    pub blk: f64,
    pub tov: f64,
}

impl StatAverages {
    pub fn get(&self, stat: CountingStat) -> f64 {
        match stat {
            CountingStat::Points => self.pts,
            CountingStat::Rebounds => self.reb,
            CountingStat::Assists => self.ast,
            CountingStat::Steals => self.stl,
            CountingStat::Blocks => self.blk,
            CountingStat::Turnovers => self.tov,
        }
    }

    fn from_totals(totals: &StatTotals, games: usize) -> Self {
        if games == 0 {
            return StatAverages::default();
        }
        let per_game = |total: u64| round_to_tenth(total as f64 / games as f64);
        StatAverages {
            pts: per_game(totals.pts),
            reb: per_game(totals.reb),
            ast: per_game(totals.ast),
            stl: per_game(totals.stl),
            blk: per_game(totals.blk),
            tov: per_game(totals.tov),
        }
    }
}

/// Summed makes and attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShootingSplits {
    pub fgm: u64,
    pub fga: u64,
    pub tpm: u64,
    pub tpa: u64,
    pub ftm: u64,
    pub fta: u64,
}

/// Percentage rounded to one decimal; `None` with zero attempts.
fn percentage(made: u64, attempts: u64) -> Option<f64> {
    if attempts == 0 {
        return None;
    }
    Some(round_to_tenth(made as f64 * 100.0 / attempts as f64))
}

impl ShootingSplits {
    pub fn fg_pct(&self) -> Option<f64> {
        percentage(self.fgm, self.fga)
    }

    pub fn tp_pct(&self) -> Option<f64> {
        percentage(self.tpm, self.tpa)
    }

    pub fn ft_pct(&self) -> Option<f64> {
        percentage(self.ftm, self.fta)
    }

    fn add(&mut self, log: &GameLog) {
        self.fgm = self.fgm.saturating_add(u64::from(log.fgm));
        self.fga = self.fga.saturating_add(u64::from(log.fga));
        self.tpm = self.tpm.saturating_add(u64::from(log.tpm));
        self.tpa = self.tpa.saturating_add(u64::from(log.tpa));
        self.ftm = self.ftm.saturating_add(u64::from(log.ftm));
        self.fta = self.fta.saturating_add(u64::from(log.fta));
    }
}

/// Totals and per-game averages over a player's game logs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GameStatSummary {
    pub games: usize,
    pub totals: StatTotals,
    pub averages: StatAverages,
    pub shooting: ShootingSplits,
    /// Mean over games that recorded minutes.
    pub minutes_per_game: Option<f64>,
}

/// Sum the tracked stats across `logs` and divide by the log count.
/// With no logs every total and average is zero.
pub fn aggregate_game_stats<'a, I>(logs: I) -> GameStatSummary
where
    I: IntoIterator<Item = &'a GameLog>,
{
    let mut games = 0usize;
    let mut totals = StatTotals::default();
    let mut shooting = ShootingSplits::default();
    let mut minutes_total = 0.0;
    let mut minutes_games = 0usize;

    for log in logs {
        games += 1;
        totals.add(log);
        shooting.add(log);
        if let Some(minutes) = log.minutes {
            minutes_total += minutes;
            minutes_games += 1;
        }
    }

    let minutes_per_game =
        (minutes_games > 0).then(|| round_to_tenth(minutes_total / minutes_games as f64));

    GameStatSummary {
        games,
        averages: StatAverages::from_totals(&totals, games),
        totals,
        shooting,
        minutes_per_game,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::PlayerId;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn totals_past_u32_range_do_not_wrap() {
        let mut big = boxscore(u32::MAX, u32::MAX, 0, Some(u32::MAX), None, None);
        big.fgm = u32::MAX;
        big.fga = u32::MAX;
        let small = boxscore(1, 2, 3, Some(1), None, None);
        let summary = aggregate_game_stats([&big, &small]);
        assert_eq!(summary.games, 2);
        assert_eq!(summary.totals.pts, u64::from(u32::MAX) + 1);
        assert_eq!(summary.totals.reb, u64::from(u32::MAX) + 2);
        assert_eq!(summary.totals.stl, u64::from(u32::MAX) + 1);
        assert_eq!(summary.totals.ast, 3);
        assert_eq!(summary.shooting.fga, u64::from(u32::MAX));
        assert_eq!(summary.shooting.fg_pct(), Some(100.0));
        assert!(approx_eq(
            summary.averages.pts,
            round_to_tenth((u64::from(u32::MAX) + 1) as f64 / 2.0)
        ));
    }

    fn boxscore(pts: u32, reb: u32, ast: u32, stl: Option<u32>, blk: Option<u32>, tov: Option<u32>) -> GameLog {
        GameLog {
            player_id: PlayerId(2),
            pts,
            reb,
            ast,
            stl,
            blk,
            tov,
            ..GameLog::default()
        }
    }

    // ---- average_scout_rank ----

    #[test]
    fn whole_ranks_average_within_bounds() {
        let ranking = ScoutRanking::new(PlayerId(1))
            .with_rank("A", Some(3.0))
            .with_rank("B", Some(4.0))
            .with_rank("C", Some(4.0));
        let avg = average_scout_rank(Some(&ranking)).value().unwrap();
        assert!((3.0..=4.0).contains(&avg));
        assert!(approx_eq(avg, 3.7));
    }

    #[test]
    fn fractional_ranks_may_round_below_min() {
        let ranking = ScoutRanking::new(PlayerId(1))
            .with_rank("A", Some(1.04))
            .with_rank("B", Some(1.04));
        assert_eq!(average_scout_rank(Some(&ranking)), AverageRank::Ranked(1.0));
    }

    #[test]
    fn two_scouts_average() {
        let ranking = ScoutRanking::new(PlayerId(1))
            .with_rank("Scout X", Some(10.0))
            .with_rank("Scout Y", Some(20.0));
        let avg = average_scout_rank(Some(&ranking));
        assert_eq!(avg, AverageRank::Ranked(15.0));
        assert_eq!(avg.to_string(), "15.0");
    }

    #[test]
    fn absent_ranking_is_unknown() {
        let avg = average_scout_rank(None);
        assert!(avg.is_unknown());
        assert_eq!(avg.to_string(), "??");
        assert_eq!(avg.value(), None);
    }

    #[test]
    fn all_null_ranks_are_unknown() {
        let ranking = ScoutRanking::new(PlayerId(1))
            .with_rank("Scout X", None)
            .with_rank("Scout Y", None);
        assert_eq!(average_scout_rank(Some(&ranking)), AverageRank::Unknown);
        assert_eq!(
            average_scout_rank(Some(&ScoutRanking::new(PlayerId(1)))),
            AverageRank::Unknown
        );
    }

    #[test]
    fn null_ranks_excluded_from_mean() {
        let ranking = ScoutRanking::new(PlayerId(1))
            .with_rank("Scout X", Some(3.0))
            .with_rank("Scout Y", None)
            .with_rank("Scout Z", Some(6.0));
        assert_eq!(average_scout_rank(Some(&ranking)), AverageRank::Ranked(4.5));
    }

    #[test]
    fn mean_rounded_to_one_decimal() {
        let ranking = ScoutRanking::new(PlayerId(1))
            .with_rank("A", Some(1.0))
            .with_rank("B", Some(2.0))
            .with_rank("C", Some(2.0));
        // 5 / 3 = 1.666...
        assert_eq!(average_scout_rank(Some(&ranking)), AverageRank::Ranked(1.7));
    }

    #[test]
    fn new_scout_names_are_picked_up() {
        let ranking = ScoutRanking::new(PlayerId(1))
            .with_rank("ESPN Rank", Some(4.0))
            .with_rank("Some Scout Added Next Year", Some(8.0));
        assert_eq!(average_scout_rank(Some(&ranking)), AverageRank::Ranked(6.0));
    }

    #[test]
    fn average_within_min_max() {
        let rank_sets: [&[f64]; 5] = [
            &[1.0],
            &[1.0, 50.0],
            &[7.0, 7.0, 7.0],
            &[3.0, 9.0, 14.0, 2.0],
            &[60.0, 1.0, 33.0, 12.0, 5.0],
        ];
        for ranks in rank_sets {
            let mut ranking = ScoutRanking::new(PlayerId(1));
            for (i, r) in ranks.iter().enumerate() {
                ranking = ranking.with_rank(&format!("Scout {i}"), Some(*r));
            }
            let avg = average_scout_rank(Some(&ranking)).value().unwrap();
            let min = ranks.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = ranks.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            assert!(avg >= min && avg <= max, "{avg} outside [{min}, {max}]");
        }
    }

    #[test]
    fn unknown_sorts_after_every_rank() {
        let mut ranks = vec![
            AverageRank::Unknown,
            AverageRank::Ranked(40.0),
            AverageRank::Unknown,
            AverageRank::Ranked(0.5),
            AverageRank::Ranked(12.3),
        ];
        ranks.sort();
        assert_eq!(
            ranks,
            vec![
                AverageRank::Ranked(0.5),
                AverageRank::Ranked(12.3),
                AverageRank::Ranked(40.0),
                AverageRank::Unknown,
                AverageRank::Unknown,
            ]
        );
        assert!(AverageRank::Ranked(f64::MAX) < AverageRank::Unknown);
    }

    // ---- aggregate_game_stats ----

    #[test]
    fn two_game_totals_and_averages() {
        let logs = vec![
            boxscore(10, 5, 2, Some(1), Some(0), Some(3)),
            boxscore(20, 7, 4, Some(0), Some(1), Some(1)),
        ];
        let summary = aggregate_game_stats(&logs);
        assert_eq!(summary.games, 2);
        assert_eq!(
            summary.totals,
            StatTotals {
                pts: 30,
                reb: 12,
                ast: 6,
                stl: 1,
                blk: 1,
                tov: 4,
            }
        );
        assert_eq!(
            summary.averages,
            StatAverages {
                pts: 15.0,
                reb: 6.0,
                ast: 3.0,
                stl: 0.5,
                blk: 0.5,
                tov: 2.0,
            }
        );
    }

    #[test]
    fn no_logs_gives_zero_averages() {
        let summary = aggregate_game_stats(std::iter::empty());
        assert_eq!(summary.games, 0);
        assert_eq!(summary.totals, StatTotals::default());
        for stat in CountingStat::ALL {
            let avg = summary.averages.get(stat);
            assert_eq!(avg, 0.0);
            assert!(!avg.is_nan());
        }
        assert!(summary.minutes_per_game.is_none());
        assert!(summary.shooting.fg_pct().is_none());
    }

    #[test]
    fn missing_defensive_stats_count_as_zero() {
        let logs = vec![
            boxscore(12, 4, 3, None, None, None),
            boxscore(8, 6, 1, Some(2), Some(2), Some(2)),
        ];
        let summary = aggregate_game_stats(&logs);
        assert_eq!(summary.totals.stl, 2);
        assert_eq!(summary.totals.blk, 2);
        assert_eq!(summary.totals.tov, 2);
        assert!(approx_eq(summary.averages.stl, 1.0));
    }

    #[test]
    fn totals_equal_elementwise_sum() {
        let logs: Vec<GameLog> = (0..7)
            .map(|i| boxscore(i * 3, i, i % 4, Some(i % 2), None, Some(i)))
            .collect();
        let summary = aggregate_game_stats(&logs);
        for stat in CountingStat::ALL {
            let expected: u64 = logs.iter().map(|l| u64::from(stat.from_log(l))).sum();
            assert_eq!(summary.totals.get(stat), expected, "{}", stat.label());
            let avg = round_to_tenth(expected as f64 / logs.len() as f64);
            assert!(approx_eq(summary.averages.get(stat), avg), "{}", stat.label());
        }
    }

    #[test]
    fn averages_rounded_to_tenth() {
        let logs = vec![
            boxscore(10, 1, 0, None, None, None),
            boxscore(10, 1, 0, None, None, None),
            boxscore(11, 0, 0, None, None, None),
        ];
        let summary = aggregate_game_stats(&logs);
        // 31 / 3 = 10.333..., 2 / 3 = 0.666...
        assert!(approx_eq(summary.averages.pts, 10.3));
        assert!(approx_eq(summary.averages.reb, 0.7));
    }

    #[test]
    fn shooting_and_minutes() {
        let mut a = boxscore(20, 5, 2, None, None, None);
        a.fgm = 8;
        a.fga = 15;
        a.tpm = 2;
        a.tpa = 6;
        a.ftm = 2;
        a.fta = 2;
        a.minutes = Some(30.0);
        let mut b = boxscore(14, 3, 3, None, None, None);
        b.fgm = 5;
        b.fga = 10;
        b.tpa = 4;
        b.ftm = 4;
        b.fta = 6;
        b.minutes = None;

        let summary = aggregate_game_stats([&a, &b]);
        assert_eq!(summary.shooting.fgm, 13);
        assert_eq!(summary.shooting.fga, 25);
        assert_eq!(summary.shooting.fg_pct(), Some(52.0));
        assert_eq!(summary.shooting.tp_pct(), Some(20.0));
        assert_eq!(summary.shooting.ft_pct(), Some(75.0));
        // only one game recorded minutes
        assert_eq!(summary.minutes_per_game, Some(30.0));
    }

    #[test]
    fn counting_stat_labels() {
        let labels: Vec<&str> = CountingStat::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["PTS", "REB", "AST", "STL", "BLK", "TOV"]);
    }
}
