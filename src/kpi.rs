//! Schedule quality metrics (KPIs).
//!
//! Computes per-team and league-wide indicators from a finished schedule
//! and its bye assignment.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Home / away | Games hosted and visited per team |
//! | Home stand | Longest run of consecutive home games (byes skipped) |
//! | Road trip | Longest run of consecutive away games (byes skipped) |
//! | Byes per week | Bye histogram over weeks 1..=18 |
//! | Games per week | Scheduled games per week |
//! | Balanced | Every team hosts 8 or 9 games |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::balance::MAX_SIDE_GAMES;
use crate::models::{ByeAssignment, TeamId, WeeklySchedule};

/// Indicators for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamKpi {
    /// Team id.
    pub team: TeamId,
    /// Games hosted.
    pub home: usize,
    /// Games visited.
    pub away: usize,
    /// Bye week, if assigned.
    pub bye_week: Option<u8>,
    /// Longest run of consecutive home games.
    pub longest_home_stand: usize,
    /// Longest run of consecutive away games.
    pub longest_road_trip: usize,
}

/// Schedule performance indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Per-team indicators, by team id.
    pub teams: Vec<TeamKpi>,
    /// Teams on bye per week.
    pub byes_per_week: BTreeMap<u8, usize>,
    /// Games per week.
    pub games_per_week: BTreeMap<u8, usize>,
    /// Longest home stand of any team.
    pub max_home_stand: usize,
    /// Longest road trip of any team.
    pub max_road_trip: usize,
    /// Whether every team hosts 8 or 9 games.
    pub balanced: bool,
}

impl ScheduleKpi {
    /// Computes KPIs from a schedule and its bye assignment.
    pub fn calculate(schedule: &WeeklySchedule, byes: &ByeAssignment) -> Self {
        let mut sides: BTreeMap<TeamId, Vec<bool>> = BTreeMap::new();
        for m in schedule.games() {
            sides.entry(m.home_team_id).or_default().push(true);
            sides.entry(m.away_team_id).or_default().push(false);
        }

        let teams: Vec<TeamKpi> = sides
            .iter()
            .map(|(&team, seq)| {
                let home = seq.iter().filter(|&&h| h).count();
                TeamKpi {
                    team,
                    home,
                    away: seq.len() - home,
                    bye_week: byes.week_of(team),
                    longest_home_stand: longest_run(seq, true),
                    longest_road_trip: longest_run(seq, false),
                }
            })
            .collect();

        let mut byes_per_week = BTreeMap::new();
        for (_, week) in byes.iter() {
            *byes_per_week.entry(week).or_insert(0) += 1;
        }
        let games_per_week = schedule.iter().map(|(w, g)| (w, g.len())).collect();

        let max_home_stand = teams.iter().map(|t| t.longest_home_stand).max().unwrap_or(0);
        let max_road_trip = teams.iter().map(|t| t.longest_road_trip).max().unwrap_or(0);
        let balanced = !teams.is_empty()
            && teams
                .iter()
                .all(|t| t.home <= MAX_SIDE_GAMES && t.away <= MAX_SIDE_GAMES);

        Self {
            teams,
            byes_per_week,
            games_per_week,
            max_home_stand,
            max_road_trip,
            balanced,
        }
    }

    /// Whether no team stays home or on the road longer than the limits.
    pub fn meets_thresholds(&self, max_home_stand: usize, max_road_trip: usize) -> bool {
        self.max_home_stand <= max_home_stand && self.max_road_trip <= max_road_trip
    }

    /// Indicators for one team.
    pub fn team(&self, team: TeamId) -> Option<&TeamKpi> {
        self.teams.iter().find(|t| t.team == team)
    }
}

fn longest_run(seq: &[bool], side: bool) -> usize {
    let mut best = 0;
    let mut run = 0;
    for &s in seq {
        if s == side {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Matchup, MatchupKind};

    fn placed(home: TeamId, away: TeamId, week: u8) -> Matchup {
        let mut m = Matchup::new(home, away, MatchupKind::Division);
        m.week = week;
        m
    }

    #[test]
    fn test_kpi_basic() {
        let schedule = WeeklySchedule::from_matchups(&[
            placed(1, 2, 1),
            placed(1, 3, 2),
            placed(1, 4, 4),
            placed(2, 1, 5),
        ]);
        let byes = ByeAssignment::from_pairs([(1, 3), (2, 2)]);
        let kpi = ScheduleKpi::calculate(&schedule, &byes);

        let t1 = kpi.team(1).unwrap();
        assert_eq!((t1.home, t1.away), (3, 1));
        // Weeks 1, 2, 4 at home; the week-3 bye does not break the stand.
        assert_eq!(t1.longest_home_stand, 3);
        assert_eq!(t1.longest_road_trip, 1);
        assert_eq!(t1.bye_week, Some(3));
        assert_eq!(kpi.team(3).unwrap().bye_week, None);

        assert_eq!(kpi.max_home_stand, 3);
        assert_eq!(kpi.games_per_week[&1], 1);
        assert_eq!(kpi.games_per_week[&3], 0);
        assert_eq!(kpi.byes_per_week[&2], 1);
        assert!(kpi.balanced);
    }

    #[test]
    fn test_kpi_imbalance() {
        let games: Vec<Matchup> = (0..10).map(|w| placed(1, 2 + w % 3, w + 1)).collect();
        let kpi = ScheduleKpi::calculate(&WeeklySchedule::from_matchups(&games), &ByeAssignment::new());
        assert!(!kpi.balanced);
        assert_eq!(kpi.max_home_stand, 10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&WeeklySchedule::new(), &ByeAssignment::new());
        assert!(kpi.teams.is_empty());
        assert_eq!(kpi.max_home_stand, 0);
        assert_eq!(kpi.games_per_week.len(), 18);
        assert!(!kpi.balanced);
    }

    #[test]
    fn test_meets_thresholds() {
        let schedule = WeeklySchedule::from_matchups(&[placed(1, 2, 1), placed(1, 2, 2)]);
        let kpi = ScheduleKpi::calculate(&schedule, &ByeAssignment::new());
        assert!(kpi.meets_thresholds(2, 2));
        assert!(!kpi.meets_thresholds(1, 2));
        assert!(!kpi.meets_thresholds(2, 1));
    }
}
