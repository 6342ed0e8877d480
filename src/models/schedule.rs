//! Weekly schedule (solution) model.
//!
//! A weekly schedule maps each week to the games played in it. A finished
//! schedule holds every matchup exactly once, no team appears twice in a
//! week, and each week holds `(32 - byes) / 2` games.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Matchup, TeamId, WEEKS};

/// Week → games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    weeks: BTreeMap<u8, Vec<Matchup>>,
}

impl WeeklySchedule {
    /// Creates a schedule with every week present and empty.
    pub fn new() -> Self {
        Self {
            weeks: (1..=WEEKS).map(|w| (w, Vec::new())).collect(),
        }
    }

    /// Groups assigned matchups by week. Unassigned matchups are skipped.
    ///
    /// Games within a week are ordered by home team id.
    pub fn from_matchups(matchups: &[Matchup]) -> Self {
        let mut schedule = Self::new();
        for m in matchups.iter().filter(|m| m.is_assigned()) {
            schedule.weeks.entry(m.week).or_default().push(m.clone());
        }
        for games in schedule.weeks.values_mut() {
            games.sort_by_key(|m| (m.home_team_id, m.away_team_id));
        }
        schedule
    }

    /// Games in `week` (empty if the week is unknown).
    pub fn games_in_week(&self, week: u8) -> &[Matchup] {
        self.weeks.get(&week).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(week, games)` in week order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[Matchup])> {
        self.weeks.iter().map(|(&w, g)| (w, g.as_slice()))
    }

    /// All games in week order.
    pub fn games(&self) -> impl Iterator<Item = &Matchup> {
        self.weeks.values().flatten()
    }

    /// Total number of games.
    pub fn total_games(&self) -> usize {
        self.weeks.values().map(Vec::len).sum()
    }

    /// A team's games in week order.
    pub fn games_for_team(&self, team: TeamId) -> Vec<&Matchup> {
        self.games().filter(|m| m.involves(team)).collect()
    }

    /// The week a team plays no game in, among `1..=WEEKS`.
    pub fn idle_weeks(&self, team: TeamId) -> Vec<u8> {
        self.weeks
            .iter()
            .filter(|(_, games)| !games.iter().any(|m| m.involves(team)))
            .map(|(&w, _)| w)
            .collect()
    }

    /// Home games hosted by `team`.
    pub fn home_count(&self, team: TeamId) -> usize {
        self.games().filter(|m| m.home_team_id == team).count()
    }

    /// Road games played by `team`.
    pub fn away_count(&self, team: TeamId) -> usize {
        self.games().filter(|m| m.away_team_id == team).count()
    }

    /// Number of weeks (always 18 for a schedule built by this crate).
    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchupKind;

    fn placed(home: TeamId, away: TeamId, week: u8) -> Matchup {
        let mut m = Matchup::new(home, away, MatchupKind::Division);
        m.week = week;
        m
    }

    fn sample_schedule() -> WeeklySchedule {
        WeeklySchedule::from_matchups(&[
            placed(3, 4, 1),
            placed(1, 2, 1),
            placed(2, 1, 2),
            placed(4, 3, 2),
            Matchup::new(1, 3, MatchupKind::Division),
        ])
    }

    #[test]
    fn test_from_matchups_groups_by_week() {
        let s = sample_schedule();
        assert_eq!(s.week_count(), 18);
        assert_eq!(s.total_games(), 4);
        let week1 = s.games_in_week(1);
        assert_eq!(week1.len(), 2);
        // Sorted by home team
        assert_eq!(week1[0].home_team_id, 1);
        assert_eq!(week1[1].home_team_id, 3);
        assert!(s.games_in_week(3).is_empty());
        assert!(s.games_in_week(40).is_empty());
    }

    #[test]
    fn test_team_queries() {
        let s = sample_schedule();
        assert_eq!(s.games_for_team(1).len(), 2);
        assert_eq!(s.home_count(1), 1);
        assert_eq!(s.away_count(1), 1);
        assert_eq!(s.idle_weeks(1).len(), 16);
        assert!(!s.idle_weeks(1).contains(&1));
    }

    #[test]
    fn test_empty_schedule() {
        let s = WeeklySchedule::new();
        assert_eq!(s.total_games(), 0);
        assert_eq!(s.iter().count(), 18);
    }
}
