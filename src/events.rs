//! Schedule export.
//!
//! Flattens a weekly schedule into the records downstream simulation and
//! presentation layers consume.

use serde::{Deserialize, Serialize};

use crate::models::{Matchup, Season, TeamId, WeeklySchedule};

/// One scheduled game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRecord {
    /// Hosting team.
    pub home_team_id: TeamId,
    /// Visiting team.
    pub away_team_id: TeamId,
    /// Week (`1..=18`).
    pub week: u8,
    /// Both teams share a division.
    pub is_divisional: bool,
    /// Both teams share a conference.
    pub is_conference: bool,
    /// Season year.
    pub season: Season,
}

impl GameRecord {
    /// Record of a placed matchup.
    pub fn from_matchup(matchup: &Matchup, season: Season) -> Self {
        Self {
            home_team_id: matchup.home_team_id,
            away_team_id: matchup.away_team_id,
            week: matchup.week,
            is_divisional: matchup.is_divisional,
            is_conference: matchup.is_conference,
            season,
        }
    }
}

/// Every game of `schedule`, ordered by week, then home team, then away team.
pub fn to_game_records(schedule: &WeeklySchedule, season: Season) -> Vec<GameRecord> {
    let mut records: Vec<GameRecord> = schedule
        .iter()
        .flat_map(|(week, games)| {
            games.iter().map(move |m| GameRecord {
                week,
                ..GameRecord::from_matchup(m, season)
            })
        })
        .collect();
    records.sort_by_key(|r| (r.week, r.home_team_id, r.away_team_id));
    records
}
