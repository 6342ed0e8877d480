//! Structural validation for league tables, bye assignments and schedules.
//!
//! Every validator collects all problems instead of stopping at the first,
//! and each can be re-run independently of generation (e.g. on records read
//! back from a store). Detects:
//! - Malformed division tables (count, order, duplicate or unknown teams)
//! - Bye assignments with missing teams, out-of-window weeks or overfull weeks
//! - Schedules with wrong game counts, double-booked teams, games during a
//!   bye, week sizes that do not match capacity, or home/away imbalance

use std::collections::{BTreeMap, BTreeSet};

use crate::config::SeasonConfig;
use crate::models::{
    ByeAssignment, Division, League, TeamId, WeeklySchedule, DIVISION_COUNT, GAMES_PER_TEAM,
    TEAM_COUNT, TOTAL_GAMES,
};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Division table has the wrong shape or order.
    MalformedDivision,
    /// A team id appears twice.
    DuplicateTeam,
    /// A team id is outside `1..=32` or not in the league.
    UnknownTeam,
    /// A team has no bye week.
    MissingBye,
    /// A bye falls outside the configured window.
    ByeOutOfWindow,
    /// More teams are on bye in a week than the hard cap allows.
    ByeCapExceeded,
    /// Total or per-team game count is wrong.
    WrongGameCount,
    /// A team plays twice in one week.
    DoubleBooked,
    /// A team plays during its bye week.
    PlaysDuringBye,
    /// A week's game count differs from `(32 - byes) / 2`.
    CapacityMismatch,
    /// A team hosts fewer than 8 or more than 9 games.
    HomeAwayImbalance,
}

impl ValidationErrorKind {
    /// Whether the error makes a schedule unusable.
    ///
    /// Home/away imbalance is a quality issue only.
    pub fn is_hard(self) -> bool {
        !matches!(self, Self::HomeAwayImbalance)
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a division table.
///
/// Checks:
/// 1. Exactly 8 divisions, with ids `1..=8` in order
/// 2. Every team id in `1..=32`
/// 3. No team listed twice
pub fn validate_league(divisions: &[Division]) -> ValidationResult {
    let mut errors = Vec::new();

    if divisions.len() != DIVISION_COUNT {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedDivision,
            format!("expected {DIVISION_COUNT} divisions, got {}", divisions.len()),
        ));
    }

    let mut seen = BTreeSet::new();
    for (i, division) in divisions.iter().enumerate() {
        if division.id.index() != i {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedDivision,
                format!("division at position {i} has id {}", division.id),
            ));
        }
        for &team in &division.teams {
            if team == 0 || team as usize > TEAM_COUNT {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTeam,
                    format!("division {} lists team id {team}", division.id),
                ));
            } else if !seen.insert(team) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateTeam,
                    format!("team {team} listed more than once"),
                ));
            }
        }
    }

    finish(errors)
}

/// Validates a bye assignment.
///
/// Checks:
/// 1. Every league team has a bye, and only league teams do
/// 2. Every bye week is inside the configured window
/// 3. No week exceeds the hard cap
pub fn validate_byes(
    byes: &ByeAssignment,
    league: &League,
    config: &SeasonConfig,
) -> ValidationResult {
    let mut errors = Vec::new();

    for team in league.teams() {
        if byes.week_of(team).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingBye,
                format!("team {team} has no bye week"),
            ));
        }
    }

    for (team, week) in byes.iter() {
        if league.division_of(team).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeam,
                format!("bye assigned to unknown team {team}"),
            ));
        }
        if !config.bye_weeks().contains(&week) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ByeOutOfWindow,
                format!(
                    "team {team} has bye in week {week}, outside {}..={}",
                    config.bye_first_week, config.bye_last_week
                ),
            ));
        }
    }

    for (week, &count) in byes.counts_by_week().iter().enumerate() {
        if count > config.max_byes_per_week {
            errors.push(ValidationError::new(
                ValidationErrorKind::ByeCapExceeded,
                format!(
                    "week {week} has {count} teams on bye (max {})",
                    config.max_byes_per_week
                ),
            ));
        }
    }

    finish(errors)
}

/// Validates a finished schedule against its bye assignment.
///
/// Checks:
/// 1. 272 games in total, 17 per team
/// 2. No team plays twice in a week
/// 3. No team plays during its bye
/// 4. Each week holds exactly `(32 - byes) / 2` games
/// 5. Every team hosts 8 or 9 games (soft; see `ValidationErrorKind::is_hard`)
pub fn validate_schedule(
    schedule: &WeeklySchedule,
    byes: &ByeAssignment,
    league: &League,
) -> ValidationResult {
    let mut errors = Vec::new();

    if schedule.total_games() != TOTAL_GAMES {
        errors.push(ValidationError::new(
            ValidationErrorKind::WrongGameCount,
            format!("expected {TOTAL_GAMES} games, got {}", schedule.total_games()),
        ));
    }

    let bye_counts = byes.counts_by_week();
    for (week, games) in schedule.iter() {
        let mut seen: BTreeSet<TeamId> = BTreeSet::new();
        for m in games {
            for team in m.teams() {
                if !seen.insert(team) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DoubleBooked,
                        format!("team {team} plays twice in week {week}"),
                    ));
                }
                if byes.is_on_bye(team, week) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::PlaysDuringBye,
                        format!("team {team} plays in its bye week {week}"),
                    ));
                }
            }
        }
        let on_bye = bye_counts.get(week as usize).copied().unwrap_or(0);
        let capacity = TEAM_COUNT.saturating_sub(on_bye) / 2;
        if games.len() != capacity {
            errors.push(ValidationError::new(
                ValidationErrorKind::CapacityMismatch,
                format!(
                    "week {week} holds {} games, capacity is {capacity}",
                    games.len()
                ),
            ));
        }
    }

    let mut totals: BTreeMap<TeamId, (usize, usize)> = BTreeMap::new();
    for m in schedule.games() {
        totals.entry(m.home_team_id).or_default().0 += 1;
        totals.entry(m.away_team_id).or_default().1 += 1;
    }
    for team in league.teams() {
        let (home, away) = totals.get(&team).copied().unwrap_or_default();
        if home + away != GAMES_PER_TEAM {
            errors.push(ValidationError::new(
                ValidationErrorKind::WrongGameCount,
                format!("team {team} plays {} games", home + away),
            ));
        } else if !(8..=9).contains(&home) {
            errors.push(ValidationError::new(
                ValidationErrorKind::HomeAwayImbalance,
                format!("team {team} hosts {home} and visits {away}"),
            ));
        }
    }

    finish(errors)
}
