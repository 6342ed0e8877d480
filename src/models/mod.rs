//! Season scheduling domain models.
//!
//! Provides the league reference data and the entities created during one
//! generation run. Everything except the league table is created, resolved
//! and dropped inside a single `generate_schedule` call.
//!
//! # Entities
//!
//! | Type | Role |
//! |------|------|
//! | `League` / `Division` | Static 8 x 4 team table |
//! | `Matchup` | One game; home/away and week are mutable |
//! | `RotationState` | A division's rotation opponents for a season |
//! | `ByeAssignment` | Team → bye week |
//! | `WeeklySchedule` | Week → games |

mod bye;
mod league;
mod matchup;
mod rotation;
mod schedule;

pub use bye::ByeAssignment;
pub use league::{
    Conference, Division, DivisionId, League, Season, TeamId, DIVISIONS_PER_CONFERENCE,
    DIVISION_COUNT, GAMES_PER_TEAM, TEAMS_PER_DIVISION, TEAM_COUNT, TOTAL_GAMES, WEEKS,
};
pub use matchup::{Matchup, MatchupKind};
pub use rotation::RotationState;
pub use schedule::WeeklySchedule;
