//! League reference data.
//!
//! The league is fixed: 32 teams in 8 divisions of 4, split into two
//! conferences of 4 divisions. Division membership is computed once when the
//! `League` is built and exposed through pure lookups; nothing else in the
//! crate re-derives it.
//!
//! Division ids are `1..=8`. Ids `1..=4` form the AFC, `5..=8` the NFC, and a
//! division's *position* is its 0-based index inside its conference.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, ScheduleError};
use crate::validation::validate_league;

/// Team identifier (`1..=32`).
pub type TeamId = u8;

/// Season year (e.g. 2025).
pub type Season = u32;

/// Teams in the league.
pub const TEAM_COUNT: usize = 32;
/// Divisions in the league.
pub const DIVISION_COUNT: usize = 8;
/// Teams per division.
pub const TEAMS_PER_DIVISION: usize = 4;
/// Divisions per conference.
pub const DIVISIONS_PER_CONFERENCE: usize = 4;
/// Weeks in the regular season.
pub const WEEKS: u8 = 18;
/// Games each team plays.
pub const GAMES_PER_TEAM: usize = 17;
/// Games in a full season.
pub const TOTAL_GAMES: usize = TEAM_COUNT * GAMES_PER_TEAM / 2;

/// One of the two conferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Conference {
    /// Divisions 1-4.
    Afc,
    /// Divisions 5-8.
    Nfc,
}

impl Conference {
    /// The other conference.
    pub fn opposite(self) -> Self {
        match self {
            Self::Afc => Self::Nfc,
            Self::Nfc => Self::Afc,
        }
    }

    /// Divisions of this conference, ordered by position.
    pub fn divisions(self) -> [DivisionId; DIVISIONS_PER_CONFERENCE] {
        let base = match self {
            Self::Afc => 1,
            Self::Nfc => 5,
        };
        [
            DivisionId(base),
            DivisionId(base + 1),
            DivisionId(base + 2),
            DivisionId(base + 3),
        ]
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Afc => f.write_str("AFC"),
            Self::Nfc => f.write_str("NFC"),
        }
    }
}

/// Validated division identifier (`1..=8`).
///
/// Construction is the only place an out-of-range id can be rejected, so
/// every function taking a `DivisionId` is total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DivisionId(u8);

impl DivisionId {
    /// All eight divisions in id order.
    pub const ALL: [DivisionId; DIVISION_COUNT] = [
        DivisionId(1),
        DivisionId(2),
        DivisionId(3),
        DivisionId(4),
        DivisionId(5),
        DivisionId(6),
        DivisionId(7),
        DivisionId(8),
    ];

    /// Creates a division id, rejecting anything outside `1..=8`.
    pub fn new(id: u8) -> Result<Self> {
        if (1..=DIVISION_COUNT as u8).contains(&id) {
            Ok(Self(id))
        } else {
            Err(ScheduleError::InvalidDivision { id })
        }
    }

    /// Raw id.
    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// 0-based index into `DivisionId::ALL`.
    #[inline]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Conference this division belongs to.
    pub fn conference(self) -> Conference {
        if self.0 <= DIVISIONS_PER_CONFERENCE as u8 {
            Conference::Afc
        } else {
            Conference::Nfc
        }
    }

    /// 0-based position inside the conference.
    #[inline]
    pub const fn position(self) -> usize {
        self.index() % DIVISIONS_PER_CONFERENCE
    }

    /// Division at `position` (taken modulo 4) of `conference`.
    pub fn at(conference: Conference, position: usize) -> Self {
        conference.divisions()[position % DIVISIONS_PER_CONFERENCE]
    }
}

impl TryFrom<u8> for DivisionId {
    type Error = ScheduleError;

    fn try_from(id: u8) -> Result<Self> {
        Self::new(id)
    }
}

impl From<DivisionId> for u8 {
    fn from(id: DivisionId) -> u8 {
        id.0
    }
}

impl fmt::Display for DivisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A division: four teams, listed in default (id) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Division {
    /// Division id.
    pub id: DivisionId,
    /// Display name (e.g. "AFC East").
    pub name: String,
    /// Member teams.
    pub teams: [TeamId; TEAMS_PER_DIVISION],
}

impl Division {
    /// Creates a division.
    pub fn new(id: DivisionId, name: impl Into<String>, teams: [TeamId; TEAMS_PER_DIVISION]) -> Self {
        Self {
            id,
            name: name.into(),
            teams,
        }
    }

    /// Whether `team` belongs to this division.
    pub fn contains(&self, team: TeamId) -> bool {
        self.teams.contains(&team)
    }

    /// Conference of this division.
    pub fn conference(&self) -> Conference {
        self.id.conference()
    }
}

/// The static division table with a team → division index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct League {
    divisions: Vec<Division>,
    team_division: [u8; TEAM_COUNT + 1],
}

impl League {
    /// The standard table: division `d` holds teams `4d-3..=4d`.
    pub fn standard() -> Self {
        const NAMES: [&str; DIVISION_COUNT] = [
            "AFC East", "AFC North", "AFC South", "AFC West", "NFC East", "NFC North",
            "NFC South", "NFC West",
        ];
        let divisions = DivisionId::ALL
            .iter()
            .map(|&id| {
                let first = (id.index() * TEAMS_PER_DIVISION) as TeamId + 1;
                Division::new(id, NAMES[id.index()], [first, first + 1, first + 2, first + 3])
            })
            .collect();
        Self::index(divisions)
    }

    /// Builds a league from a custom table.
    ///
    /// The table must hold divisions `1..=8` in order with 32 distinct
    /// team ids in `1..=32`; anything else is an invariant violation.
    pub fn new(divisions: Vec<Division>) -> Result<Self> {
        if let Err(errors) = validate_league(&divisions) {
            let actual = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ScheduleError::invariant("division table", "a valid 8x4 table", actual));
        }
        Ok(Self::index(divisions))
    }

    fn index(divisions: Vec<Division>) -> Self {
        let mut team_division = [0u8; TEAM_COUNT + 1];
        for division in &divisions {
            for &team in &division.teams {
                team_division[team as usize] = division.id.get();
            }
        }
        Self {
            divisions,
            team_division,
        }
    }

    /// All divisions in id order.
    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    /// Division by id.
    pub fn division(&self, id: DivisionId) -> &Division {
        &self.divisions[id.index()]
    }

    /// Division a team belongs to, if the id is known.
    pub fn division_of(&self, team: TeamId) -> Option<DivisionId> {
        match self.team_division.get(team as usize) {
            Some(&d) if d != 0 => Some(DivisionId(d)),
            _ => None,
        }
    }

    /// Conference a team belongs to, if the id is known.
    pub fn conference_of(&self, team: TeamId) -> Option<Conference> {
        self.division_of(team).map(DivisionId::conference)
    }

    /// Whether two teams share a division.
    pub fn same_division(&self, a: TeamId, b: TeamId) -> bool {
        matches!((self.division_of(a), self.division_of(b)), (Some(x), Some(y)) if x == y)
    }

    /// Whether two teams share a conference.
    pub fn same_conference(&self, a: TeamId, b: TeamId) -> bool {
        matches!((self.conference_of(a), self.conference_of(b)), (Some(x), Some(y)) if x == y)
    }

    /// All team ids in ascending order.
    pub fn teams(&self) -> Vec<TeamId> {
        let mut teams: Vec<TeamId> = self
            .divisions
            .iter()
            .flat_map(|d| d.teams.iter().copied())
            .collect();
        teams.sort_unstable();
        teams
    }
}

impl Default for League {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_division_id_range() {
        assert!(DivisionId::new(0).is_err());
        assert!(DivisionId::new(9).is_err());
        assert_eq!(DivisionId::new(8).unwrap().get(), 8);
        assert_eq!(
            DivisionId::try_from(12).unwrap_err(),
            ScheduleError::InvalidDivision { id: 12 }
        );
    }

    #[test]
    fn test_conference_and_position() {
        let d3 = DivisionId::new(3).unwrap();
        assert_eq!(d3.conference(), Conference::Afc);
        assert_eq!(d3.position(), 2);

        let d6 = DivisionId::new(6).unwrap();
        assert_eq!(d6.conference(), Conference::Nfc);
        assert_eq!(d6.position(), 1);
        assert_eq!(DivisionId::at(Conference::Nfc, 1), d6);
        assert_eq!(DivisionId::at(Conference::Afc, 6), d3);
    }

    #[test]
    fn test_standard_league_layout() {
        let league = League::standard();
        let east = league.division(DivisionId::new(1).unwrap());
        assert_eq!(east.name, "AFC East");
        assert_eq!(east.teams, [1, 2, 3, 4]);
        assert_eq!(league.division(DivisionId::new(8).unwrap()).teams, [29, 30, 31, 32]);
        assert_eq!(league.teams(), (1..=32).collect::<Vec<TeamId>>());
    }

    #[test]
    fn test_team_lookups() {
        let league = League::standard();
        assert_eq!(league.division_of(5), Some(DivisionId::new(2).unwrap()));
        assert_eq!(league.conference_of(17), Some(Conference::Nfc));
        assert_eq!(league.division_of(0), None);
        assert_eq!(league.division_of(33), None);
        assert!(league.same_division(1, 4));
        assert!(!league.same_division(4, 5));
        assert!(league.same_conference(1, 16));
        assert!(!league.same_conference(16, 17));
    }

    #[test]
    fn test_custom_league_rejects_duplicate_team() {
        let mut divisions = League::standard().divisions().to_vec();
        divisions[1].teams[0] = 1;
        let err = League::new(divisions).unwrap_err();
        assert!(matches!(err, ScheduleError::Invariant { .. }));
    }

    #[test]
    fn test_custom_league_accepts_permuted_ids() {
        let mut divisions = League::standard().divisions().to_vec();
        divisions[0].teams = [4, 3, 2, 1];
        let league = League::new(divisions).unwrap();
        assert_eq!(league.division_of(4), Some(DivisionId::new(1).unwrap()));
    }

    #[test]
    fn test_division_id_serde_rejects_out_of_range() {
        let ok: DivisionId = serde_json::from_str("7").unwrap();
        assert_eq!(ok.get(), 7);
        assert!(serde_json::from_str::<DivisionId>("0").is_err());
    }
}
