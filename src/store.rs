//! External collaborators.
//!
//! Generation reads prior-season standings and persists rotation and bye
//! records. Both go through narrow traits so callers can back them with a
//! database; `MemoryStore` is the in-process implementation used by tests
//! and single-shot tools.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{
    ByeAssignment, DivisionId, RotationState, Season, TeamId, TEAMS_PER_DIVISION,
};

/// Source of prior-season divisional finishing order.
pub trait StandingsProvider {
    /// Division order (champion first) for `season`, if known.
    fn division_rank(
        &self,
        division: DivisionId,
        season: Season,
    ) -> Option<[TeamId; TEAMS_PER_DIVISION]>;
}

/// Persistence for rotation and bye records, keyed by league scope.
pub trait ScheduleStore {
    /// Stored rotation record for a division and season.
    fn rotation(&self, scope: &str, season: Season, division: DivisionId) -> Option<RotationState>;

    /// Stores the rotation records of a season.
    fn save_rotations(&mut self, scope: &str, season: Season, states: &[RotationState])
        -> Result<()>;

    /// Stored bye assignment of a season.
    fn bye_assignment(&self, scope: &str, season: Season) -> Option<ByeAssignment>;

    /// Stores the bye assignment of a season.
    fn save_byes(&mut self, scope: &str, season: Season, byes: &ByeAssignment) -> Result<()>;
}

/// Standings provider with no data; every division falls back to team-id order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStandings;

impl StandingsProvider for NoStandings {
    fn division_rank(&self, _: DivisionId, _: Season) -> Option<[TeamId; TEAMS_PER_DIVISION]> {
        None
    }
}

/// In-memory store for standings, rotations and byes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ranks: BTreeMap<(Season, DivisionId), [TeamId; TEAMS_PER_DIVISION]>,
    rotations: BTreeMap<(String, Season, DivisionId), RotationState>,
    byes: BTreeMap<(String, Season, TeamId), u8>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a division's finishing order for a season.
    pub fn set_division_rank(
        &mut self,
        division: DivisionId,
        season: Season,
        order: [TeamId; TEAMS_PER_DIVISION],
    ) {
        self.ranks.insert((season, division), order);
    }

    /// Number of stored rotation records.
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Number of stored bye records.
    pub fn bye_count(&self) -> usize {
        self.byes.len()
    }
}

impl StandingsProvider for MemoryStore {
    fn division_rank(
        &self,
        division: DivisionId,
        season: Season,
    ) -> Option<[TeamId; TEAMS_PER_DIVISION]> {
        self.ranks.get(&(season, division)).copied()
    }
}

impl ScheduleStore for MemoryStore {
    fn rotation(&self, scope: &str, season: Season, division: DivisionId) -> Option<RotationState> {
        self.rotations
            .get(&(scope.to_string(), season, division))
            .copied()
    }

    fn save_rotations(
        &mut self,
        scope: &str,
        season: Season,
        states: &[RotationState],
    ) -> Result<()> {
        for state in states {
            self.rotations
                .insert((scope.to_string(), season, state.division_id), *state);
        }
        Ok(())
    }

    fn bye_assignment(&self, scope: &str, season: Season) -> Option<ByeAssignment> {
        let pairs: Vec<(TeamId, u8)> = self
            .byes
            .iter()
            .filter(|((s, y, _), _)| s == scope && *y == season)
            .map(|(&(_, _, team), &week)| (team, week))
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(ByeAssignment::from_pairs(pairs))
        }
    }

    fn save_byes(&mut self, scope: &str, season: Season, byes: &ByeAssignment) -> Result<()> {
        self.byes
            .retain(|(s, y, _), _| !(s == scope && *y == season));
        for (team, week) in byes.iter() {
            self.byes.insert((scope.to_string(), season, team), week);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotation::rotation_states;

    #[test]
    fn test_rotations_keyed_by_scope_and_season() {
        let mut store = MemoryStore::new();
        let states = rotation_states(2025);
        store.save_rotations("league-a", 2025, &states).unwrap();

        let d1 = DivisionId::new(1).unwrap();
        assert_eq!(store.rotation("league-a", 2025, d1), Some(states[0]));
        assert_eq!(store.rotation("league-b", 2025, d1), None);
        assert_eq!(store.rotation("league-a", 2024, d1), None);
        assert_eq!(store.rotation_count(), 8);
    }

    #[test]
    fn test_save_byes_replaces_season() {
        let mut store = MemoryStore::new();
        let first = ByeAssignment::from_pairs([(1, 5), (2, 6)]);
        let second = ByeAssignment::from_pairs([(1, 7)]);
        store.save_byes("x", 2025, &first).unwrap();
        store.save_byes("x", 2026, &first).unwrap();
        store.save_byes("x", 2025, &second).unwrap();

        assert_eq!(store.bye_assignment("x", 2025), Some(second));
        assert_eq!(store.bye_assignment("x", 2026), Some(first));
        assert_eq!(store.bye_assignment("y", 2025), None);
        assert_eq!(store.bye_count(), 3);
    }

    #[test]
    fn test_standings_lookup() {
        let mut store = MemoryStore::new();
        let d2 = DivisionId::new(2).unwrap();
        store.set_division_rank(d2, 2024, [8, 7, 6, 5]);
        assert_eq!(store.division_rank(d2, 2024), Some([8, 7, 6, 5]));
        assert_eq!(store.division_rank(d2, 2023), None);
        assert_eq!(NoStandings.division_rank(d2, 2024), None);
    }
}
