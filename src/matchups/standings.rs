//! Prior-season divisional finishing order.

use tracing::warn;

use crate::error::{Result, ScheduleError};
use crate::models::{DivisionId, League, Season, TeamId, DIVISION_COUNT, TEAMS_PER_DIVISION};
use crate::store::StandingsProvider;

/// Finishing order (1st..4th) of every division.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    ranks: [[TeamId; TEAMS_PER_DIVISION]; DIVISION_COUNT],
}

impl Standings {
    /// Team-id order for every division; used when no prior season exists.
    pub fn default_order(league: &League) -> Self {
        let mut ranks = [[0; TEAMS_PER_DIVISION]; DIVISION_COUNT];
        for division in league.divisions() {
            let mut teams = division.teams;
            teams.sort_unstable();
            ranks[division.id.index()] = teams;
        }
        Self { ranks }
    }

    /// Reads `season - 1` standings, defaulting per division when absent or malformed.
    pub fn from_provider<P: StandingsProvider + ?Sized>(
        league: &League,
        provider: &P,
        season: Season,
    ) -> Self {
        let mut standings = Self::default_order(league);
        let Some(prior) = season.checked_sub(1) else {
            return standings;
        };
        for id in DivisionId::ALL {
            if let Some(order) = provider.division_rank(id, prior) {
                if let Err(e) = standings.set(league, id, order) {
                    warn!(division = %id, season = prior, error = %e, "ignoring malformed standings");
                }
            }
        }
        standings
    }

    /// Replaces a division's order. `order` must be a permutation of its teams.
    pub fn set(
        &mut self,
        league: &League,
        division: DivisionId,
        order: [TeamId; TEAMS_PER_DIVISION],
    ) -> Result<()> {
        let mut expected = league.division(division).teams;
        expected.sort_unstable();
        let mut given = order;
        given.sort_unstable();
        if given != expected {
            return Err(ScheduleError::invariant(
                format!("standings of division {division}"),
                format!("{expected:?}"),
                format!("{order:?}"),
            ));
        }
        self.ranks[division.index()] = order;
        Ok(())
    }

    /// Division order, champion first.
    pub fn ranked(&self, division: DivisionId) -> &[TeamId; TEAMS_PER_DIVISION] {
        &self.ranks[division.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, NoStandings};

    fn div(id: u8) -> DivisionId {
        DivisionId::new(id).unwrap()
    }

    #[test]
    fn test_default_order_is_team_id_order() {
        let s = Standings::default_order(&League::standard());
        assert_eq!(s.ranked(div(1)), &[1, 2, 3, 4]);
        assert_eq!(s.ranked(div(8)), &[29, 30, 31, 32]);
    }

    #[test]
    fn test_set_rejects_foreign_team() {
        let league = League::standard();
        let mut s = Standings::default_order(&league);
        assert!(s.set(&league, div(1), [4, 3, 2, 1]).is_ok());
        assert_eq!(s.ranked(div(1)), &[4, 3, 2, 1]);
        assert!(s.set(&league, div(1), [4, 3, 2, 5]).is_err());
        assert_eq!(s.ranked(div(1)), &[4, 3, 2, 1]);
    }

    #[test]
    fn test_from_provider_reads_prior_season() {
        let league = League::standard();
        let mut store = MemoryStore::new();
        store.set_division_rank(div(2), 2024, [8, 6, 5, 7]);
        store.set_division_rank(div(3), 2024, [1, 2, 3, 4]); // wrong division
        store.set_division_rank(div(4), 2025, [16, 15, 14, 13]); // wrong season

        let s = Standings::from_provider(&league, &store, 2025);
        assert_eq!(s.ranked(div(2)), &[8, 6, 5, 7]);
        assert_eq!(s.ranked(div(3)), &[9, 10, 11, 12]);
        assert_eq!(s.ranked(div(4)), &[13, 14, 15, 16]);
    }

    #[test]
    fn test_no_standings_defaults() {
        let league = League::standard();
        let s = Standings::from_provider(&league, &NoStandings, 2025);
        assert_eq!(s, Standings::default_order(&league));
    }
}
