//! Matchup model.
//!
//! A matchup is one game between two teams. The generator creates them with
//! week `0` (unassigned); the balancer may swap home and away on
//! non-divisional games, and the distributor assigns and clears weeks.

use serde::{Deserialize, Serialize};

use super::TeamId;

/// Which sub-generator produced a matchup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MatchupKind {
    /// Home-and-home against a division rival.
    Division,
    /// Against the in-conference rotation division.
    InConferenceRotation,
    /// Against the cross-conference rotation division.
    CrossConferenceRotation,
    /// Against the same-place finisher of a non-rotation conference division.
    SamePlace,
    /// The 17th game, against a second opposite-conference division.
    Extra,
}

impl MatchupKind {
    /// Whether games of this kind are between division rivals.
    pub fn is_divisional(self) -> bool {
        matches!(self, Self::Division)
    }

    /// Whether games of this kind stay inside a conference.
    pub fn is_conference(self) -> bool {
        matches!(
            self,
            Self::Division | Self::InConferenceRotation | Self::SamePlace
        )
    }
}

/// A single game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matchup {
    /// Hosting team.
    pub home_team_id: TeamId,
    /// Visiting team.
    pub away_team_id: TeamId,
    /// Both teams share a division.
    pub is_divisional: bool,
    /// Both teams share a conference.
    pub is_conference: bool,
    /// Producing sub-generator.
    pub kind: MatchupKind,
    /// Assigned week (`1..=18`), or `0` when unassigned.
    pub week: u8,
}

impl Matchup {
    /// Creates an unassigned matchup.
    pub fn new(home: TeamId, away: TeamId, kind: MatchupKind) -> Self {
        Self {
            home_team_id: home,
            away_team_id: away,
            is_divisional: kind.is_divisional(),
            is_conference: kind.is_conference(),
            kind,
            week: 0,
        }
    }

    /// Both teams, home first.
    #[inline]
    pub fn teams(&self) -> [TeamId; 2] {
        [self.home_team_id, self.away_team_id]
    }

    /// The unordered pair, lower id first.
    pub fn pair(&self) -> (TeamId, TeamId) {
        let [a, b] = self.teams();
        (a.min(b), a.max(b))
    }

    /// Whether `team` plays in this game.
    #[inline]
    pub fn involves(&self, team: TeamId) -> bool {
        self.home_team_id == team || self.away_team_id == team
    }

    /// The other team, if `team` plays in this game.
    pub fn opponent_of(&self, team: TeamId) -> Option<TeamId> {
        if self.home_team_id == team {
            Some(self.away_team_id)
        } else if self.away_team_id == team {
            Some(self.home_team_id)
        } else {
            None
        }
    }

    /// Swaps home and away.
    pub fn swap_home_away(&mut self) {
        std::mem::swap(&mut self.home_team_id, &mut self.away_team_id);
    }

    /// Whether a week has been assigned.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.week != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_flags() {
        let div = Matchup::new(1, 2, MatchupKind::Division);
        assert!(div.is_divisional && div.is_conference);

        let same = Matchup::new(1, 5, MatchupKind::SamePlace);
        assert!(!same.is_divisional && same.is_conference);

        let cross = Matchup::new(1, 17, MatchupKind::CrossConferenceRotation);
        assert!(!cross.is_divisional && !cross.is_conference);

        assert!(!MatchupKind::Extra.is_conference());
        assert!(MatchupKind::InConferenceRotation.is_conference());
    }

    #[test]
    fn test_pair_and_opponent() {
        let m = Matchup::new(9, 3, MatchupKind::InConferenceRotation);
        assert_eq!(m.pair(), (3, 9));
        assert_eq!(m.opponent_of(9), Some(3));
        assert_eq!(m.opponent_of(3), Some(9));
        assert_eq!(m.opponent_of(4), None);
        assert!(m.involves(3));
        assert!(!m.involves(4));
    }

    #[test]
    fn test_swap_home_away() {
        let mut m = Matchup::new(1, 20, MatchupKind::Extra);
        m.swap_home_away();
        assert_eq!(m.home_team_id, 20);
        assert_eq!(m.away_team_id, 1);
        assert_eq!(m.kind, MatchupKind::Extra);
    }

    #[test]
    fn test_new_is_unassigned() {
        let mut m = Matchup::new(1, 2, MatchupKind::Division);
        assert!(!m.is_assigned());
        m.week = 7;
        assert!(m.is_assigned());
    }
}
