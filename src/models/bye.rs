//! Bye assignment model.
//!
//! Maps each team to its single bye week. An assignment is built fresh for
//! every distribution attempt and thrown away whole when distribution fails.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{TeamId, WEEKS};

/// Team → bye week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByeAssignment {
    weeks: BTreeMap<TeamId, u8>,
}

impl ByeAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an assignment from `(team, week)` pairs. Later pairs win.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (TeamId, u8)>) -> Self {
        Self {
            weeks: pairs.into_iter().collect(),
        }
    }

    /// Sets a team's bye week, replacing any previous one.
    pub fn assign(&mut self, team: TeamId, week: u8) {
        self.weeks.insert(team, week);
    }

    /// A team's bye week.
    pub fn week_of(&self, team: TeamId) -> Option<u8> {
        self.weeks.get(&team).copied()
    }

    /// Whether `team` is on bye in `week`.
    #[inline]
    pub fn is_on_bye(&self, team: TeamId, week: u8) -> bool {
        self.week_of(team) == Some(week)
    }

    /// Teams on bye in `week`, ascending.
    pub fn teams_on_bye(&self, week: u8) -> Vec<TeamId> {
        self.weeks
            .iter()
            .filter(|&(_, &w)| w == week)
            .map(|(&t, _)| t)
            .collect()
    }

    /// Number of teams on bye per week; index 0 is unused.
    pub fn counts_by_week(&self) -> [usize; WEEKS as usize + 1] {
        let mut counts = [0usize; WEEKS as usize + 1];
        for &w in self.weeks.values() {
            if let Some(c) = counts.get_mut(w as usize) {
                *c += 1;
            }
        }
        counts
    }

    /// `(team, week)` pairs in team order.
    pub fn iter(&self) -> impl Iterator<Item = (TeamId, u8)> + '_ {
        self.weeks.iter().map(|(&t, &w)| (t, w))
    }

    /// Number of teams with a bye.
    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    /// Whether no team has a bye yet.
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}
