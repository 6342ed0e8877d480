//! Home/away balancing.
//!
//! Flips non-divisional games until every team hosts 8 or 9 of its 17.
//! Division games keep the home-and-home split fixed at generation.
//!
//! # Algorithm
//!
//! 1. Tally home and away games per team.
//! 2. Pick the first team with more than 9 home (or 9 away) games.
//! 3. Flip one of its non-divisional games whose opponent stays within 9
//!    after the flip. A team with no such game is skipped until the next
//!    successful flip, which may have freed one of its opponents.
//! 4. Repeat until no team violates the bound or the iteration ceiling hits.
//!
//! Remaining violations are logged and reported, not returned as errors.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::models::{Matchup, TeamId, GAMES_PER_TEAM, TEAM_COUNT};

/// Largest home (or away) count a team may end with.
pub const MAX_SIDE_GAMES: usize = GAMES_PER_TEAM.div_ceil(2);

/// Home/away counts per team, indexed by team id.
#[derive(Debug, Clone)]
pub struct HomeAwayTally {
    home: [usize; TEAM_COUNT + 1],
    away: [usize; TEAM_COUNT + 1],
}

impl HomeAwayTally {
    /// Tallies a matchup list.
    pub fn from_matchups(matchups: &[Matchup]) -> Self {
        let mut tally = Self {
            home: [0; TEAM_COUNT + 1],
            away: [0; TEAM_COUNT + 1],
        };
        for m in matchups {
            tally.home[m.home_team_id as usize] += 1;
            tally.away[m.away_team_id as usize] += 1;
        }
        tally
    }

    /// Home games of `team`.
    pub fn home(&self, team: TeamId) -> usize {
        self.home[team as usize]
    }

    /// Away games of `team`.
    pub fn away(&self, team: TeamId) -> usize {
        self.away[team as usize]
    }

    /// Whether `team` exceeds the bound on either side.
    pub fn violates(&self, team: TeamId) -> bool {
        self.home(team) > MAX_SIDE_GAMES || self.away(team) > MAX_SIDE_GAMES
    }

    fn flip(&mut self, m: &Matchup) {
        // `m` is already flipped: undo the old sides, apply the new ones.
        self.home[m.away_team_id as usize] -= 1;
        self.away[m.home_team_id as usize] -= 1;
        self.home[m.home_team_id as usize] += 1;
        self.away[m.away_team_id as usize] += 1;
    }
}

/// Outcome of a balancing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceReport {
    /// Games flipped.
    pub flips: usize,
    /// Loop iterations used.
    pub iterations: usize,
    /// Teams still outside 8-9 home games.
    pub unbalanced: Vec<TeamId>,
}

impl BalanceReport {
    /// Whether every team ended within bounds.
    pub fn is_balanced(&self) -> bool {
        self.unbalanced.is_empty()
    }
}

/// Best-effort home/away balancer.
#[derive(Debug, Clone)]
pub struct HomeAwayBalancer {
    max_iterations: usize,
}

impl HomeAwayBalancer {
    /// Creates a balancer with an iteration ceiling.
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Balances `matchups` in place.
    pub fn balance(&self, matchups: &mut [Matchup]) -> BalanceReport {
        let teams: BTreeSet<TeamId> = matchups.iter().flat_map(|m| m.teams()).collect();
        let mut tally = HomeAwayTally::from_matchups(matchups);
        let mut stuck: BTreeSet<TeamId> = BTreeSet::new();
        let mut report = BalanceReport::default();

        while report.iterations < self.max_iterations {
            let Some(team) = teams
                .iter()
                .copied()
                .find(|&t| tally.violates(t) && !stuck.contains(&t))
            else {
                break;
            };
            report.iterations += 1;

            match Self::find_flip(matchups, &tally, team) {
                Some(idx) => {
                    matchups[idx].swap_home_away();
                    tally.flip(&matchups[idx]);
                    report.flips += 1;
                    stuck.clear();
                }
                None => {
                    debug!(team, "no flippable game found");
                    stuck.insert(team);
                }
            }
        }

        report.unbalanced = teams.into_iter().filter(|&t| tally.violates(t)).collect();
        if !report.is_balanced() {
            warn!(
                teams = ?report.unbalanced,
                iterations = report.iterations,
                "home/away balance incomplete"
            );
        }
        report
    }

    /// Index of a non-divisional game of `team` the opponent can absorb.
    fn find_flip(matchups: &[Matchup], tally: &HomeAwayTally, team: TeamId) -> Option<usize> {
        let too_many_home = tally.home(team) > MAX_SIDE_GAMES;
        matchups.iter().position(|m| {
            if m.is_divisional {
                return false;
            }
            if too_many_home {
                m.home_team_id == team && tally.home(m.away_team_id) < MAX_SIDE_GAMES
            } else {
                m.away_team_id == team && tally.away(m.home_team_id) < MAX_SIDE_GAMES
            }
        })
    }
}

impl Default for HomeAwayBalancer {
    fn default() -> Self {
        Self::new(1000)
    }
}
