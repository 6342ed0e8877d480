//! Week distribution.
//!
//! Places every matchup into one of the 18 weeks so that no team plays twice
//! in a week, nobody plays on their bye and each week holds
//! `(32 - byes) / 2` games.
//!
//! # Phases
//!
//! ```text
//! Idle -> Greedy (+ repair) x N -> Success
//!                  |
//!                  v
//!              Backtrack -> Success | Distribution error
//! ```
//!
//! - **Greedy**: up to `greedy_attempts` seeded most-constrained-first
//!   passes, each followed by ejection-chain repair.
//! - **Backtrack**: exhaustive depth-first search with an explicit frame
//!   stack, bounded by `backtrack_node_limit`.
//!
//! A bye pattern whose total capacity is below the game count (any week with
//! an odd number of byes) fails before either phase runs.

mod backtrack;
mod greedy;
mod grid;
mod repair;

use std::fmt;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SeasonConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{ByeAssignment, Matchup, WEEKS};

use self::grid::WeekGrid;

/// Seed stream for greedy attempts.
pub const GREEDY_STREAM: u64 = 1;
/// Seed stream for bye configurations.
pub const BYE_STREAM: u64 = 2;

/// Distribution phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    /// Seeded greedy passes with repair.
    Greedy,
    /// Exhaustive fallback.
    Backtrack,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => write!(f, "greedy"),
            Self::Backtrack => write!(f, "backtrack"),
        }
    }
}

/// How a successful distribution was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// Phase that produced the placement.
    pub phase: SearchPhase,
    /// Greedy attempts run (all of them when backtracking was needed).
    pub greedy_attempts: usize,
    /// Repair steps used by the accepted greedy attempt.
    pub repair_steps: usize,
    /// Backtracking placements made.
    pub backtrack_nodes: u64,
    /// Seed of the accepted greedy attempt, if greedy succeeded.
    pub attempt_seed: Option<u64>,
}

/// Derives an independent seed for `(stream, index)` from a base seed.
///
/// SplitMix64 finaliser over the mixed inputs.
pub fn derive_seed(base: u64, stream: u64, index: u64) -> u64 {
    let mut z = base
        ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ index.wrapping_add(1).wrapping_mul(0xD1B5_4A32_D192_ED03);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Places matchups into weeks for one bye configuration.
///
/// # Example
/// ```
/// use u_season::distribution::WeekDistributor;
/// use u_season::matchups::MatchupGenerator;
/// use u_season::models::{ByeAssignment, League};
/// use u_season::SeasonConfig;
///
/// let league = League::standard();
/// let config = SeasonConfig::default();
/// let mut games = MatchupGenerator::new(&league, 2025).generate().unwrap();
/// // Weeks 5..=12 with four byes each.
/// let byes = ByeAssignment::from_pairs(
///     (1..=32u8).map(|t| (t, 5 + (t - 1) / 4)),
/// );
/// let report = WeekDistributor::new(&byes, &config).distribute(&mut games, 7);
/// assert!(report.is_ok());
/// assert!(games.iter().all(|m| m.week >= 1 && m.week <= 18));
/// ```
#[derive(Debug, Clone)]
pub struct WeekDistributor<'a> {
    byes: &'a ByeAssignment,
    config: &'a SeasonConfig,
}

impl<'a> WeekDistributor<'a> {
    /// Creates a distributor for a bye configuration.
    pub fn new(byes: &'a ByeAssignment, config: &'a SeasonConfig) -> Self {
        Self { byes, config }
    }

    /// Assigns a week to every matchup.
    ///
    /// On failure every week is cleared and a recoverable
    /// [`ScheduleError::Distribution`] is returned.
    pub fn distribute(&self, matchups: &mut [Matchup], seed: u64) -> Result<DistributionReport> {
        for m in matchups.iter_mut() {
            m.week = 0;
        }
        let pairs = matchups
            .iter()
            .map(|m| [m.home_team_id, m.away_team_id])
            .collect();
        let mut grid = WeekGrid::new(pairs, self.byes, WEEKS);

        let capacity = grid.total_capacity();
        if capacity < matchups.len() {
            debug!(capacity, games = matchups.len(), "bye pattern leaves too few slots");
            return Err(ScheduleError::Distribution {
                phase: SearchPhase::Greedy,
                attempts: 0,
                unassigned: matchups.len() - capacity,
            });
        }

        let mut fewest_left = matchups.len();
        for attempt in 0..self.config.greedy_attempts {
            let attempt_seed = derive_seed(seed, GREEDY_STREAM, attempt as u64);
            let mut rng = SmallRng::seed_from_u64(attempt_seed);
            grid.clear();

            let unassigned = greedy::greedy_pass(&mut grid, &mut rng);
            let greedy_left = unassigned.len();
            let outcome = repair::repair(&mut grid, unassigned, self.config.repair_steps, &mut rng);
            debug!(
                attempt,
                greedy_left,
                repair_steps = outcome.steps,
                left = outcome.remaining.len(),
                "greedy attempt finished"
            );

            if outcome.remaining.is_empty() && grid.placed() == matchups.len() {
                apply(&grid, matchups);
                return Ok(DistributionReport {
                    phase: SearchPhase::Greedy,
                    greedy_attempts: attempt + 1,
                    repair_steps: outcome.steps,
                    backtrack_nodes: 0,
                    attempt_seed: Some(attempt_seed),
                });
            }
            fewest_left = fewest_left.min(outcome.remaining.len());
        }

        debug!(
            attempts = self.config.greedy_attempts,
            fewest_left, "greedy exhausted, backtracking"
        );
        let outcome = backtrack::backtrack(&mut grid, self.config.backtrack_node_limit);
        if outcome.solved {
            apply(&grid, matchups);
            return Ok(DistributionReport {
                phase: SearchPhase::Backtrack,
                greedy_attempts: self.config.greedy_attempts,
                repair_steps: 0,
                backtrack_nodes: outcome.nodes,
                attempt_seed: None,
            });
        }

        Err(ScheduleError::Distribution {
            phase: SearchPhase::Backtrack,
            attempts: 1,
            unassigned: matchups.len() - outcome.deepest,
        })
    }
}

fn apply(grid: &WeekGrid, matchups: &mut [Matchup]) {
    for (m, &week) in matchups.iter_mut().zip(grid.assignments()) {
        m.week = week;
    }
}
