//! Bye placement state passed to scoring rules.

use crate::models::{DivisionId, TeamId, DIVISION_COUNT, WEEKS};

/// A candidate placement: `team` on bye in `week`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ByeCandidate {
    /// Team being placed.
    pub team: TeamId,
    /// The team's division.
    pub division: DivisionId,
    /// Candidate week.
    pub week: u8,
    /// Uniform random value in `[0, 1)` for tie-breaking.
    pub jitter: f64,
}

/// Bye occupancy so far.
#[derive(Debug, Clone)]
pub struct ByeContext {
    /// Teams on bye per week; index 0 unused.
    pub week_counts: [usize; WEEKS as usize + 1],
    /// Teams on bye per division per week.
    pub division_counts: [[usize; WEEKS as usize + 1]; DIVISION_COUNT],
    /// Hard cap on byes per week.
    pub max_byes_per_week: usize,
    /// Soft cap on byes per division per week.
    pub max_division_byes_per_week: usize,
}

impl ByeContext {
    /// Creates an empty context.
    pub fn new(max_byes_per_week: usize, max_division_byes_per_week: usize) -> Self {
        Self {
            week_counts: [0; WEEKS as usize + 1],
            division_counts: [[0; WEEKS as usize + 1]; DIVISION_COUNT],
            max_byes_per_week,
            max_division_byes_per_week,
        }
    }

    /// Teams on bye in `week`.
    #[inline]
    pub fn on_bye(&self, week: u8) -> usize {
        self.week_counts[week as usize]
    }

    /// Teams of `division` on bye in `week`.
    #[inline]
    pub fn division_on_bye(&self, division: DivisionId, week: u8) -> usize {
        self.division_counts[division.index()][week as usize]
    }

    /// Records a placement.
    pub fn place(&mut self, division: DivisionId, week: u8) {
        self.week_counts[week as usize] += 1;
        self.division_counts[division.index()][week as usize] += 1;
    }
}
