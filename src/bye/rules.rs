//! Built-in bye scoring rules.
//!
//! # Rules
//!
//! - **Hard cap**: the week is already full
//! - **Division cap**: the team's division already has its share of byes
//! - **Odd count**: the week would end up with 1 or 3 teams on bye
//! - **Load**: teams already on bye that week
//! - **Jitter**: random tie-breaker
//!
//! # Score Convention
//! All rules return lower scores for better weeks. Indicator rules return
//! `0.0` or `1.0`; the engine weight turns them into penalties.

use super::{ByeCandidate, ByeContext, ByeRule, RuleScore};

/// Week already holds the hard-cap number of byes.
#[derive(Debug, Clone, Copy)]
pub struct HardCap;

impl ByeRule for HardCap {
    fn name(&self) -> &'static str {
        "HARD_CAP"
    }

    fn evaluate(&self, candidate: &ByeCandidate, context: &ByeContext) -> RuleScore {
        if context.on_bye(candidate.week) >= context.max_byes_per_week {
            1.0
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Week at bye hard cap"
    }
}

/// The team's division already has the soft-cap number of byes that week.
#[derive(Debug, Clone, Copy)]
pub struct DivisionCap;

impl ByeRule for DivisionCap {
    fn name(&self) -> &'static str {
        "DIVISION_CAP"
    }

    fn evaluate(&self, candidate: &ByeCandidate, context: &ByeContext) -> RuleScore {
        if context.division_on_bye(candidate.division, candidate.week)
            >= context.max_division_byes_per_week
        {
            1.0
        } else {
            0.0
        }
    }

    fn description(&self) -> &'static str {
        "Division bye soft cap"
    }
}

/// Placing the team leaves the week with an odd count of 1 or 3.
///
/// An odd number of idle teams leaves one active team without an opponent.
#[derive(Debug, Clone, Copy)]
pub struct OddCount;

impl ByeRule for OddCount {
    fn name(&self) -> &'static str {
        "ODD_COUNT"
    }

    fn evaluate(&self, candidate: &ByeCandidate, context: &ByeContext) -> RuleScore {
        match context.on_bye(candidate.week) + 1 {
            1 | 3 => 1.0,
            _ => 0.0,
        }
    }

    fn description(&self) -> &'static str {
        "Odd bye count"
    }
}

/// Teams already on bye that week.
#[derive(Debug, Clone, Copy)]
pub struct Load;

impl ByeRule for Load {
    fn name(&self) -> &'static str {
        "LOAD"
    }

    fn evaluate(&self, candidate: &ByeCandidate, context: &ByeContext) -> RuleScore {
        context.on_bye(candidate.week) as f64
    }

    fn description(&self) -> &'static str {
        "Current week occupancy"
    }
}

/// Random tie-breaker drawn per candidate.
#[derive(Debug, Clone, Copy)]
pub struct Jitter;

impl ByeRule for Jitter {
    fn name(&self) -> &'static str {
        "JITTER"
    }

    fn evaluate(&self, candidate: &ByeCandidate, _context: &ByeContext) -> RuleScore {
        candidate.jitter
    }
}
