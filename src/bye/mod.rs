//! Bye-week assignment.
//!
//! Gives every team exactly one bye inside the configured window (weeks
//! 5-14 by default) using greedy scored placement.
//!
//! # Algorithm
//!
//! 1. Shuffle the division order, then the teams inside each division, so
//!    low team ids get no systematic advantage.
//! 2. For each team, score every window week with the rule engine and take
//!    the lowest score: hard cap (1000), division soft cap (500), odd count
//!    of 1 or 3 (100), 10 per team already idle that week, and jitter.
//!
//! The result keeps weeks at or under the hard cap and tends toward the
//! familiar pattern of a few weeks with 2 byes and most with 4. Even spread
//! is a soft objective only.
//!
//! # Usage
//!
//! ```
//! use u_season::bye::ByeWeekAssigner;
//! use u_season::models::League;
//! use u_season::SeasonConfig;
//!
//! let league = League::standard();
//! let config = SeasonConfig::default();
//! let byes = ByeWeekAssigner::new(&league, &config).assign(42).unwrap();
//! assert_eq!(byes.len(), 32);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{ByeCandidate, ByeContext};
pub use engine::{EvaluationMode, RuleEngine, TieBreaker};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt::Debug;
use tracing::debug;

use crate::config::SeasonConfig;
use crate::error::{Result, ScheduleError};
use crate::models::{ByeAssignment, DivisionId, League};

/// Score returned by a bye rule.
///
/// Lower scores = better week.
pub type RuleScore = f64;

/// A rule scoring one candidate bye placement.
///
/// # Score Convention
/// **Lower score = better week.**
pub trait ByeRule: Send + Sync + Debug {
    /// Rule name (e.g., "HARD_CAP").
    fn name(&self) -> &'static str;

    /// Scores placing `candidate.team` on bye in `candidate.week`.
    fn evaluate(&self, candidate: &ByeCandidate, context: &ByeContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Greedy scored bye assigner.
#[derive(Debug, Clone)]
pub struct ByeWeekAssigner<'a> {
    league: &'a League,
    config: &'a SeasonConfig,
    engine: RuleEngine,
}

impl<'a> ByeWeekAssigner<'a> {
    /// Creates an assigner scoring with the configured penalties.
    pub fn new(league: &'a League, config: &'a SeasonConfig) -> Self {
        Self {
            league,
            config,
            engine: RuleEngine::from_penalties(&config.penalties),
        }
    }

    /// Replaces the scoring engine.
    pub fn with_engine(mut self, engine: RuleEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Assigns one bye per team. The same seed yields the same assignment.
    ///
    /// Fails when the configuration is invalid or the scoring engine lets a
    /// week exceed the hard cap.
    pub fn assign(&self, seed: u64) -> Result<ByeAssignment> {
        self.config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut context = ByeContext::new(
            self.config.max_byes_per_week,
            self.config.max_division_byes_per_week,
        );
        let mut byes = ByeAssignment::new();

        let mut divisions: Vec<DivisionId> = DivisionId::ALL.to_vec();
        divisions.shuffle(&mut rng);

        for division in divisions {
            let mut teams = self.league.division(division).teams;
            teams.shuffle(&mut rng);

            for team in teams {
                let candidates: Vec<ByeCandidate> = self
                    .config
                    .bye_weeks()
                    .map(|week| ByeCandidate {
                        team,
                        division,
                        week,
                        jitter: rng.random::<f64>(),
                    })
                    .collect();

                let Some(best) = self.engine.select_best(&candidates, &context) else {
                    return Err(ScheduleError::InvalidConfig {
                        field: "bye_first_week",
                        reason: "bye window is empty".into(),
                    });
                };
                let week = candidates[best].week;
                if context.on_bye(week) >= self.config.max_byes_per_week {
                    return Err(ScheduleError::InvalidConfig {
                        field: "penalties.hard_cap",
                        reason: format!("scoring placed team {team} in full week {week}"),
                    });
                }
                context.place(division, week);
                byes.assign(team, week);
            }
        }

        debug!(seed, counts = ?byes.counts_by_week(), "bye weeks assigned");
        Ok(byes)
    }
}
