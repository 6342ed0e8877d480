//! Generation parameters.
//!
//! Every search ceiling and scoring weight lives here so callers can tune
//! them per league without touching the algorithms. Defaults reproduce the
//! standard 32-team, 18-week format.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::{TEAM_COUNT, WEEKS};

/// Scoring weights used by the bye-week assigner.
///
/// Lower total score = better week for a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByePenalties {
    /// Added when the week already holds the hard-cap number of byes.
    pub hard_cap: f64,
    /// Added when the team's division already has the soft-cap number of byes that week.
    pub division_cap: f64,
    /// Added when placing the team leaves the week with 1 or 3 byes.
    pub odd_count: f64,
    /// Added per team already on bye that week.
    pub load_per_team: f64,
    /// Upper bound (exclusive) of the uniform tie-breaking jitter.
    pub jitter: f64,
}

impl Default for ByePenalties {
    fn default() -> Self {
        Self {
            hard_cap: 1000.0,
            division_cap: 500.0,
            odd_count: 100.0,
            load_per_team: 10.0,
            jitter: 1.0,
        }
    }
}

/// Configuration for one `generate_schedule` call.
///
/// # Example
///
/// ```
/// use u_season::SeasonConfig;
///
/// let config = SeasonConfig::default()
///     .with_greedy_attempts(20)
///     .with_bye_retries(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// First week a bye may fall in (inclusive).
    pub bye_first_week: u8,
    /// Last week a bye may fall in (inclusive).
    pub bye_last_week: u8,
    /// Hard cap on teams on bye in a single week.
    pub max_byes_per_week: usize,
    /// Soft cap on teams of one division on bye in a single week.
    pub max_division_byes_per_week: usize,
    /// Bye scoring weights.
    pub penalties: ByePenalties,
    /// Flip ceiling for the home/away balancer.
    pub balance_max_iterations: usize,
    /// Independent greedy attempts per bye configuration.
    pub greedy_attempts: usize,
    /// Repair moves allowed per greedy attempt.
    pub repair_steps: usize,
    /// Node-expansion ceiling for the backtracking fallback.
    pub backtrack_node_limit: u64,
    /// Bye configurations tried before giving up.
    pub bye_retries: usize,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            bye_first_week: 5,
            bye_last_week: 14,
            max_byes_per_week: 4,
            max_division_byes_per_week: 2,
            penalties: ByePenalties::default(),
            balance_max_iterations: 1000,
            greedy_attempts: 50,
            repair_steps: 20_000,
            backtrack_node_limit: 500_000,
            bye_retries: 10,
        }
    }
}

impl SeasonConfig {
    /// Sets the inclusive bye window.
    pub fn with_bye_window(mut self, first: u8, last: u8) -> Self {
        self.bye_first_week = first;
        self.bye_last_week = last;
        self
    }

    /// Sets the per-week bye hard cap.
    pub fn with_max_byes_per_week(mut self, cap: usize) -> Self {
        self.max_byes_per_week = cap;
        self
    }

    /// Sets the bye scoring weights.
    pub fn with_penalties(mut self, penalties: ByePenalties) -> Self {
        self.penalties = penalties;
        self
    }

    /// Sets the balancer flip ceiling.
    pub fn with_balance_max_iterations(mut self, n: usize) -> Self {
        self.balance_max_iterations = n;
        self
    }

    /// Sets the number of greedy attempts.
    pub fn with_greedy_attempts(mut self, n: usize) -> Self {
        self.greedy_attempts = n;
        self
    }

    /// Sets the repair budget per greedy attempt.
    pub fn with_repair_steps(mut self, n: usize) -> Self {
        self.repair_steps = n;
        self
    }

    /// Sets the backtracking node ceiling.
    pub fn with_backtrack_node_limit(mut self, n: u64) -> Self {
        self.backtrack_node_limit = n;
        self
    }

    /// Sets the number of bye configurations to try.
    pub fn with_bye_retries(mut self, n: usize) -> Self {
        self.bye_retries = n;
        self
    }

    /// Weeks a bye may fall in, in ascending order.
    pub fn bye_weeks(&self) -> std::ops::RangeInclusive<u8> {
        self.bye_first_week..=self.bye_last_week
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.bye_first_week == 0
            || self.bye_first_week > self.bye_last_week
            || self.bye_last_week > WEEKS
        {
            return Err(ScheduleError::InvalidConfig {
                field: "bye_first_week",
                reason: format!(
                    "bye window {}..={} must lie within 1..={WEEKS}",
                    self.bye_first_week, self.bye_last_week
                ),
            });
        }
        if self.max_byes_per_week == 0 {
            return Err(ScheduleError::InvalidConfig {
                field: "max_byes_per_week",
                reason: "must be >= 1".into(),
            });
        }
        let window = (self.bye_last_week - self.bye_first_week + 1) as usize;
        if window * self.max_byes_per_week < TEAM_COUNT {
            return Err(ScheduleError::InvalidConfig {
                field: "max_byes_per_week",
                reason: format!(
                    "{window} week(s) x {} bye(s) cannot hold {TEAM_COUNT} teams",
                    self.max_byes_per_week
                ),
            });
        }
        if self.greedy_attempts == 0 {
            return Err(ScheduleError::InvalidConfig {
                field: "greedy_attempts",
                reason: "must be >= 1".into(),
            });
        }
        if self.bye_retries == 0 {
            return Err(ScheduleError::InvalidConfig {
                field: "bye_retries",
                reason: "must be >= 1".into(),
            });
        }
        if !(self.penalties.jitter >= 0.0 && self.penalties.jitter.is_finite()) {
            return Err(ScheduleError::InvalidConfig {
                field: "penalties.jitter",
                reason: format!("must be finite and >= 0, got {}", self.penalties.jitter),
            });
        }
        Ok(())
    }
}
