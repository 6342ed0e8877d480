//! Error types for season schedule generation.
//!
//! Two classes of failure exist:
//!
//! - **Invariant violations** (`InvalidDivision`, `Invariant`, `InvalidConfig`):
//!   the static league table or configuration is corrupt. Never retried.
//! - **Search failures** (`Distribution`, `Exhausted`): a bye configuration could
//!   not be turned into a weekly schedule. `Distribution` is consumed by the
//!   outer retry loop; `Exhausted` is what callers see once retries run out.

use crate::distribution::SearchPhase;

/// Error type for all fallible operations in the u-season crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    /// Returned when a division id falls outside `1..=8`.
    #[error("division id must be in 1..=8, got {id}")]
    InvalidDivision {
        /// The rejected id.
        id: u8,
    },

    /// Returned when a structural invariant does not hold.
    #[error("invariant violated in {context}: expected {expected}, got {actual}")]
    Invariant {
        /// Where the check failed (e.g. "division games").
        context: String,
        /// Expected value, rendered.
        expected: String,
        /// Observed value, rendered.
        actual: String,
    },

    /// Returned when a single bye configuration cannot be distributed.
    #[error("{phase} distribution failed after {attempts} attempt(s), {unassigned} matchup(s) unplaced")]
    Distribution {
        /// Last phase that ran.
        phase: SearchPhase,
        /// Attempts made in that phase.
        attempts: usize,
        /// Matchups left without a week by the best attempt.
        unassigned: usize,
    },

    /// Returned when every bye configuration retry failed.
    #[error("schedule generation exhausted {retries} bye configuration(s); last failure: {last}")]
    Exhausted {
        /// Bye configurations tried.
        retries: usize,
        /// Description of the final distribution failure.
        last: String,
    },

    /// Returned when a `SeasonConfig` field is out of range.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Returned when an external store fails.
    #[error("store error: {message}")]
    Store {
        /// Store-provided description.
        message: String,
    },
}

impl ScheduleError {
    /// Builds an invariant violation from anything displayable.
    pub fn invariant(
        context: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::Invariant {
            context: context.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Whether a fresh bye configuration may fix this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Distribution { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_division_message() {
        let e = ScheduleError::InvalidDivision { id: 9 };
        assert_eq!(e.to_string(), "division id must be in 1..=8, got 9");
    }

    #[test]
    fn test_invariant_message() {
        let e = ScheduleError::invariant("division games", 96, 95);
        assert_eq!(
            e.to_string(),
            "invariant violated in division games: expected 96, got 95"
        );
        assert!(!e.is_recoverable());
    }

    #[test]
    fn test_distribution_is_recoverable() {
        let e = ScheduleError::Distribution {
            phase: SearchPhase::Backtrack,
            attempts: 1,
            unassigned: 3,
        };
        assert!(e.is_recoverable());
        assert_eq!(
            e.to_string(),
            "backtrack distribution failed after 1 attempt(s), 3 matchup(s) unplaced"
        );
    }

    #[test]
    fn test_exhausted_not_recoverable() {
        let e = ScheduleError::Exhausted {
            retries: 10,
            last: "boom".into(),
        };
        assert!(!e.is_recoverable());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<ScheduleError>();
    }
}
