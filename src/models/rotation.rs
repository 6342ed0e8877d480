//! Rotation state model.

use serde::{Deserialize, Serialize};

use super::{DivisionId, Season};

/// A division's rotation opponents for one season.
///
/// Computed deterministically from `(division, season)`; persisted only so
/// the next season can confirm continuity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    /// Division the record describes.
    pub division_id: DivisionId,
    /// In-conference division played in full this season.
    pub in_conference_opponent_div: DivisionId,
    /// Cross-conference division played in full this season.
    pub cross_conference_opponent_div: DivisionId,
    /// Season year.
    pub season: Season,
}
