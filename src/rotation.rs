//! Division rotation cycles.
//!
//! Each season a division plays every team of one other division in its
//! conference and one division of the other conference. Both opponents are
//! pure functions of `(division, season)`:
//!
//! - **In-conference** (period 3): the four divisions of a conference have
//!   three perfect matchings. Season `s` uses matching `s mod 3`, in which
//!   the division at position 0 meets position `s mod 3 + 1` and the other
//!   two meet each other. For position 0 this is the sorted list of the
//!   three other divisions indexed by `s mod 3`.
//! - **Cross-conference** (period 4): AFC position `p` meets NFC position
//!   `(p + s) mod 4`.
//! - **Extra game** (period 4): same as cross-conference with the index
//!   shifted by one, so it never repeats the cross-conference opponent.
//!
//! All three relations are symmetric: if `A` maps to `B`, `B` maps to `A`.

use crate::error::{Result, ScheduleError};
use crate::models::{
    Conference, DivisionId, RotationState, Season, DIVISIONS_PER_CONFERENCE, DIVISION_COUNT,
};

/// In-conference seasons before the cycle repeats.
pub const IN_CONFERENCE_PERIOD: Season = 3;
/// Cross-conference seasons before the cycle repeats.
pub const CROSS_CONFERENCE_PERIOD: Season = 4;

/// Partner position under in-conference matching `k` (`0..3`).
fn matching_partner(position: usize, k: usize) -> usize {
    let anchor_partner = k + 1;
    if position == 0 {
        anchor_partner
    } else if position == anchor_partner {
        0
    } else {
        // Positions 1..=3 sum to 6.
        6 - anchor_partner - position
    }
}

/// Opposite-conference division reached from `division` with `offset`.
fn cross_with_offset(division: DivisionId, offset: usize) -> DivisionId {
    let p = division.position();
    let n = DIVISIONS_PER_CONFERENCE;
    match division.conference() {
        Conference::Afc => DivisionId::at(Conference::Nfc, (p + offset) % n),
        Conference::Nfc => DivisionId::at(Conference::Afc, (p + n - offset % n) % n),
    }
}

/// In-conference division played in full in `season`.
pub fn in_conference_opponent(division: DivisionId, season: Season) -> DivisionId {
    let k = (season % IN_CONFERENCE_PERIOD) as usize;
    DivisionId::at(
        division.conference(),
        matching_partner(division.position(), k),
    )
}

/// Cross-conference division played in full in `season`.
pub fn cross_conference_opponent(division: DivisionId, season: Season) -> DivisionId {
    cross_with_offset(division, (season % CROSS_CONFERENCE_PERIOD) as usize)
}

/// Opposite-conference division supplying the 17th game in `season`.
pub fn extra_game_opponent(division: DivisionId, season: Season) -> DivisionId {
    cross_with_offset(division, (season % CROSS_CONFERENCE_PERIOD) as usize + 1)
}

/// The two in-conference divisions not covered by the rotation, ascending.
pub fn same_place_opponents(division: DivisionId, season: Season) -> [DivisionId; 2] {
    let rotation = in_conference_opponent(division, season);
    let mut others = division
        .conference()
        .divisions()
        .into_iter()
        .filter(|&d| d != division && d != rotation);
    match (others.next(), others.next()) {
        (Some(a), Some(b)) => [a, b],
        // A conference always has four divisions.
        _ => unreachable!("conference with fewer than four divisions"),
    }
}

/// Rotation record for one division and season.
pub fn rotation_state(division: DivisionId, season: Season) -> RotationState {
    RotationState {
        division_id: division,
        in_conference_opponent_div: in_conference_opponent(division, season),
        cross_conference_opponent_div: cross_conference_opponent(division, season),
        season,
    }
}

/// Rotation records for every division, in id order.
pub fn rotation_states(season: Season) -> [RotationState; DIVISION_COUNT] {
    DivisionId::ALL.map(|d| rotation_state(d, season))
}

/// Checks that a rotation record pairs divisions in the right conferences.
///
/// Violations mean the rotation tables are corrupt and are never retried.
pub fn verify_rotation(state: &RotationState) -> Result<()> {
    let own = state.division_id.conference();
    let in_conf = state.in_conference_opponent_div;
    if in_conf == state.division_id || in_conf.conference() != own {
        return Err(ScheduleError::invariant(
            format!("in-conference rotation of division {}", state.division_id),
            format!("another {own} division"),
            format!("division {in_conf} ({})", in_conf.conference()),
        ));
    }
    let cross = state.cross_conference_opponent_div;
    if cross.conference() == own {
        return Err(ScheduleError::invariant(
            format!("cross-conference rotation of division {}", state.division_id),
            format!("a {} division", own.opposite()),
            format!("division {cross} ({})", cross.conference()),
        ));
    }
    Ok(())
}
