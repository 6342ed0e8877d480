//! Week occupancy shared by the search phases.
//!
//! Teams are bits in a `u64` mask, weeks are bits in a `u32` mask. Every
//! legality test is a couple of AND operations.

use crate::models::{ByeAssignment, TeamId, TEAM_COUNT};

const EMPTY: u16 = u16::MAX;

#[inline]
fn bit(team: TeamId) -> u64 {
    1u64 << team
}

/// Placement state of one distribution attempt.
///
/// Games are addressed by index into the matchup slice; week `0` means
/// unplaced. A week's capacity is half the participating teams not on bye
/// there, so two free non-bye teams always fit.
#[derive(Debug, Clone)]
pub(crate) struct WeekGrid {
    weeks: u8,
    pairs: Vec<[TeamId; 2]>,
    bye_of: [u8; TEAM_COUNT + 1],
    bye_mask: Vec<u64>,
    busy: Vec<u64>,
    slot: Vec<[u16; TEAM_COUNT + 1]>,
    count: Vec<usize>,
    capacity: Vec<usize>,
    week_of: Vec<u8>,
}

impl WeekGrid {
    /// Creates an empty grid for `pairs` over weeks `1..=weeks`.
    pub(crate) fn new(pairs: Vec<[TeamId; 2]>, byes: &ByeAssignment, weeks: u8) -> Self {
        let slots = weeks as usize + 1;
        let mut bye_of = [0u8; TEAM_COUNT + 1];
        let mut bye_mask = vec![0u64; slots];
        for (team, week) in byes.iter() {
            if (team as usize) <= TEAM_COUNT && (1..=weeks).contains(&week) {
                bye_of[team as usize] = week;
                bye_mask[week as usize] |= bit(team);
            }
        }

        let participants = pairs.iter().fold(0u64, |acc, [a, b]| acc | bit(*a) | bit(*b));
        let capacity = (0..slots)
            .map(|w| {
                if w == 0 {
                    0
                } else {
                    (participants & !bye_mask[w]).count_ones() as usize / 2
                }
            })
            .collect();

        let games = pairs.len();
        Self {
            weeks,
            pairs,
            bye_of,
            bye_mask,
            busy: vec![0; slots],
            slot: vec![[EMPTY; TEAM_COUNT + 1]; slots],
            count: vec![0; slots],
            capacity,
            week_of: vec![0; games],
        }
    }

    /// Removes every placement.
    pub(crate) fn clear(&mut self) {
        self.busy.iter_mut().for_each(|m| *m = 0);
        self.slot.iter_mut().for_each(|s| *s = [EMPTY; TEAM_COUNT + 1]);
        self.count.iter_mut().for_each(|c| *c = 0);
        self.week_of.iter_mut().for_each(|w| *w = 0);
    }

    #[inline]
    pub(crate) fn weeks(&self) -> u8 {
        self.weeks
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub(crate) fn teams(&self, game: usize) -> [TeamId; 2] {
        self.pairs[game]
    }

    /// Week of `game`, `0` if unplaced.
    #[inline]
    pub(crate) fn week_of(&self, game: usize) -> u8 {
        self.week_of[game]
    }

    /// Games placed so far.
    pub(crate) fn placed(&self) -> usize {
        self.count.iter().sum()
    }

    /// Sum of every week's capacity.
    pub(crate) fn total_capacity(&self) -> usize {
        self.capacity.iter().sum()
    }

    /// Capacity left in `week`.
    #[inline]
    pub(crate) fn free_capacity(&self, week: u8) -> usize {
        self.capacity[week as usize].saturating_sub(self.count[week as usize])
    }

    #[inline]
    pub(crate) fn is_bye(&self, team: TeamId, week: u8) -> bool {
        self.bye_of[team as usize] == week
    }

    /// Whether `game` may go into `week` now.
    #[inline]
    pub(crate) fn is_legal(&self, game: usize, week: u8) -> bool {
        if week == 0 || week > self.weeks {
            return false;
        }
        let [a, b] = self.pairs[game];
        let w = week as usize;
        (self.bye_mask[w] | self.busy[w]) & (bit(a) | bit(b)) == 0 && self.count[w] < self.capacity[w]
    }

    /// Legal weeks of `game` as a mask (bit `w` set for week `w`).
    pub(crate) fn legal_weeks(&self, game: usize) -> u32 {
        (1..=self.weeks)
            .filter(|&w| self.is_legal(game, w))
            .fold(0u32, |acc, w| acc | (1 << w))
    }

    /// Weeks in which `team` is neither on bye nor playing.
    pub(crate) fn free_weeks(&self, team: TeamId) -> u32 {
        let b = bit(team);
        (1..=self.weeks)
            .filter(|&w| (self.bye_mask[w as usize] | self.busy[w as usize]) & b == 0)
            .fold(0u32, |acc, w| acc | (1 << w))
    }

    /// Game `team` plays in `week`, if any.
    #[inline]
    pub(crate) fn game_at(&self, team: TeamId, week: u8) -> Option<usize> {
        match self.slot[week as usize][team as usize] {
            EMPTY => None,
            g => Some(g as usize),
        }
    }

    /// Places `game` in `week`. Caller checks legality.
    pub(crate) fn place(&mut self, game: usize, week: u8) {
        debug_assert!(self.is_legal(game, week), "game {game} not legal in week {week}");
        let [a, b] = self.pairs[game];
        let w = week as usize;
        self.busy[w] |= bit(a) | bit(b);
        self.slot[w][a as usize] = game as u16;
        self.slot[w][b as usize] = game as u16;
        self.count[w] += 1;
        self.week_of[game] = week;
    }

    /// Unplaces `game`; no-op when it has no week.
    pub(crate) fn remove(&mut self, game: usize) {
        let week = self.week_of[game];
        if week == 0 {
            return;
        }
        let [a, b] = self.pairs[game];
        let w = week as usize;
        self.busy[w] &= !(bit(a) | bit(b));
        self.slot[w][a as usize] = EMPTY;
        self.slot[w][b as usize] = EMPTY;
        self.count[w] -= 1;
        self.week_of[game] = 0;
    }

    /// Week of every game, by index.
    pub(crate) fn assignments(&self) -> &[u8] {
        &self.week_of
    }
}

/// Weeks set in `mask`, ascending.
pub(crate) fn weeks_in(mask: u32) -> impl Iterator<Item = u8> {
    (1..32u8).filter(move |&w| mask & (1 << w) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_robin() -> Vec<[TeamId; 2]> {
        vec![[1, 2], [3, 4], [1, 3], [2, 4], [1, 4], [2, 3]]
    }

    #[test]
    fn test_capacity_counts_participants_off_bye() {
        let byes = ByeAssignment::from_pairs([(1, 2), (2, 2)]);
        let grid = WeekGrid::new(round_robin(), &byes, 3);
        assert_eq!(grid.free_capacity(1), 2);
        assert_eq!(grid.free_capacity(2), 1);
        assert_eq!(grid.total_capacity(), 5);
    }

    #[test]
    fn test_place_and_remove() {
        let mut grid = WeekGrid::new(round_robin(), &ByeAssignment::new(), 3);
        assert!(grid.is_legal(0, 1));
        grid.place(0, 1);
        assert_eq!(grid.week_of(0), 1);
        assert_eq!(grid.game_at(2, 1), Some(0));
        // Team 1 is busy in week 1 now.
        assert!(!grid.is_legal(2, 1));
        assert!(grid.is_legal(1, 1));
        assert_eq!(grid.free_weeks(1), 0b1100);

        grid.remove(0);
        assert_eq!(grid.week_of(0), 0);
        assert_eq!(grid.game_at(1, 1), None);
        assert_eq!(grid.placed(), 0);
    }

    #[test]
    fn test_bye_blocks_week() {
        let byes = ByeAssignment::from_pairs([(3, 2)]);
        let grid = WeekGrid::new(round_robin(), &byes, 3);
        assert!(grid.is_bye(3, 2));
        assert_eq!(grid.legal_weeks(1), 0b1010);
        assert_eq!(grid.legal_weeks(0), 0b1110);
    }

    #[test]
    fn test_out_of_range_week_illegal() {
        let grid = WeekGrid::new(round_robin(), &ByeAssignment::new(), 3);
        assert!(!grid.is_legal(0, 0));
        assert!(!grid.is_legal(0, 4));
    }

    #[test]
    fn test_weeks_in() {
        assert_eq!(weeks_in(0b1010_0010).collect::<Vec<_>>(), vec![1, 5, 7]);
        assert_eq!(weeks_in(0).count(), 0);
    }
}
