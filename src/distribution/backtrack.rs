//! Depth-first backtracking over a fixed game order.
//!
//! # Algorithm
//!
//! Games are ordered once by ascending count of legal weeks on the empty
//! grid. The search keeps an explicit stack of frames, one per game on the
//! current path. A frame records the game's position in the order, the next
//! week to try and the week it currently occupies. Undo is a function of
//! the frame alone: unplace `placed`, then resume from `next_week`.
//!
//! Every placement counts as one node. Exceeding the node limit ends the
//! search as a failure for this bye configuration.

use super::grid::WeekGrid;

/// One level of the search path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    /// Position in the static order.
    index: usize,
    /// First week not yet tried.
    next_week: u8,
    /// Week the game occupies on the current path.
    placed: Option<u8>,
}

impl Frame {
    fn new(index: usize) -> Self {
        Self {
            index,
            next_week: 1,
            placed: None,
        }
    }
}

/// Result of a backtracking run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct BacktrackOutcome {
    /// Whether every game found a week.
    pub solved: bool,
    /// Placements made.
    pub nodes: u64,
    /// Deepest path reached, in games.
    pub deepest: usize,
}

/// Searches for a complete placement starting from an empty grid.
pub(crate) fn backtrack(grid: &mut WeekGrid, node_limit: u64) -> BacktrackOutcome {
    grid.clear();
    let mut order: Vec<usize> = (0..grid.len()).collect();
    order.sort_by_key(|&g| (grid.legal_weeks(g).count_ones(), g));

    let mut outcome = BacktrackOutcome::default();
    if order.is_empty() {
        outcome.solved = true;
        return outcome;
    }

    let mut stack = vec![Frame::new(0)];
    while let Some(frame) = stack.last_mut() {
        let game = order[frame.index];
        if frame.placed.take().is_some() {
            grid.remove(game);
        }

        let next = (frame.next_week..=grid.weeks()).find(|&w| grid.is_legal(game, w));
        let Some(week) = next else {
            stack.pop();
            continue;
        };

        outcome.nodes += 1;
        if outcome.nodes > node_limit {
            break;
        }
        grid.place(game, week);
        frame.placed = Some(week);
        frame.next_week = week + 1;

        let depth = frame.index + 1;
        outcome.deepest = outcome.deepest.max(depth);
        if depth == order.len() {
            outcome.solved = true;
            return outcome;
        }
        stack.push(Frame::new(depth));
    }

    grid.clear();
    outcome
}
