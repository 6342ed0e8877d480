//! Ejection-chain repair of a partial greedy placement.
//!
//! # Algorithm
//!
//! Games left over by the greedy pass are queued. For each queued game
//! `(u, v)`, in order:
//!
//! 1. **Direct**: a week where both teams are free.
//! 2. **Swap chain**: pick week `a` free for `u` and week `b` free for `v`.
//!    The games alternating between weeks `a` and `b` from `v` form a path;
//!    exchanging their weeks frees `v` in `a`. Rejected if the chain's far
//!    end would land on its bye, or if it also consumed `u`'s free week.
//!    The mirror chain from `u` is tried next.
//! 3. **Ejection**: place the game in a week neither team has off, evicting
//!    the one or two games that clash. Evicted games are queued and may not
//!    return to that week for a short tabu tenure.
//!
//! Stops when the queue empties or the step budget runs out.
//!
//! # Reference
//! Vizing-style alternating path recolouring for edge colouring; ejection
//! chains as in Glover (1996), "Ejection chains, reference structures and
//! alternating path methods for traveling salesman problems".

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::Rng;

use super::grid::{weeks_in, WeekGrid};
use crate::models::TeamId;

const TABU_TENURE: usize = 7;

/// Result of a repair run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RepairOutcome {
    /// Steps used.
    pub steps: usize,
    /// Games still unplaced.
    pub remaining: Vec<usize>,
}

/// Tries to place every game in `unassigned`.
pub(crate) fn repair(
    grid: &mut WeekGrid,
    unassigned: Vec<usize>,
    max_steps: usize,
    rng: &mut SmallRng,
) -> RepairOutcome {
    let stride = grid.weeks() as usize + 1;
    let mut tabu = vec![0usize; grid.len() * stride];
    let mut queue: VecDeque<usize> = unassigned.into();
    let mut steps = 0;

    while let Some(game) = queue.pop_front() {
        if steps >= max_steps {
            queue.push_front(game);
            break;
        }
        steps += 1;

        if place_direct(grid, game) || place_by_swap(grid, game) {
            continue;
        }
        match eject(grid, game, &mut tabu, steps, rng) {
            Some(evicted) => queue.extend(evicted),
            None => queue.push_back(game),
        }
    }

    RepairOutcome {
        steps,
        remaining: queue.into(),
    }
}

fn place_direct(grid: &mut WeekGrid, game: usize) -> bool {
    match weeks_in(grid.legal_weeks(game)).next() {
        Some(week) => {
            grid.place(game, week);
            true
        }
        None => false,
    }
}

fn place_by_swap(grid: &mut WeekGrid, game: usize) -> bool {
    let [u, v] = grid.teams(game);
    let free_u = grid.free_weeks(u);
    let free_v = grid.free_weeks(v);

    for a in weeks_in(free_u) {
        for b in weeks_in(free_v) {
            if try_chain(grid, game, v, a, b) || try_chain(grid, game, u, b, a) {
                return true;
            }
        }
    }
    false
}

/// Swaps the `a`/`b` chain starting at `start` and places `game` in `a`.
///
/// Leaves the grid untouched on failure.
fn try_chain(grid: &mut WeekGrid, game: usize, start: TeamId, a: u8, b: u8) -> bool {
    let Some((chain, end, end_week)) = alternating_chain(grid, start, a, b) else {
        return false;
    };
    if chain.is_empty() || grid.is_bye(end, end_week) {
        return false;
    }

    swap_weeks(grid, &chain, a, b);
    if grid.is_legal(game, a) {
        grid.place(game, a);
        true
    } else {
        swap_weeks(grid, &chain, a, b);
        false
    }
}

/// Games alternating between weeks `a` and `b` from `start`, starting in `a`.
///
/// Also returns the far end of the chain and the week it would play in
/// after the swap.
fn alternating_chain(
    grid: &WeekGrid,
    start: TeamId,
    a: u8,
    b: u8,
) -> Option<(Vec<usize>, TeamId, u8)> {
    let mut chain = Vec::new();
    let mut team = start;
    let mut week = a;
    while let Some(g) = grid.game_at(team, week) {
        if chain.len() > grid.len() {
            return None;
        }
        chain.push(g);
        let [x, y] = grid.teams(g);
        team = if x == team { y } else { x };
        week = if week == a { b } else { a };
    }
    Some((chain, team, week))
}

fn swap_weeks(grid: &mut WeekGrid, chain: &[usize], a: u8, b: u8) {
    let old: Vec<u8> = chain.iter().map(|&g| grid.week_of(g)).collect();
    for &g in chain {
        grid.remove(g);
    }
    for (&g, &w) in chain.iter().zip(&old) {
        grid.place(g, if w == a { b } else { a });
    }
}

/// Forces `game` into the least disruptive week and returns what it evicted.
fn eject(
    grid: &mut WeekGrid,
    game: usize,
    tabu: &mut [usize],
    step: usize,
    rng: &mut SmallRng,
) -> Option<Vec<usize>> {
    let stride = grid.weeks() as usize + 1;
    let [u, v] = grid.teams(game);

    let mut best: Option<((bool, bool, usize, u32), u8)> = None;
    for week in 1..=grid.weeks() {
        if grid.is_bye(u, week) || grid.is_bye(v, week) {
            continue;
        }
        let clashing = clashes(grid, u, v, week);
        // Evicting the other leg of the same pairing just trades places.
        let same_pair = clashing.iter().any(|&g| {
            let [x, y] = grid.teams(g);
            (x == u && y == v) || (x == v && y == u)
        });
        let key = (
            tabu[game * stride + week as usize] > step,
            same_pair,
            clashing.len(),
            rng.random::<u32>(),
        );
        if best.map_or(true, |(k, _)| key < k) {
            best = Some((key, week));
        }
    }

    let (_, week) = best?;
    let evicted = clashes(grid, u, v, week);
    for &g in &evicted {
        grid.remove(g);
        tabu[g * stride + week as usize] = step + TABU_TENURE + rng.random_range(0..3);
    }
    grid.place(game, week);
    Some(evicted)
}

/// Distinct games `u` or `v` play in `week`.
fn clashes(grid: &WeekGrid, u: TeamId, v: TeamId, week: u8) -> Vec<usize> {
    let mut games: Vec<usize> = [grid.game_at(u, week), grid.game_at(v, week)]
        .into_iter()
        .flatten()
        .collect();
    games.dedup();
    games
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ByeAssignment;
    use rand::SeedableRng;

    /// Single round robin of six teams: 15 games, five weeks, no slack.
    fn six_team_round_robin() -> Vec<[TeamId; 2]> {
        let mut pairs = Vec::new();
        for a in 1..=6u8 {
            for b in (a + 1)..=6 {
                pairs.push([a, b]);
            }
        }
        pairs
    }

    #[test]
    fn test_completes_tight_round_robin() {
        let mut grid = WeekGrid::new(six_team_round_robin(), &ByeAssignment::new(), 5);
        // Weeks 1 and 2 both leave 5-6 as the only pairing: a dead end.
        grid.place(0, 1); // 1-2
        grid.place(9, 1); // 3-4
        grid.place(1, 2); // 1-3
        grid.place(6, 2); // 2-4
        let left: Vec<usize> = (0..grid.len()).filter(|&g| grid.week_of(g) == 0).collect();

        let mut rng = SmallRng::seed_from_u64(5);
        let outcome = repair(&mut grid, left, 5_000, &mut rng);
        assert!(outcome.remaining.is_empty(), "{outcome:?}");
        assert_eq!(grid.placed(), 15);
        for week in 1..=5u8 {
            for team in 1..=6u8 {
                assert!(grid.game_at(team, week).is_some(), "team {team} idle in week {week}");
            }
        }
    }

    #[test]
    fn test_chain_swap_frees_week() {
        let pairs = vec![[1, 2], [3, 4], [1, 3], [2, 4]];
        let mut grid = WeekGrid::new(pairs, &ByeAssignment::new(), 2);
        grid.place(0, 1);
        grid.place(1, 2);
        // 1 is free only in week 2, 3 only in week 1: 3-4 has to move.
        assert!(!place_direct(&mut grid, 2));
        assert!(place_by_swap(&mut grid, 2));
        assert_eq!(grid.week_of(1), 1);
        assert_eq!(grid.week_of(2), 2);
        assert_eq!(grid.placed(), 3);
    }

    #[test]
    fn test_chain_respects_end_bye() {
        // Team 4 is off in week 2, so 3-4 cannot move there.
        let byes = ByeAssignment::from_pairs([(4, 2)]);
        let mut grid = WeekGrid::new(vec![[3, 4], [1, 3]], &byes, 2);
        grid.place(0, 1);
        let chain = alternating_chain(&grid, 3, 1, 2);
        let (games, end, week) = chain.unwrap();
        assert_eq!(games, vec![0]);
        assert_eq!((end, week), (4, 2));
        assert!(!try_chain(&mut grid, 1, 3, 1, 2));
        assert_eq!(grid.week_of(0), 1);
    }

    #[test]
    fn test_eject_evicts_clashing_games() {
        let pairs = vec![[1, 2], [3, 4], [1, 3]];
        let mut grid = WeekGrid::new(pairs, &ByeAssignment::new(), 1);
        grid.place(0, 1);
        grid.place(1, 1);
        let mut tabu = vec![0; grid.len() * 2];
        let mut rng = SmallRng::seed_from_u64(0);
        let evicted = eject(&mut grid, 2, &mut tabu, 1, &mut rng).unwrap();
        assert_eq!(evicted, vec![0, 1]);
        assert_eq!(grid.week_of(2), 1);
        assert!(tabu[1] > 1 && tabu[3] > 1);
    }

    #[test]
    fn test_budget_exhaustion_reports_remaining() {
        // Team 1 has three games and one week: unsolvable.
        let pairs = vec![[1, 2], [1, 3], [1, 4]];
        let mut grid = WeekGrid::new(pairs, &ByeAssignment::new(), 1);
        let mut rng = SmallRng::seed_from_u64(2);
        let outcome = repair(&mut grid, vec![0, 1, 2], 50, &mut rng);
        assert_eq!(outcome.steps, 50);
        assert_eq!(outcome.remaining.len(), 2);
    }
}
