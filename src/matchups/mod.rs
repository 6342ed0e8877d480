//! Season matchup generation.
//!
//! Produces the 272 games of a season from five disjoint groups:
//!
//! | Group | Games | Per team |
//! |-------|-------|----------|
//! | Division (home and away vs each rival) | 96 | 6 |
//! | In-conference rotation division | 64 | 4 |
//! | Cross-conference rotation division | 64 | 4 |
//! | Same-place finishers, other two conference divisions | 32 | 2 |
//! | Extra game, second opposite-conference division | 16 | 1 |
//!
//! Home/away is fixed here so that every team already hosts 8 or 9 games;
//! the balancer only has to correct custom tables or standings.
//!
//! Each sub-generator's count is asserted. A mismatch means the league or
//! rotation tables are corrupt and is reported as an invariant violation.

mod standings;

pub use standings::Standings;

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::models::{
    Conference, DivisionId, League, Matchup, MatchupKind, Season, TeamId, GAMES_PER_TEAM,
    TEAM_COUNT, TOTAL_GAMES,
};
use crate::rotation;

/// Expected size of each group.
pub const DIVISION_GAMES: usize = 96;
/// In-conference rotation games.
pub const IN_CONFERENCE_GAMES: usize = 64;
/// Cross-conference rotation games.
pub const CROSS_CONFERENCE_GAMES: usize = 64;
/// Same-place finisher games.
pub const SAME_PLACE_GAMES: usize = 32;
/// Extra (17th) games.
pub const EXTRA_GAMES: usize = 16;

/// Builds every matchup of a season.
///
/// # Example
/// ```
/// use u_season::matchups::MatchupGenerator;
/// use u_season::models::League;
///
/// let league = League::standard();
/// let matchups = MatchupGenerator::new(&league, 2025).generate().unwrap();
/// assert_eq!(matchups.len(), 272);
/// ```
#[derive(Debug, Clone)]
pub struct MatchupGenerator<'a> {
    league: &'a League,
    season: Season,
    standings: Standings,
}

impl<'a> MatchupGenerator<'a> {
    /// Creates a generator using team-id order as standings.
    pub fn new(league: &'a League, season: Season) -> Self {
        Self {
            league,
            season,
            standings: Standings::default_order(league),
        }
    }

    /// Sets prior-season standings.
    pub fn with_standings(mut self, standings: Standings) -> Self {
        self.standings = standings;
        self
    }

    /// Generates all 272 matchups, asserting every group count.
    pub fn generate(&self) -> Result<Vec<Matchup>> {
        let groups: [(&str, usize, Vec<Matchup>); 5] = [
            ("division games", DIVISION_GAMES, self.division_games()),
            (
                "in-conference rotation games",
                IN_CONFERENCE_GAMES,
                self.in_conference_rotation_games(),
            ),
            (
                "cross-conference rotation games",
                CROSS_CONFERENCE_GAMES,
                self.cross_conference_rotation_games(),
            ),
            ("same-place games", SAME_PLACE_GAMES, self.same_place_games()),
            ("extra games", EXTRA_GAMES, self.extra_games()),
        ];

        let mut matchups = Vec::with_capacity(TOTAL_GAMES);
        for (context, expected, games) in groups {
            if games.len() != expected {
                return Err(ScheduleError::invariant(context, expected, games.len()));
            }
            matchups.extend(games);
        }

        self.check_totals(&matchups)?;
        debug!(season = self.season, games = matchups.len(), "matchups generated");
        Ok(matchups)
    }

    /// Home-and-home round robin inside each division.
    pub fn division_games(&self) -> Vec<Matchup> {
        let mut games = Vec::with_capacity(DIVISION_GAMES);
        for division in self.league.divisions() {
            let teams = &division.teams;
            for i in 0..teams.len() {
                for j in (i + 1)..teams.len() {
                    games.push(Matchup::new(teams[i], teams[j], MatchupKind::Division));
                    games.push(Matchup::new(teams[j], teams[i], MatchupKind::Division));
                }
            }
        }
        games
    }

    /// Full cross-product against the in-conference rotation division.
    pub fn in_conference_rotation_games(&self) -> Vec<Matchup> {
        self.rotation_games(
            rotation::in_conference_opponent,
            MatchupKind::InConferenceRotation,
        )
    }

    /// Full cross-product against the cross-conference rotation division.
    pub fn cross_conference_rotation_games(&self) -> Vec<Matchup> {
        self.rotation_games(
            rotation::cross_conference_opponent,
            MatchupKind::CrossConferenceRotation,
        )
    }

    /// Each division pair appears once; the lower id generates it.
    ///
    /// Team slots `i` and `j` (position within their division) decide the
    /// host by `(season + i + j) mod 2`, so every team hosts exactly two of
    /// its four games and the pattern flips each season. Slot parity is used
    /// instead of `(season + team_id) mod 2`, which depends on one team's id
    /// alone and so makes a team host all four games or none.
    fn rotation_games(
        &self,
        opponent: fn(DivisionId, Season) -> DivisionId,
        kind: MatchupKind,
    ) -> Vec<Matchup> {
        let mut games = Vec::with_capacity(IN_CONFERENCE_GAMES);
        for division in self.league.divisions() {
            let partner_id = opponent(division.id, self.season);
            if partner_id <= division.id {
                continue;
            }
            let partner = self.league.division(partner_id);
            for (i, &a) in division.teams.iter().enumerate() {
                for (j, &b) in partner.teams.iter().enumerate() {
                    let a_hosts = (self.season as usize + i + j) % 2 == 0;
                    let (home, away) = if a_hosts { (a, b) } else { (b, a) };
                    games.push(Matchup::new(home, away, kind));
                }
            }
        }
        games
    }

    /// Rank-matched games against the two non-rotation conference divisions.
    ///
    /// Those division pairs form a 4-cycle per conference. Walking the cycle
    /// and letting each division host the next makes every team host one
    /// same-place game and visit the other; odd seasons walk it backwards.
    pub fn same_place_games(&self) -> Vec<Matchup> {
        let mut games = Vec::with_capacity(SAME_PLACE_GAMES);
        for conference in [Conference::Afc, Conference::Nfc] {
            let cycle = self.same_place_cycle(conference);
            for k in 0..cycle.len() {
                let (mut host, mut visitor) = (cycle[k], cycle[(k + 1) % cycle.len()]);
                if self.season % 2 == 1 {
                    std::mem::swap(&mut host, &mut visitor);
                }
                let hosts = self.standings.ranked(host);
                let visitors = self.standings.ranked(visitor);
                for (&h, &v) in hosts.iter().zip(visitors.iter()) {
                    games.push(Matchup::new(h, v, MatchupKind::SamePlace));
                }
            }
        }
        games
    }

    fn same_place_cycle(&self, conference: Conference) -> Vec<DivisionId> {
        let start = conference.divisions()[0];
        let mut cycle = vec![start];
        let mut prev = start;
        let mut current = rotation::same_place_opponents(start, self.season)[0];
        while current != start && cycle.len() < 4 {
            cycle.push(current);
            let [a, b] = rotation::same_place_opponents(current, self.season);
            let next = if a == prev { b } else { a };
            prev = current;
            current = next;
        }
        cycle
    }

    /// Rank-matched AFC vs NFC games; the AFC side hosts in even seasons.
    pub fn extra_games(&self) -> Vec<Matchup> {
        let mut games = Vec::with_capacity(EXTRA_GAMES);
        for afc in Conference::Afc.divisions() {
            let nfc = rotation::extra_game_opponent(afc, self.season);
            let afc_teams = self.standings.ranked(afc);
            let nfc_teams = self.standings.ranked(nfc);
            for (&a, &n) in afc_teams.iter().zip(nfc_teams.iter()) {
                let (home, away) = if self.season % 2 == 0 { (a, n) } else { (n, a) };
                games.push(Matchup::new(home, away, MatchupKind::Extra));
            }
        }
        games
    }

    /// Checks the total, the per-team count and pair multiplicity.
    fn check_totals(&self, matchups: &[Matchup]) -> Result<()> {
        if matchups.len() != TOTAL_GAMES {
            return Err(ScheduleError::invariant("total games", TOTAL_GAMES, matchups.len()));
        }

        let mut per_team: BTreeMap<TeamId, usize> = BTreeMap::new();
        let mut per_pair: BTreeMap<(TeamId, TeamId), usize> = BTreeMap::new();
        for m in matchups {
            for t in m.teams() {
                *per_team.entry(t).or_default() += 1;
            }
            *per_pair.entry(m.pair()).or_default() += 1;
        }

        if per_team.len() != TEAM_COUNT {
            return Err(ScheduleError::invariant("teams with games", TEAM_COUNT, per_team.len()));
        }
        if let Some((team, &count)) = per_team.iter().find(|(_, &c)| c != GAMES_PER_TEAM) {
            return Err(ScheduleError::invariant(
                format!("games for team {team}"),
                GAMES_PER_TEAM,
                count,
            ));
        }
        for (&(a, b), &count) in &per_pair {
            let allowed = if self.league.same_division(a, b) { 2 } else { 1 };
            if count != allowed {
                return Err(ScheduleError::invariant(
                    format!("meetings between teams {a} and {b}"),
                    allowed,
                    count,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn div(id: u8) -> DivisionId {
        DivisionId::new(id).unwrap()
    }

    fn home_counts(games: &[Matchup]) -> BTreeMap<TeamId, usize> {
        let mut counts = BTreeMap::new();
        for m in games {
            *counts.entry(m.home_team_id).or_default() += 1;
        }
        counts
    }

    #[test]
    fn test_group_counts() {
        let league = League::standard();
        let gen = MatchupGenerator::new(&league, 2025);
        assert_eq!(gen.division_games().len(), 96);
        assert_eq!(gen.in_conference_rotation_games().len(), 64);
        assert_eq!(gen.cross_conference_rotation_games().len(), 64);
        assert_eq!(gen.same_place_games().len(), 32);
        assert_eq!(gen.extra_games().len(), 16);
    }

    #[test]
    fn test_generate_every_season_in_cycle() {
        let league = League::standard();
        for season in 2020..2032 {
            let games = MatchupGenerator::new(&league, season).generate().unwrap();
            assert_eq!(games.len(), TOTAL_GAMES, "season {season}");
            assert!(games.iter().all(|m| m.week == 0));
        }
    }

    #[test]
    fn test_division_games_round_trip() {
        let league = League::standard();
        let games = MatchupGenerator::new(&league, 2025).division_games();
        let afc_east: Vec<_> = games
            .iter()
            .filter(|m| league.division_of(m.home_team_id) == Some(div(1)))
            .collect();
        assert_eq!(afc_east.len(), 12);
        for a in 1..=4u8 {
            for b in 1..=4u8 {
                if a == b {
                    continue;
                }
                let hosted = games
                    .iter()
                    .filter(|m| m.home_team_id == a && m.away_team_id == b)
                    .count();
                assert_eq!(hosted, 1, "{a} hosts {b}");
            }
        }
        let counts = home_counts(&games);
        assert!(counts.values().all(|&c| c == 3));
    }

    #[test]
    fn test_rotation_games_split_home_evenly() {
        let league = League::standard();
        for season in [2024, 2025] {
            let gen = MatchupGenerator::new(&league, season);
            for games in [
                gen.in_conference_rotation_games(),
                gen.cross_conference_rotation_games(),
            ] {
                let counts = home_counts(&games);
                assert_eq!(counts.len(), 32);
                assert!(counts.values().all(|&c| c == 2));
            }
        }
    }

    #[test]
    fn test_in_conference_targets_rotation_division() {
        let league = League::standard();
        let games = MatchupGenerator::new(&league, 2025).in_conference_rotation_games();
        // 2025: AFC East plays AFC North.
        let east_vs_north = games
            .iter()
            .filter(|m| {
                let d = [
                    league.division_of(m.home_team_id),
                    league.division_of(m.away_team_id),
                ];
                d.contains(&Some(div(1))) && d.contains(&Some(div(2)))
            })
            .count();
        assert_eq!(east_vs_north, 16);
        assert!(games.iter().all(|m| m.is_conference && !m.is_divisional));
    }

    #[test]
    fn test_same_place_one_home_one_away() {
        let league = League::standard();
        let gen = MatchupGenerator::new(&league, 2025);
        let games = gen.same_place_games();
        for team in 1..=32u8 {
            let home = games.iter().filter(|m| m.home_team_id == team).count();
            let away = games.iter().filter(|m| m.away_team_id == team).count();
            assert_eq!((home, away), (1, 1), "team {team}");
        }
        assert!(games.iter().all(|m| league.same_conference(m.home_team_id, m.away_team_id)));
    }

    #[test]
    fn test_same_place_matches_by_rank() {
        let league = League::standard();
        let mut standings = Standings::default_order(&league);
        standings.set(&league, div(1), [4, 3, 2, 1]).unwrap();
        standings.set(&league, div(3), [12, 11, 10, 9]).unwrap();
        let games = MatchupGenerator::new(&league, 2025)
            .with_standings(standings)
            .same_place_games();
        // 2025: AFC East's same-place divisions are 3 and 4; 4th place (1) meets 4th place (9).
        assert!(games.iter().any(|m| m.pair() == (1, 9)));
        assert!(games.iter().any(|m| m.pair() == (4, 12)));
    }

    #[test]
    fn test_extra_games_host_by_season_parity() {
        let league = League::standard();
        let even = MatchupGenerator::new(&league, 2026).extra_games();
        assert!(even
            .iter()
            .all(|m| league.conference_of(m.home_team_id) == Some(Conference::Afc)));
        let odd = MatchupGenerator::new(&league, 2025).extra_games();
        assert!(odd
            .iter()
            .all(|m| league.conference_of(m.home_team_id) == Some(Conference::Nfc)));
    }

    #[test]
    fn test_extra_game_not_against_cross_division() {
        let league = League::standard();
        let gen = MatchupGenerator::new(&league, 2025);
        let cross = gen.cross_conference_rotation_games();
        for m in gen.extra_games() {
            assert!(!cross.iter().any(|c| c.pair() == m.pair()));
        }
    }

    #[test]
    fn test_home_counts_already_balanced() {
        let league = League::standard();
        for season in 2024..2028 {
            let games = MatchupGenerator::new(&league, season).generate().unwrap();
            let counts = home_counts(&games);
            assert!(
                counts.values().all(|&c| c == 8 || c == 9),
                "season {season}: {counts:?}"
            );
        }
    }

    #[test]
    fn test_team_one_plays_seventeen() {
        let league = League::standard();
        let games = MatchupGenerator::new(&league, 2025).generate().unwrap();
        assert_eq!(games.iter().filter(|m| m.involves(1)).count(), 17);
    }
}
