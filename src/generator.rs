//! Season generation pipeline.
//!
//! Runs every stage for one `(season, seed)` and either returns a complete,
//! validated schedule or an error. Partial schedules are never returned.
//!
//! # Pipeline
//!
//! ```text
//! rotation -> matchups -> balance -> [byes -> distribution] x retries -> validate -> persist
//! ```
//!
//! A failed distribution discards the whole bye assignment and draws a new
//! one from the next seed in the bye stream. Persistence runs last, so a
//! failed call leaves the store untouched.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::balance::HomeAwayBalancer;
use crate::bye::ByeWeekAssigner;
use crate::config::SeasonConfig;
use crate::distribution::{derive_seed, DistributionReport, WeekDistributor, BYE_STREAM};
use crate::error::{Result, ScheduleError};
use crate::events::{to_game_records, GameRecord};
use crate::kpi::ScheduleKpi;
use crate::matchups::{MatchupGenerator, Standings};
use crate::models::{ByeAssignment, League, RotationState, Season, TeamId, WeeklySchedule};
use crate::rotation;
use crate::store::{ScheduleStore, StandingsProvider};
use crate::validation::{validate_byes, validate_schedule};

/// How a schedule was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Bye configurations tried, including the accepted one.
    pub bye_attempts: usize,
    /// Seed of the accepted bye configuration.
    pub bye_seed: u64,
    /// Distribution outcome for the accepted configuration.
    pub distribution: DistributionReport,
    /// Home/away flips applied.
    pub balance_flips: usize,
    /// Teams left outside 8-9 home games.
    pub unbalanced_teams: Vec<TeamId>,
}

/// A finished season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSchedule {
    /// Season year.
    pub season: Season,
    /// Caller seed.
    pub seed: u64,
    /// Week -> games.
    pub schedule: WeeklySchedule,
    /// Team -> bye week.
    pub byes: ByeAssignment,
    /// One rotation record per division.
    pub rotations: Vec<RotationState>,
    /// Search statistics.
    pub report: GenerationReport,
}

impl SeasonSchedule {
    /// Game records, week then home team order.
    pub fn game_records(&self) -> Vec<GameRecord> {
        to_game_records(&self.schedule, self.season)
    }

    /// Quality metrics.
    pub fn kpi(&self) -> ScheduleKpi {
        ScheduleKpi::calculate(&self.schedule, &self.byes)
    }
}

/// Generates complete seasons for one league.
///
/// # Example
///
/// ```
/// use u_season::store::{MemoryStore, NoStandings};
/// use u_season::SeasonScheduler;
///
/// let scheduler = SeasonScheduler::standard();
/// let mut store = MemoryStore::new();
/// let season = scheduler
///     .generate_schedule(2025, 42, &NoStandings, &mut store)
///     .unwrap();
/// assert_eq!(season.schedule.total_games(), 272);
/// assert_eq!(store.rotation_count(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct SeasonScheduler {
    league: League,
    config: SeasonConfig,
    scope: String,
}

impl SeasonScheduler {
    /// Creates a scheduler after validating `config`.
    pub fn new(league: League, config: SeasonConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            league,
            config,
            scope: "default".into(),
        })
    }

    /// Standard league with default configuration.
    pub fn standard() -> Self {
        Self {
            league: League::standard(),
            config: SeasonConfig::default(),
            scope: "default".into(),
        }
    }

    /// Sets the store scope (league or dynasty key).
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// The league being scheduled.
    pub fn league(&self) -> &League {
        &self.league
    }

    /// The active configuration.
    pub fn config(&self) -> &SeasonConfig {
        &self.config
    }

    /// Generates, validates and persists one season.
    ///
    /// # Errors
    /// - `Invariant` / `InvalidDivision` when the static tables are corrupt
    /// - `Exhausted` when no bye configuration could be distributed
    /// - `Store` when persistence fails
    pub fn generate_schedule<P, S>(
        &self,
        season: Season,
        seed: u64,
        standings: &P,
        store: &mut S,
    ) -> Result<SeasonSchedule>
    where
        P: StandingsProvider + ?Sized,
        S: ScheduleStore + ?Sized,
    {
        info!(season, seed, scope = %self.scope, "generating season schedule");
        self.config.validate()?;

        let rotations = rotation::rotation_states(season);
        for state in &rotations {
            rotation::verify_rotation(state)?;
        }
        self.check_continuity(season, &*store);

        let standings = Standings::from_provider(&self.league, standings, season);
        let mut matchups = MatchupGenerator::new(&self.league, season)
            .with_standings(standings)
            .generate()?;

        let balance =
            HomeAwayBalancer::new(self.config.balance_max_iterations).balance(&mut matchups);

        let assigner = ByeWeekAssigner::new(&self.league, &self.config);
        let mut last_failure = None;
        let mut accepted = None;
        for attempt in 0..self.config.bye_retries {
            let bye_seed = derive_seed(seed, BYE_STREAM, attempt as u64);
            let byes = assigner.assign(bye_seed)?;
            if let Err(errors) = validate_byes(&byes, &self.league, &self.config) {
                return Err(ScheduleError::invariant(
                    "bye assignment",
                    "a valid assignment",
                    errors
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("; "),
                ));
            }

            match WeekDistributor::new(&byes, &self.config).distribute(&mut matchups, bye_seed) {
                Ok(report) => {
                    debug!(attempt, phase = %report.phase, "bye configuration accepted");
                    accepted = Some((attempt, bye_seed, byes, report));
                    break;
                }
                Err(e) if e.is_recoverable() => {
                    warn!(attempt, bye_seed, error = %e, "discarding bye configuration");
                    last_failure = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        let Some((attempt, bye_seed, byes, distribution)) = accepted else {
            return Err(ScheduleError::Exhausted {
                retries: self.config.bye_retries,
                last: last_failure
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "no attempt ran".into()),
            });
        };

        let schedule = WeeklySchedule::from_matchups(&matchups);
        self.check_schedule(&schedule, &byes)?;

        store.save_rotations(&self.scope, season, &rotations)?;
        store.save_byes(&self.scope, season, &byes)?;

        let report = GenerationReport {
            bye_attempts: attempt + 1,
            bye_seed,
            distribution,
            balance_flips: balance.flips,
            unbalanced_teams: balance.unbalanced,
        };
        info!(
            season,
            seed,
            bye_attempts = report.bye_attempts,
            phase = %report.distribution.phase,
            "season schedule generated"
        );

        Ok(SeasonSchedule {
            season,
            seed,
            schedule,
            byes,
            rotations: rotations.to_vec(),
            report,
        })
    }

    /// Warns when last season's stored rotation disagrees with the formula.
    fn check_continuity<S: ScheduleStore + ?Sized>(&self, season: Season, store: &S) {
        let Some(prior) = season.checked_sub(1) else {
            return;
        };
        for expected in rotation::rotation_states(prior) {
            if let Some(stored) = store.rotation(&self.scope, prior, expected.division_id) {
                if stored != expected {
                    warn!(
                        division = %expected.division_id,
                        season = prior,
                        ?stored,
                        ?expected,
                        "stored rotation differs from formula; using formula"
                    );
                }
            }
        }
    }

    /// Rejects hard violations; logs soft ones.
    fn check_schedule(&self, schedule: &WeeklySchedule, byes: &ByeAssignment) -> Result<()> {
        let Err(errors) = validate_schedule(schedule, byes, &self.league) else {
            return Ok(());
        };
        if let Some(hard) = errors.iter().find(|e| e.kind.is_hard()) {
            return Err(ScheduleError::invariant(
                "finished schedule",
                "no hard violations",
                hard.to_string(),
            ));
        }
        for soft in &errors {
            warn!(%soft, "schedule quality issue");
        }
        Ok(())
    }
}

impl Default for SeasonScheduler {
    fn default() -> Self {
        Self::standard()
    }
}
