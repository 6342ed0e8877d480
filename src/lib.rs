//! Season schedule generation for a 32-team, 8-division league.
//!
//! Produces a complete 18-week calendar: 272 games, 17 per team, one bye
//! per team in weeks 5-14, every team hosting 8 or 9 games and nobody
//! playing twice in a week.
//!
//! # Modules
//!
//! - **`models`**: League table, `Matchup`, `RotationState`, `ByeAssignment`,
//!   `WeeklySchedule`
//! - **`rotation`**: Division opponent cycles (period 3 in-conference, 4 cross)
//! - **`matchups`**: The five matchup groups of a season
//! - **`balance`**: Home/away balancing
//! - **`bye`**: Scored bye-week assignment on a weighted rule engine
//! - **`distribution`**: Greedy, repair and backtracking week placement
//! - **`generator`**: End-to-end pipeline with bye retries
//! - **`store`**: Standings and persistence collaborators
//! - **`events`**: Exported game records
//! - **`validation`**: Re-runnable structural checks
//! - **`kpi`**: Schedule quality metrics
//!
//! # Example
//!
//! ```
//! use u_season::store::{MemoryStore, NoStandings};
//! use u_season::SeasonScheduler;
//!
//! let season = SeasonScheduler::standard()
//!     .generate_schedule(2025, 7, &NoStandings, &mut MemoryStore::new())
//!     .unwrap();
//! let records = season.game_records();
//! assert_eq!(records.len(), 272);
//! assert!(records.windows(2).all(|w| w[0].week <= w[1].week));
//! ```
//!
//! Output is a pure function of the season, seed and collaborator data.
//! The crate logs through `tracing` and never installs a subscriber.
//!
//! # References
//!
//! - Kendall et al. (2010), "Scheduling in sports: An annotated bibliography"
//! - Rasmussen & Trick (2008), "Round robin scheduling - a survey"

pub mod balance;
pub mod bye;
pub mod config;
pub mod distribution;
pub mod error;
pub mod events;
pub mod generator;
pub mod kpi;
pub mod matchups;
pub mod models;
pub mod rotation;
pub mod store;
pub mod validation;

pub use config::{ByePenalties, SeasonConfig};
pub use error::{Result, ScheduleError};
pub use events::GameRecord;
pub use generator::{GenerationReport, SeasonSchedule, SeasonScheduler};
