//! # Courtside
//!
//! Fixture generation, scheduling and match access codes for club
//! tournaments.
//!
//! Every engine works on in-memory inputs supplied by a surrounding service
//! and never performs I/O. Competitors sharing an affiliation (club or team)
//! are kept apart wherever the format allows it.
//!
//! ## Pipeline
//!
//! - **Grouping**: split a field into balanced groups, spreading affiliations
//! - **Pairing**: one round of matches with the fewest same-affiliation pairs
//! - **Round robin**: full rotation, standings with tie-breaks, and dynamic
//!   knockout that drops the weakest competitors between phases
//! - **Bracket**: single-elimination skeletons with byes for the top seeds
//! - **Scheduling**: place matches on courts under rest and working-hour rules
//! - **Security**: issue and validate single-use match codes
//!
//! ## Core Modules
//!
//! - [`entities`]: Competitors, courts and fixtures
//! - [`round_robin`]: Rotation, standings and knockout seeding
//! - [`scheduling`]: Court queue and time-slot allocation
//! - [`security`]: Match-code registry and shared service
//!
//! ## Example
//!
//! ```
//! use courtside::{Competitor, Court, GroupingEngine, SchedulingEngine, SchedulingConstraints};
//! use courtside::round_robin::{RoundRobinEngine, RoundRobinOptions};
//! use chrono::NaiveDate;
//!
//! let competitors: Vec<_> = (0..6)
//!     .map(|i| Competitor::new(format!("p{i}"), format!("Player {i}"), 17, format!("club-{}", i % 3)))
//!     .collect();
//!
//! let groups = GroupingEngine::new().group(&competitors, 2).unwrap();
//! assert_eq!(groups.total_penalty, 0);
//!
//! let fixtures = RoundRobinEngine::new()
//!     .generate(&groups.groups[0].competitors, &RoundRobinOptions::default())
//!     .unwrap();
//!
//! let start = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let schedule = SchedulingEngine::new(SchedulingConstraints::default())
//!     .schedule(
//!         &fixtures.rounds.concat(),
//!         &[Court::new("c1", "Court 1"), Court::new("c2", "Court 2")],
//!         start,
//!     )
//!     .unwrap();
//! assert!(schedule.conflicts.is_empty());
//! ```

/// Engine configuration loaded from the environment.
pub mod config;
pub use config::EngineConfig;

/// Shared competitor, court and fixture types.
pub mod entities;
pub use entities::{Competitor, Court, Fixture, MatchStatus};

pub mod errors;
pub use errors::{EngineError, EngineResult};

pub mod bracket;
pub use bracket::{Bracket, BracketEngine, BracketSlot};

pub mod grouping;
pub use grouping::{Group, GroupingEngine, GroupingResult};

pub mod pairing;
pub use pairing::{PairingEngine, PairingResult};

pub mod round_robin;
pub use round_robin::{RoundRobinEngine, RoundRobinOptions, RoundRobinResult, StandingRecord};

pub mod scheduling;
pub use scheduling::{ScheduleResult, SchedulingConstraints, SchedulingEngine};

pub mod security;
pub use security::{CodeValidationError, MatchCodeRegistry, MatchCodeService};
