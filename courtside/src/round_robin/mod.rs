//! Round-robin fixtures, standings and progressive elimination.
//!
//! This module provides:
//! - Full round-robin generation by circle rotation, with a bye for odd fields
//! - Standings with a deterministic multi-level tie-break
//! - Dynamic knockout: rounds are played in phases and the weakest
//!   competitors are dropped between phases until a floor is reached
//! - Best-versus-worst knockout seeding from qualifiers
//!
//! ## Example
//!
//! ```
//! use courtside::{Competitor, round_robin::{RoundRobinEngine, RoundRobinOptions}};
//!
//! let competitors: Vec<_> = ["north", "north", "south", "east"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, club)| Competitor::new(i.to_string(), format!("Player {i}"), 16, *club))
//!     .collect();
//!
//! let result = RoundRobinEngine::new()
//!     .generate(&competitors, &RoundRobinOptions::default())
//!     .unwrap();
//!
//! assert_eq!(result.num_rounds, 3);
//! assert!(result.rounds.iter().all(|round| round.len() == 2));
//! ```

pub mod engine;
pub mod knockout;
pub mod models;
mod rotation;
pub mod standings;

pub use engine::RoundRobinEngine;
pub use knockout::build_knockout_from_qualifiers;
pub use models::{DynamicKnockout, MatchResolver, RoundRobinOptions, RoundRobinResult, Unplayed};
pub use standings::{PointsTable, StandingRecord, Standings, compute_standings, pick_qualifiers};
